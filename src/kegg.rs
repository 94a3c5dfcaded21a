use std::collections::HashMap;

use crate::domain::{OrganismCode, SpeciesName};
use crate::table::DelimitedTable;

pub trait KeggResolver: Send + Sync {
    fn resolve(&self, code: &OrganismCode) -> Option<SpeciesName>;
}

pub struct KeggCodeMapper {
    mapping: HashMap<String, SpeciesName>,
}

impl KeggCodeMapper {
    pub fn new(table: &DelimitedTable) -> Self {
        let mapping = table
            .rows()
            .iter()
            .filter(|row| row.len() >= 2)
            .map(|row| (row[0].clone(), row[1].clone()))
            .collect();
        Self { mapping }
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl KeggResolver for KeggCodeMapper {
    fn resolve(&self, code: &OrganismCode) -> Option<SpeciesName> {
        self.mapping.get(code.as_str()).cloned()
    }
}

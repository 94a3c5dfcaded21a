use std::collections::HashMap;

use crate::domain::TaxonomyId;
use crate::table::DelimitedTable;

pub trait GoResolver: Send + Sync {
    fn resolve(&self, species_name: &str) -> Option<TaxonomyId>;
}

pub struct GoTaxonomyMapper {
    mapping: HashMap<String, TaxonomyId>,
}

impl GoTaxonomyMapper {
    // Source rows are (taxonomy id, species name); the lookup key is the name.
    pub fn new(table: &DelimitedTable) -> Self {
        let mapping = table
            .rows()
            .iter()
            .filter(|row| row.len() >= 2)
            .map(|row| (row[1].clone(), TaxonomyId::new(row[0].clone())))
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

impl GoResolver for GoTaxonomyMapper {
    fn resolve(&self, species_name: &str) -> Option<TaxonomyId> {
        self.mapping.get(species_name).cloned()
    }
}

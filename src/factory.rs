use crate::domain::{Organism, OrganismCode};
use crate::error::OrgmapError;
use crate::go::GoResolver;
use crate::kegg::KeggResolver;
use crate::rsat::SpeciesInfoResolver;

pub struct OrganismFactory<K, R, G> {
    kegg: K,
    rsat: R,
    go: G,
}

impl<K: KeggResolver, R: SpeciesInfoResolver, G: GoResolver> OrganismFactory<K, R, G> {
    pub fn new(kegg: K, rsat: R, go: G) -> Self {
        Self { kegg, rsat, go }
    }

    pub fn create(&self, code: &OrganismCode) -> Result<Organism, OrgmapError> {
        let kegg_organism = self.kegg.resolve(code);
        let rsat_info = self.rsat.resolve(code)?;
        // GO keys species by spaced names where RSAT uses underscores; the
        // GO lookup goes through the RSAT species field, not the KEGG one.
        let go_taxonomy_id = self.go.resolve(&rsat_info.species.replace('_', " "));
        Ok(Organism {
            code: code.clone(),
            kegg_organism,
            rsat_info,
            go_taxonomy_id,
        })
    }
}

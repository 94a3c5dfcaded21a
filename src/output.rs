use std::io::{self, Write};

use serde::Serialize;

use crate::domain::Organism;

#[derive(Debug, Clone, Serialize)]
pub struct OrganismReport {
    pub code: String,
    pub cog_organism: String,
    pub kegg_organism: Option<String>,
    pub species: String,
    pub is_eukaryote: bool,
    pub rsat_taxonomy_id: Option<String>,
    pub go_taxonomy_id: Option<String>,
    pub feature_count: usize,
    pub synonym_count: usize,
    pub contigs: Vec<String>,
}

impl OrganismReport {
    pub fn from_organism(organism: &Organism) -> Self {
        Self {
            code: organism.code.as_str().to_string(),
            cog_organism: organism.cog_organism(),
            kegg_organism: organism.kegg_organism.clone(),
            species: organism.rsat_info.species.clone(),
            is_eukaryote: organism.is_eukaryote(),
            rsat_taxonomy_id: organism
                .rsat_info
                .taxonomy_id
                .as_ref()
                .map(|id| id.as_str().to_string()),
            go_taxonomy_id: organism
                .go_taxonomy_id
                .as_ref()
                .map(|id| id.as_str().to_string()),
            feature_count: organism.rsat_info.features.len(),
            synonym_count: organism.rsat_info.synonyms.len(),
            contigs: organism.rsat_info.contigs.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContigsResult {
    pub code: String,
    pub cached: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearResult {
    pub cleared: bool,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_organism(report: &OrganismReport) -> io::Result<()> {
        Self::print_json(report)
    }

    pub fn print_contigs(result: &ContigsResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_clear(result: &ClearResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

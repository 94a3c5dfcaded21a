use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrgmapError;

pub type SpeciesName = String;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganismCode(String);

impl OrganismCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganismCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrganismCode {
    type Err = OrgmapError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_string();
        let is_valid = !normalized.is_empty()
            && normalized.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(OrgmapError::InvalidOrganismCode(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxonomyId(String);

impl TaxonomyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxonomyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub feature_type: String,
    pub name: String,
    pub contig: String,
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsatSpeciesInfo {
    pub species: SpeciesName,
    pub is_eukaryote: bool,
    pub taxonomy_id: Option<TaxonomyId>,
    pub features: HashMap<String, Feature>,
    pub contigs: Vec<String>,
    pub synonyms: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    pub code: OrganismCode,
    pub kegg_organism: Option<SpeciesName>,
    pub rsat_info: RsatSpeciesInfo,
    pub go_taxonomy_id: Option<TaxonomyId>,
}

impl Organism {
    pub fn is_eukaryote(&self) -> bool {
        self.rsat_info.is_eukaryote
    }

    pub fn is_prokaryote(&self) -> bool {
        !self.rsat_info.is_eukaryote
    }

    pub fn cog_organism(&self) -> String {
        let mut chars = self.code.as_str().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn species_info(is_eukaryote: bool) -> RsatSpeciesInfo {
        RsatSpeciesInfo {
            species: "Helicobacter_pylori_26695".to_string(),
            is_eukaryote,
            taxonomy_id: Some(TaxonomyId::new("85962")),
            features: HashMap::new(),
            contigs: Vec::new(),
            synonyms: HashMap::new(),
        }
    }

    #[test]
    fn parse_organism_code_valid() {
        let code: OrganismCode = " hpy ".parse().unwrap();
        assert_eq!(code.as_str(), "hpy");
    }

    #[test]
    fn parse_organism_code_invalid() {
        let err = "h py".parse::<OrganismCode>().unwrap_err();
        assert_matches!(err, OrgmapError::InvalidOrganismCode(_));
        let err = "".parse::<OrganismCode>().unwrap_err();
        assert_matches!(err, OrgmapError::InvalidOrganismCode(_));
    }

    #[test]
    fn organism_code_is_case_sensitive() {
        let lower: OrganismCode = "hpy".parse().unwrap();
        let upper: OrganismCode = "HPY".parse().unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn classification_delegates_to_rsat_info() {
        let organism = Organism {
            code: "hpy".parse().unwrap(),
            kegg_organism: Some("Helicobacter pylori 26695".to_string()),
            rsat_info: species_info(false),
            go_taxonomy_id: None,
        };
        assert!(organism.is_prokaryote());
        assert!(!organism.is_eukaryote());
    }

    #[test]
    fn cog_organism_capitalizes_code() {
        let organism = Organism {
            code: "hpy".parse().unwrap(),
            kegg_organism: None,
            rsat_info: species_info(true),
            go_taxonomy_id: None,
        };
        assert_eq!(organism.cog_organism(), "Hpy");
    }
}

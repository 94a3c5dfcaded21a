use assert_matches::assert_matches;
use camino::Utf8PathBuf;

use orgmap::domain::OrganismCode;
use orgmap::error::OrgmapError;
use orgmap::rsat::{RsatClient, RsatOrganismMapper, SpeciesInfoResolver};

struct MockRsatClient {
    listing: String,
    descriptor: String,
    organism_names: String,
    features: String,
    feature_names: String,
}

impl MockRsatClient {
    fn prokaryote() -> Self {
        Self {
            listing: concat!(
                "<html><body>\n",
                "<a href=\"../\">Parent Directory</a>\n",
                "<a href=\"hpy/\">hpy/</a>\n",
                "<a href=\"sce/\">sce/</a>\n",
                "</body></html>\n"
            )
            .to_string(),
            descriptor: "-- taxonomy\nBacteria; Proteobacteria; Helicobacter\n".to_string(),
            organism_names: "-- names\n4711\tRSAT organism\n".to_string(),
            features: concat!(
                "-- features\n",
                "NP_206803.1\tCDS\tnusB\tNC_000915.1\t123\t456\n"
            )
            .to_string(),
            feature_names: concat!(
                "-- feature names\n",
                "NP_206803.1\tnusB\tprimary\n",
                "NP_206803.1\tHP0001\talternate\n"
            )
            .to_string(),
        }
    }

    fn eukaryote() -> Self {
        let mut mock = Self::prokaryote();
        mock.descriptor =
            "-- taxonomy\nEukaryota; Fungi; Ascomycota; Saccharomycetes\n".to_string();
        mock
    }
}

impl RsatClient for MockRsatClient {
    fn directory_html(&self) -> Result<String, OrgmapError> {
        Ok(self.listing.clone())
    }

    fn organism_descriptor(&self, _code: &OrganismCode) -> Result<String, OrgmapError> {
        Ok(self.descriptor.clone())
    }

    fn organism_names(&self, _code: &OrganismCode) -> Result<String, OrgmapError> {
        Ok(self.organism_names.clone())
    }

    fn features(&self, _code: &OrganismCode) -> Result<String, OrgmapError> {
        Ok(self.features.clone())
    }

    fn feature_names(&self, _code: &OrganismCode) -> Result<String, OrgmapError> {
        Ok(self.feature_names.clone())
    }

    fn cache_contig_sequence(
        &self,
        _code: &OrganismCode,
        contig: &str,
    ) -> Result<Utf8PathBuf, OrgmapError> {
        Ok(Utf8PathBuf::from(format!("/tmp/contigs/{contig}.raw")))
    }
}

#[test]
fn resolve_builds_full_species_info() {
    let mapper = RsatOrganismMapper::new(MockRsatClient::prokaryote());
    let code: OrganismCode = "hpy".parse().unwrap();

    let info = mapper.resolve(&code).unwrap();
    assert_eq!(info.species, "RSAT organism");
    assert!(!info.is_eukaryote);
    assert_eq!(info.taxonomy_id.as_ref().unwrap().as_str(), "4711");
    assert!(info.features.contains_key("NP_206803.1"));
    assert_eq!(info.contigs, vec!["NC_000915.1".to_string()]);
    assert_eq!(info.synonyms["HP0001"], "NP_206803.1");
    assert_eq!(info.synonyms["nusB"], "NP_206803.1");
}

#[test]
fn resolve_flags_eukaryotes() {
    let mapper = RsatOrganismMapper::new(MockRsatClient::eukaryote());
    let code: OrganismCode = "hpy".parse().unwrap();

    let info = mapper.resolve(&code).unwrap();
    assert!(info.is_eukaryote);
}

#[test]
fn resolve_rejects_code_absent_from_listing() {
    let mapper = RsatOrganismMapper::new(MockRsatClient::prokaryote());
    let code: OrganismCode = "xyz".parse().unwrap();

    let err = mapper.resolve(&code).unwrap_err();
    assert_matches!(err, OrgmapError::OrganismNotFound(_));
}

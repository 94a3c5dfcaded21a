use std::collections::HashMap;
use std::io::Read;
use std::thread;
use std::time::Duration;

use camino::Utf8PathBuf;
use flate2::read::GzDecoder;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::{Feature, OrganismCode, RsatSpeciesInfo, TaxonomyId};
use crate::error::OrgmapError;
use crate::store::Store;
use crate::table::DelimitedTable;

pub const DIR_PATH: &str = "data/genomes";
pub const ORGANISM_FILE: &str = "organism.tab";
pub const ORGANISM_NAMES_FILE: &str = "organism_names.tab";
pub const FEATURE_FILE: &str = "feature.tab";
pub const FEATURE_NAMES_FILE: &str = "feature_names.tab";

// RSAT .tab files use "--" for comment lines.
const RSAT_COMMENT: &str = "--";

pub trait RsatClient: Send + Sync {
    fn directory_html(&self) -> Result<String, OrgmapError>;
    fn organism_descriptor(&self, code: &OrganismCode) -> Result<String, OrgmapError>;
    fn organism_names(&self, code: &OrganismCode) -> Result<String, OrgmapError>;
    fn features(&self, code: &OrganismCode) -> Result<String, OrgmapError>;
    fn feature_names(&self, code: &OrganismCode) -> Result<String, OrgmapError>;
    fn cache_contig_sequence(
        &self,
        code: &OrganismCode,
        contig: &str,
    ) -> Result<Utf8PathBuf, OrgmapError>;
}

pub struct RsatHttpClient {
    client: Client,
    base_url: String,
    store: Store,
}

impl RsatHttpClient {
    pub fn new(base_url: impl Into<String>, store: Store) -> Result<Self, OrgmapError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("orgmap/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| OrgmapError::Filesystem(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| OrgmapError::RsatHttp(err.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            store,
        })
    }

    fn directory_url(&self) -> String {
        format!("{}/{}", self.base_url, DIR_PATH)
    }

    fn genome_url(&self, code: &OrganismCode, file_name: &str) -> String {
        format!("{}/{}/{}/genome/{}", self.base_url, DIR_PATH, code, file_name)
    }

    fn send_with_retries<F>(
        &self,
        mut make_req: F,
    ) -> Result<reqwest::blocking::Response, OrgmapError>
    where
        F: FnMut() -> reqwest::blocking::RequestBuilder,
    {
        const MAX_RETRIES: usize = 3;
        const BASE_DELAY_MS: u64 = 200;
        let mut attempt = 0usize;
        loop {
            let response = make_req().send();
            match response {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if attempt < MAX_RETRIES && is_retryable_status(status) {
                        let delay = BASE_DELAY_MS * (attempt as u64 + 1);
                        thread::sleep(Duration::from_millis(delay));
                        attempt += 1;
                        continue;
                    }
                    return Ok(resp);
                }
                Err(err) => {
                    if attempt < MAX_RETRIES && is_retryable_error(&err) {
                        let delay = BASE_DELAY_MS * (attempt as u64 + 1);
                        thread::sleep(Duration::from_millis(delay));
                        attempt += 1;
                        continue;
                    }
                    return Err(OrgmapError::RsatHttp(err.to_string()));
                }
            }
        }
    }

    fn fetch_text(&self, url: &str) -> Result<String, OrgmapError> {
        let response = self.send_with_retries(|| self.client.get(url))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "RSAT request failed".to_string());
            return Err(OrgmapError::RsatStatus { status, message });
        }
        if url.ends_with(".gz") {
            let bytes = response
                .bytes()
                .map_err(|err| OrgmapError::RsatHttp(err.to_string()))?;
            let mut decoder = GzDecoder::new(bytes.as_ref());
            let mut text = String::new();
            decoder
                .read_to_string(&mut text)
                .map_err(|err| OrgmapError::RsatHttp(err.to_string()))?;
            return Ok(text);
        }
        response
            .text()
            .map_err(|err| OrgmapError::RsatHttp(err.to_string()))
    }

    fn fetch_table(&self, code: &OrganismCode, file_name: &str) -> Result<String, OrgmapError> {
        let cache_path = self.store.table_path(code, file_name);
        if let Some(cached) = Store::read_cached(&cache_path)? {
            tracing::debug!(organism = %code, file = file_name, "rsat cache hit");
            return Ok(cached);
        }
        let url = self.genome_url(code, file_name);
        tracing::debug!(organism = %code, url = %url, "rsat fetch");
        let text = match self.fetch_text(&url) {
            // Newer RSAT mirrors only keep gzipped copies of the tab files.
            Err(OrgmapError::RsatStatus { status: 404, .. }) => {
                self.fetch_text(&format!("{url}.gz"))?
            }
            other => other?,
        };
        Store::write_bytes_atomic(&cache_path, text.as_bytes())?;
        self.store.record_fetch(code, &self.base_url, file_name)?;
        Ok(text)
    }
}

impl RsatClient for RsatHttpClient {
    fn directory_html(&self) -> Result<String, OrgmapError> {
        self.fetch_text(&self.directory_url())
    }

    fn organism_descriptor(&self, code: &OrganismCode) -> Result<String, OrgmapError> {
        self.fetch_table(code, ORGANISM_FILE)
    }

    fn organism_names(&self, code: &OrganismCode) -> Result<String, OrgmapError> {
        self.fetch_table(code, ORGANISM_NAMES_FILE)
    }

    fn features(&self, code: &OrganismCode) -> Result<String, OrgmapError> {
        self.fetch_table(code, FEATURE_FILE)
    }

    fn feature_names(&self, code: &OrganismCode) -> Result<String, OrgmapError> {
        self.fetch_table(code, FEATURE_NAMES_FILE)
    }

    fn cache_contig_sequence(
        &self,
        code: &OrganismCode,
        contig: &str,
    ) -> Result<Utf8PathBuf, OrgmapError> {
        let path = self.store.contig_path(code, contig);
        if path.as_std_path().exists() {
            return Ok(path);
        }
        let url = self.genome_url(code, &format!("{contig}.raw"));
        tracing::debug!(organism = %code, contig, "caching contig sequence");
        let text = self.fetch_text(&url)?;
        Store::write_bytes_atomic(&path, text.as_bytes())?;
        Ok(path)
    }
}

pub trait SpeciesInfoResolver: Send + Sync {
    fn resolve(&self, code: &OrganismCode) -> Result<RsatSpeciesInfo, OrgmapError>;
}

pub struct RsatOrganismMapper<C: RsatClient> {
    client: C,
}

impl<C: RsatClient> RsatOrganismMapper<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: RsatClient> SpeciesInfoResolver for RsatOrganismMapper<C> {
    fn resolve(&self, code: &OrganismCode) -> Result<RsatSpeciesInfo, OrgmapError> {
        let listing = parse_directory_listing(&self.client.directory_html()?);
        if !listing.iter().any(|entry| entry == code.as_str()) {
            return Err(OrgmapError::OrganismNotFound(code.as_str().to_string()));
        }

        let descriptor = self.client.organism_descriptor(code)?;
        let is_eukaryote = descriptor_is_eukaryote(&descriptor);
        let (taxonomy_id, species) = parse_organism_names(&self.client.organism_names(code)?)?;
        let (features, contigs) = parse_features(&self.client.features(code)?)?;
        let synonyms = parse_feature_names(&self.client.feature_names(code)?)?;

        Ok(RsatSpeciesInfo {
            species,
            is_eukaryote,
            taxonomy_id: Some(taxonomy_id),
            features,
            contigs,
            synonyms,
        })
    }
}

pub fn parse_directory_listing(html: &str) -> Vec<String> {
    let href = Regex::new(r#"<a\s+href="([^"/?]+)/""#).unwrap();
    href.captures_iter(html)
        .map(|caps| caps[1].to_string())
        .filter(|name| name != "..")
        .collect()
}

pub fn descriptor_is_eukaryote(descriptor: &str) -> bool {
    descriptor
        .lines()
        .flat_map(|line| line.split('\t'))
        .flat_map(|cell| cell.split(';'))
        .any(|field| field.trim().trim_end_matches('.') == "Eukaryota")
}

pub fn parse_organism_names(text: &str) -> Result<(TaxonomyId, String), OrgmapError> {
    let table = DelimitedTable::parse(text, '\t', false, Some(RSAT_COMMENT));
    let row = table
        .rows()
        .first()
        .ok_or_else(|| OrgmapError::RsatParse("organism_names.tab has no data rows".to_string()))?;
    if row.len() < 2 {
        return Err(OrgmapError::RsatParse(format!(
            "organism_names.tab row has {} fields, expected 2",
            row.len()
        )));
    }
    Ok((TaxonomyId::new(row[0].clone()), row[1].clone()))
}

pub fn parse_features(
    text: &str,
) -> Result<(HashMap<String, Feature>, Vec<String>), OrgmapError> {
    let table = DelimitedTable::parse(text, '\t', false, Some(RSAT_COMMENT));
    let mut features = HashMap::new();
    let mut contigs: Vec<String> = Vec::new();
    for row in table.rows() {
        if row.len() < 6 {
            return Err(OrgmapError::RsatParse(format!(
                "feature.tab row has {} fields, expected 6",
                row.len()
            )));
        }
        let start = row[4]
            .parse::<i64>()
            .map_err(|_| OrgmapError::RsatParse(format!("bad feature start: {}", row[4])))?;
        let end = row[5]
            .parse::<i64>()
            .map_err(|_| OrgmapError::RsatParse(format!("bad feature end: {}", row[5])))?;
        let contig = row[3].clone();
        if !contigs.iter().any(|known| known == &contig) {
            contigs.push(contig.clone());
        }
        features.insert(
            row[0].clone(),
            Feature {
                id: row[0].clone(),
                feature_type: row[1].clone(),
                name: row[2].clone(),
                contig,
                start,
                end,
            },
        );
    }
    Ok((features, contigs))
}

pub fn parse_feature_names(text: &str) -> Result<HashMap<String, String>, OrgmapError> {
    let table = DelimitedTable::parse(text, '\t', false, Some(RSAT_COMMENT));
    let mut synonyms = HashMap::new();
    for row in table.rows() {
        if row.len() < 2 {
            return Err(OrgmapError::RsatParse(format!(
                "feature_names.tab row has {} fields, expected 3",
                row.len()
            )));
        }
        // Every alternate name maps back to the primary accession, whatever
        // the name_class column says.
        synonyms.insert(row[1].clone(), row[0].clone());
    }
    Ok(synonyms)
}

fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

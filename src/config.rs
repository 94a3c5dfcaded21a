use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::OrgmapError;

pub const DEFAULT_RSAT_BASE_URL: &str = "http://networks.systemsbiology.net/rsat";
pub const DEFAULT_KEGG_TAXONOMY: &str = "KEGG_taxonomy";
pub const DEFAULT_PROTEOME2TAXID: &str = "proteome2taxid";

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub kegg_taxonomy: Option<String>,
    #[serde(default)]
    pub proteome2taxid: Option<String>,
    #[serde(default)]
    pub rsat_base_url: Option<String>,
    #[serde(default)]
    pub cache_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub kegg_taxonomy: PathBuf,
    pub proteome2taxid: PathBuf,
    pub rsat_base_url: String,
    pub cache_dir: Option<Utf8PathBuf>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, OrgmapError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("orgmap.json"),
        };

        if path.is_none() && !config_path.exists() {
            return Err(OrgmapError::MissingConfig);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| OrgmapError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| OrgmapError::ConfigParse(err.to_string()))?;

        Ok(Self::resolve_config(config))
    }

    pub fn resolve_config(config: Config) -> ResolvedConfig {
        ResolvedConfig {
            kegg_taxonomy: PathBuf::from(
                config
                    .kegg_taxonomy
                    .unwrap_or_else(|| DEFAULT_KEGG_TAXONOMY.to_string()),
            ),
            proteome2taxid: PathBuf::from(
                config
                    .proteome2taxid
                    .unwrap_or_else(|| DEFAULT_PROTEOME2TAXID.to_string()),
            ),
            rsat_base_url: config
                .rsat_base_url
                .unwrap_or_else(|| DEFAULT_RSAT_BASE_URL.to_string()),
            cache_dir: config.cache_dir.map(Utf8PathBuf::from),
        }
    }
}

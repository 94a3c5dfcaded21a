use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tempfile::Builder;

use crate::domain::OrganismCode;
use crate::error::OrgmapError;

#[derive(Debug, Clone)]
pub struct Store {
    cache_root: Utf8PathBuf,
}

impl Store {
    pub fn new() -> Result<Self, OrgmapError> {
        let cache_root = BaseDirs::new()
            .and_then(|dirs| {
                Utf8PathBuf::from_path_buf(dirs.home_dir().join(".cache").join("orgmap")).ok()
            })
            .ok_or_else(|| {
                OrgmapError::Filesystem("unable to resolve cache directory".to_string())
            })?;
        Ok(Self { cache_root })
    }

    pub fn new_with_root(cache_root: Utf8PathBuf) -> Self {
        Self { cache_root }
    }

    pub fn cache_root(&self) -> &Utf8Path {
        &self.cache_root
    }

    pub fn organism_dir(&self, code: &OrganismCode) -> Utf8PathBuf {
        self.cache_root.join("organisms").join(code.as_str())
    }

    pub fn table_path(&self, code: &OrganismCode, file_name: &str) -> Utf8PathBuf {
        self.organism_dir(code).join(file_name)
    }

    pub fn contig_path(&self, code: &OrganismCode, contig: &str) -> Utf8PathBuf {
        self.organism_dir(code)
            .join("contigs")
            .join(format!("{contig}.raw"))
    }

    pub fn manifest_path(&self, code: &OrganismCode) -> Utf8PathBuf {
        self.organism_dir(code).join("manifest.json")
    }

    pub fn read_cached(path: &Utf8Path) -> Result<Option<String>, OrgmapError> {
        if !path.as_std_path().exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path.as_std_path())
            .map_err(|err| OrgmapError::Filesystem(err.to_string()))?;
        Ok(Some(content))
    }

    pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), OrgmapError> {
        let parent = path
            .parent()
            .ok_or_else(|| OrgmapError::Filesystem("invalid cache path".to_string()))?;
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| OrgmapError::Filesystem(err.to_string()))?;
        let temp = Builder::new()
            .prefix("orgmap")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| OrgmapError::Filesystem(err.to_string()))?;
        fs::write(temp.path(), content).map_err(|err| OrgmapError::Filesystem(err.to_string()))?;
        if path.as_std_path().exists() {
            fs::remove_file(path.as_std_path())
                .map_err(|err| OrgmapError::Filesystem(err.to_string()))?;
        }
        temp.persist(path.as_std_path())
            .map_err(|err| OrgmapError::Filesystem(err.to_string()))?;
        Ok(())
    }

    pub fn record_fetch(
        &self,
        code: &OrganismCode,
        base_url: &str,
        file_name: &str,
    ) -> Result<(), OrgmapError> {
        let path = self.manifest_path(code);
        let mut manifest = Self::read_manifest(&path)?.unwrap_or_else(|| Manifest {
            organism: code.as_str().to_string(),
            base_url: base_url.to_string(),
            fetched_at: String::new(),
            files: Vec::new(),
        });
        if !manifest.files.iter().any(|name| name == file_name) {
            manifest.files.push(file_name.to_string());
        }
        manifest.base_url = base_url.to_string();
        manifest.fetched_at = chrono::Utc::now().to_rfc3339();
        let content = serde_json::to_vec_pretty(&manifest)
            .map_err(|err| OrgmapError::Filesystem(err.to_string()))?;
        Self::write_bytes_atomic(&path, &content)
    }

    pub fn read_manifest(path: &Utf8Path) -> Result<Option<Manifest>, OrgmapError> {
        let Some(content) = Self::read_cached(path)? else {
            return Ok(None);
        };
        let manifest = serde_json::from_str(&content)
            .map_err(|err| OrgmapError::Filesystem(err.to_string()))?;
        Ok(Some(manifest))
    }

    pub fn clear(&self) -> Result<(), OrgmapError> {
        if self.cache_root.as_std_path().exists() {
            fs::remove_dir_all(self.cache_root.as_std_path())
                .map_err(|err| OrgmapError::Filesystem(err.to_string()))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub organism: String,
    pub base_url: String,
    pub fetched_at: String,
    pub files: Vec<String>,
}

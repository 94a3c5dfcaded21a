use std::fs;
use std::path::Path;

use crate::error::OrgmapError;

#[derive(Debug, Clone)]
pub struct DelimitedTable {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl DelimitedTable {
    pub fn parse(text: &str, sep: char, has_header: bool, comment: Option<&str>) -> Self {
        let mut header = None;
        let mut rows = Vec::new();
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            if let Some(prefix) = comment {
                if line.starts_with(prefix) {
                    continue;
                }
            }
            let fields: Vec<String> = line.split(sep).map(|field| field.to_string()).collect();
            if has_header && header.is_none() {
                header = Some(fields);
                continue;
            }
            rows.push(fields);
        }
        Self { header, rows }
    }

    pub fn read(
        path: &Path,
        sep: char,
        has_header: bool,
        comment: Option<&str>,
    ) -> Result<Self, OrgmapError> {
        let text = fs::read_to_string(path)
            .map_err(|_| OrgmapError::TableRead(path.to_path_buf()))?;
        Ok(Self::parse(&text, sep, has_header, comment))
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header
            .as_ref()
            .and_then(|fields| fields.iter().position(|field| field == name))
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

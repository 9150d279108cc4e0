//! Directory-backed record cache.
//!
//! Built once from a directory scan at provider construction; lookups are
//! plain map hits afterwards. `rebuild` on the provider re-scans on demand
//! (e.g. after the corpus on disk changes) instead of relying on
//! process-lifetime globals.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::data::loader::{normalize_keys, normalize_name};
use crate::error::EngineError;

pub struct RecordCache<T> {
    records: HashMap<String, T>,
    names: Vec<String>,
}

impl<T: Clone> RecordCache<T> {
    /// Scan `dir` and parse every `*.json` file. A missing directory yields
    /// an empty cache (absent data is not fatal); an unreadable or
    /// malformed file is.
    pub fn load_dir(
        dir: &Path,
        label: &str,
        parse: impl Fn(&Value, &str) -> T,
    ) -> Result<Self, EngineError> {
        let mut records = HashMap::new();
        let mut names = Vec::new();

        if !dir.is_dir() {
            warn!(dir = %dir.display(), label, "data directory missing, cache is empty");
            return Ok(Self { records, names });
        }

        let entries = fs::read_dir(dir).map_err(|source| EngineError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| EngineError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_owned();

            let text = fs::read_to_string(&path).map_err(|source| EngineError::Io {
                path: path.clone(),
                source,
            })?;
            let value: Value = serde_json::from_str(&text).map_err(|source| EngineError::Json {
                path: path.clone(),
                source,
            })?;
            let value = normalize_keys(value);
            let name = value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(&stem)
                .to_owned();
            let record = parse(&value, &stem);

            // Index under both the record name and the file stem so either
            // spelling resolves.
            let stem_key = normalize_name(&stem);
            let name_key = normalize_name(&name);
            if name_key != stem_key {
                records.insert(name_key, record.clone());
            }
            records.insert(stem_key, record);
            names.push(name);
        }

        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
        debug!(label, count = names.len(), "record cache built");
        Ok(Self { records, names })
    }

    /// Case-insensitive lookup by record name or file stem.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.records.get(&normalize_name(name))
    }

    /// All record names, sorted case-insensitively.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

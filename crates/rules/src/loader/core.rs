//! Core [`TableLoader`] struct: filesystem-backed table definition loading.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::schema::{DateForShards, TableConfig, TableFile};

use super::error::{LoadResult, LoadStatus, LoaderError, Result};

/// Filesystem-backed table definition loader.
///
/// `path` may name a single YAML file or a directory, which is scanned
/// recursively. Definitions are kept in load order; a definition whose
/// qualified template was already loaded is ignored with a warning.
pub struct TableLoader {
    /// File or directory containing table definition YAML files.
    path: PathBuf,
    /// Loaded definitions in load order.
    tables: Vec<TableConfig>,
    /// Qualified templates already loaded.
    seen: HashSet<String>,
}

impl TableLoader {
    /// Create a new loader for the given file or directory.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            tables: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Load every definition file under the configured path.
    ///
    /// Dotfiles and non-YAML files are skipped. Parse errors are reported
    /// per-file but do not abort the scan. A missing path is an error.
    /// Directory entries are visited in file-name order.
    pub fn load_all(&mut self) -> Result<Vec<LoadResult>> {
        let mut results = Vec::new();
        let root = self.path.clone();
        if root.is_file() {
            self.load_into(&root, &mut results);
        } else if root.is_dir() {
            self.scan_dir_recursive(&root, &mut results)?;
        } else {
            return Err(LoaderError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("table definitions not found at {}", root.display()),
            )));
        }
        Ok(results)
    }

    /// Recursively scan a directory for YAML definition files.
    fn scan_dir_recursive(&mut self, dir: &Path, results: &mut Vec<LoadResult>) -> Result<()> {
        let mut paths = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.sort();

        for path in paths {
            // Skip dotfiles/dotdirs
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    if path.is_file() {
                        results.push(LoadResult {
                            path,
                            status: LoadStatus::Skipped {
                                reason: "dotfile".to_string(),
                            },
                        });
                    }
                    continue;
                }
            }

            if path.is_dir() {
                self.scan_dir_recursive(&path, results)?;
                continue;
            }

            if !is_yaml(&path) {
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Skipped {
                        reason: "not a YAML file".to_string(),
                    },
                });
                continue;
            }

            self.load_into(&path, results);
        }

        Ok(())
    }

    /// Load one file, record its outcome, and keep its new definitions.
    fn load_into(&mut self, path: &Path, results: &mut Vec<LoadResult>) {
        match self.load_file(path) {
            Ok(tables) => {
                let added = self.insert_tables(path, tables);
                info!(path = %path.display(), tables = added, "loaded table definitions");
                results.push(LoadResult {
                    path: path.to_path_buf(),
                    status: LoadStatus::Loaded { tables: added },
                });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load table definitions");
                results.push(LoadResult {
                    path: path.to_path_buf(),
                    status: LoadStatus::Failed {
                        error: e.to_string(),
                    },
                });
            }
        }
    }

    fn insert_tables(&mut self, path: &Path, tables: Vec<TableConfig>) -> usize {
        let mut added = 0;
        for tc in tables {
            let id = tc.template_id();
            if !self.seen.insert(id.clone()) {
                warn!(table = %id, path = %path.display(), "duplicate table definition ignored");
                continue;
            }
            self.tables.push(tc);
            added += 1;
        }
        added
    }

    /// Parse and validate a single definition file.
    ///
    /// Empty table names fail the whole file. Unrecognized shard policies are
    /// accepted (they resolve to the bare template) and logged.
    pub fn load_file(&self, path: &Path) -> Result<Vec<TableConfig>> {
        let contents = fs::read_to_string(path)?;
        let file: TableFile = serde_yaml::from_str(&contents)?;

        for (index, tc) in file.tables.iter().enumerate() {
            if tc.table.trim().is_empty() {
                return Err(LoaderError::Validation(format!(
                    "tables[{}]: table name must not be empty",
                    index
                )));
            }
            if let DateForShards::Unrecognized(raw) = &tc.date_for_shards {
                warn!(
                    table = %tc.template_id(),
                    date_for_shards = %raw,
                    "unrecognized date_for_shards, treating table as unsharded"
                );
            }
        }

        Ok(file.tables)
    }

    /// Get the configured path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loaded definitions in load order.
    pub fn tables(&self) -> &[TableConfig] {
        &self.tables
    }

    /// Take ownership of the loaded definitions.
    pub fn into_tables(self) -> Vec<TableConfig> {
        self.tables
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "yml" || e == "yaml")
        .unwrap_or(false)
}

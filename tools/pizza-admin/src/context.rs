//! CLI execution context.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use pizza_api::AdminReports;
use pizza_store::{Documents, FileStore};

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Reports over the document store.
    pub reports: AdminReports,
    /// Output handler.
    pub output: Output,
    /// Document store root.
    pub data_dir: PathBuf,
}

impl Context {
    /// Open the document store under `data_dir`, relative to the working
    /// directory unless absolute.
    pub fn load(data_dir: &str, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let data_dir = resolve_path(&cwd, data_dir);

        if !data_dir.exists() {
            output.warn(&format!(
                "Data directory {} does not exist yet",
                data_dir.display()
            ));
        }
        output.debug(&format!("Using data directory {}", data_dir.display()));

        let store = Arc::new(FileStore::new(data_dir.clone()));
        Ok(Self {
            reports: AdminReports::new(Documents::new(store)),
            output,
            data_dir,
        })
    }
}

/// Resolve a path relative to `cwd`.
pub fn resolve_path(cwd: &std::path::Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        let cwd = std::path::Path::new("/srv/pizza");
        assert_eq!(resolve_path(cwd, ".data"), PathBuf::from("/srv/pizza/.data"));
        assert_eq!(resolve_path(cwd, "/var/lib/pizza"), PathBuf::from("/var/lib/pizza"));
    }
}

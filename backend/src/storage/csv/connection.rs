use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const ENTRIES_FILE_NAME: &str = "milk_entries.csv";

/// CsvConnection owns the data directory the ledger files live in
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            info!("Creating data directory {}", base_path.display());
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn entries_file_path(&self) -> PathBuf {
        self.base_directory.join(ENTRIES_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("ledger").join("data");

        let connection = CsvConnection::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(connection.base_directory(), nested.as_path());
        assert_eq!(connection.entries_file_path(), nested.join("milk_entries.csv"));
    }
}

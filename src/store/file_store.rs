use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{BalanceStore, StoreError, format_balance, is_valid_balance, parse_balance};

/// Keeps the balance as plain decimal text in a single file.
///
/// Every save rewrites the whole file. Two processes sharing the same path
/// race each other, the last writer wins.
#[derive(Debug, Clone)]
pub struct FileBalanceStore {
    path: PathBuf,
}

impl FileBalanceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BalanceStore for FileBalanceStore {
    fn load(&mut self) -> Result<Option<f64>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted balance");
                return Ok(None);
            }
            Err(err) => return Err(StoreError::Persistence(err)),
        };
        parse_balance(&content).map(Some)
    }

    fn save(&mut self, balance: f64) -> Result<(), StoreError> {
        if !is_valid_balance(balance) {
            return Err(StoreError::InvalidBalance { balance });
        }
        fs::write(&self.path, format_balance(balance))?;
        debug!(path = %self.path.display(), balance, "balance persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_has_no_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBalanceStore::new(dir.path().join("balance.txt"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_overwrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balance.txt");
        let mut store = FileBalanceStore::new(&path);

        store.save(123456.75).unwrap();
        store.save(3.5).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "3.5");
        assert_eq!(store.load().unwrap(), Some(3.5));
    }

    #[test]
    fn corrupt_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balance.txt");
        fs::write(&path, "one thousand").unwrap();

        let err = FileBalanceStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::CorruptState { content } if content == "one thousand"));
    }

    #[test]
    fn refuse_to_save_unloadable_balance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balance.txt");
        let mut store = FileBalanceStore::new(&path);
        store.save(20.0).unwrap();

        for balance in [f64::INFINITY, f64::NAN, -1.0] {
            let err = store.save(balance).unwrap_err();
            assert!(matches!(err, StoreError::InvalidBalance { .. }));
        }
        // previous value stays readable
        assert_eq!(store.load().unwrap(), Some(20.0));
    }

    #[test]
    fn unwritable_location_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        // parent directory doesn't exist
        let mut store = FileBalanceStore::new(dir.path().join("missing").join("balance.txt"));
        let err = store.save(10.0).unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
    }
}

use crate::error::StorageError;
use crate::series::SeriesStore;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Loads and saves the whole `SeriesStore` as one JSON document.
///
/// There is no locking and no partial load: the last `save` wins, and a write
/// interrupted half-way leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct SeriesRepository {
    path: PathBuf,
}

impl SeriesRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing file is an empty store, not an error.
    pub fn load(&self) -> Result<SeriesStore, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = ?self.path, "Data file not found, starting with an empty store.");
                return Ok(SeriesStore::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let store: SeriesStore = serde_json::from_reader(BufReader::new(file))?;
        tracing::info!(path = ?self.path, lists = store.len(), "Loaded GDP data.");
        Ok(store)
    }

    /// Overwrites the document with the full contents of `store`.
    pub fn save(&self, store: &SeriesStore) -> Result<(), StorageError> {
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, store)?;
        writer.flush().map_err(|e| self.io_error(e))?;

        tracing::info!(path = ?self.path, lists = store.len(), "Saved GDP data.");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io { path: self.path.clone(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::GdpComponents;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_empty_store() {
        let dir = TempDir::new().unwrap();
        let repo = SeriesRepository::new(dir.path().join("gdp_data.json"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let repo = SeriesRepository::new(dir.path().join("gdp_data.json"));

        let mut store = SeriesStore::new();
        store.add_entry("usa", "2020", GdpComponents::new(dec!(100), dec!(50), dec!(30), dec!(-10)));
        store.add_entry("usa", "2019", GdpComponents::new(dec!(95.5), dec!(48), dec!(29.25), dec!(-8)));
        store.add_entry("japan", "2020", GdpComponents::new(dec!(60), dec!(20), dec!(15), dec!(2.5)));

        repo.save(&store).unwrap();
        assert_eq!(repo.load().unwrap(), store);
    }

    #[test]
    fn long_precision_components_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let repo = SeriesRepository::new(dir.path().join("gdp_data.json"));

        let mut store = SeriesStore::new();
        store.add_entry(
            "usa",
            "2020",
            GdpComponents::new(dec!(1234567890.123456789), dec!(1), dec!(1), dec!(-0.333333333333333333)),
        );
        repo.save(&store).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, store);
        assert_eq!(
            loaded.get("usa").unwrap()[0].components().consumption.to_string(),
            "1234567890.123456789"
        );
    }

    #[test]
    fn save_overwrites_the_previous_document() {
        let dir = TempDir::new().unwrap();
        let repo = SeriesRepository::new(dir.path().join("gdp_data.json"));

        let mut first = SeriesStore::new();
        first.add_entry("old", "2000", GdpComponents::new(dec!(1), dec!(1), dec!(1), dec!(1)));
        repo.save(&first).unwrap();

        let mut second = SeriesStore::new();
        second.add_entry("new", "2001", GdpComponents::new(dec!(2), dec!(2), dec!(2), dec!(2)));
        repo.save(&second).unwrap();

        assert_eq!(repo.load().unwrap().list_names(), vec!["new"]);
    }

    #[test]
    fn malformed_document_is_a_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gdp_data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SeriesRepository::new(path).load().unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }
}

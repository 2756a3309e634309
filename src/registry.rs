use std::path::{Path, PathBuf};

use crate::error::BikeshareError;
use crate::filter::City;

/// Maps each city to its trip dataset inside a data directory.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    base_path: PathBuf,
}

impl DatasetRegistry {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn file_name(city: City) -> &'static str {
        match city {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Path of the city's dataset, whether or not it exists.
    pub fn path_for(&self, city: City) -> PathBuf {
        self.base_path.join(Self::file_name(city))
    }

    /// Path of the city's dataset, failing if it is not a readable file.
    pub fn resolve(&self, city: City) -> Result<PathBuf, BikeshareError> {
        let path = self.path_for(city);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(BikeshareError::DatasetNotFound {
                path,
                reason: "not a regular file".to_string(),
            }),
            Err(e) => Err(BikeshareError::DatasetNotFound {
                path,
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_existing_dataset() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("new_york_city.csv"), "Start Time\n").unwrap();

        let registry = DatasetRegistry::new(dir.path());
        let path = registry.resolve(City::NewYorkCity).unwrap();

        assert_eq!(path, dir.path().join("new_york_city.csv"));
    }

    #[test]
    fn test_resolve_missing_dataset() {
        let dir = tempdir().unwrap();
        let registry = DatasetRegistry::new(dir.path());

        let result = registry.resolve(City::Washington);

        match result {
            Err(BikeshareError::DatasetNotFound { path, .. }) => {
                assert_eq!(path, dir.path().join("washington.csv"))
            }
            other => panic!("expected DatasetNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_rejects_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("chicago.csv")).unwrap();
        let registry = DatasetRegistry::new(dir.path());

        assert!(matches!(
            registry.resolve(City::Chicago),
            Err(BikeshareError::DatasetNotFound { .. })
        ));
    }
}

//! File persistence for fitted model artifacts.
//!
//! Artifacts are stored as JSON via serde. Writes go through a temp file and
//! a rename so a crashed trainer never leaves a half-written model behind.

use crate::domain::errors::{ModelLoadError, TrainingError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads and writes a single model artifact file.
#[derive(Debug, Clone)]
pub struct ModelStore {
    file_path: PathBuf,
}

impl ModelStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads and deserializes the artifact.
    pub fn load<M: DeserializeOwned>(&self) -> Result<M, ModelLoadError> {
        let content = fs::read(&self.file_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ModelLoadError::NotFound {
                path: self.file_path.clone(),
            },
            _ => ModelLoadError::Io {
                path: self.file_path.clone(),
                source: e,
            },
        })?;

        let model = serde_json::from_slice(&content).map_err(|e| ModelLoadError::Corrupt {
            path: self.file_path.clone(),
            reason: e.to_string(),
        })?;

        info!("Loaded model artifact from {:?}", self.file_path);
        Ok(model)
    }

    /// Serializes and saves the artifact, replacing any previous file.
    pub fn save<M: Serialize>(&self, model: &M) -> Result<(), TrainingError> {
        let persist_err = |reason: String| TrainingError::Persist {
            path: self.file_path.clone(),
            reason,
        };

        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| persist_err(e.to_string()))?;
        }

        let content = serde_json::to_vec(model).map_err(|e| persist_err(e.to_string()))?;

        let temp_path = self.file_path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(|e| persist_err(e.to_string()))?;
        fs::rename(&temp_path, &self.file_path).map_err(|e| persist_err(e.to_string()))?;

        info!("Saved model artifact to {:?}", self.file_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Coefficients {
        intercept: f64,
        weights: Vec<f64>,
    }

    fn create_test_dir() -> PathBuf {
        let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "silverline_test_{}_{}_store",
            std::process::id(),
            unique_id
        ));
        fs::create_dir_all(&temp_dir).expect("Failed to create test temp dir");
        temp_dir
    }

    #[test]
    fn test_load_missing_file() {
        let dir = create_test_dir();
        let store = ModelStore::new(dir.join("absent.json"));

        let err = store.load::<Coefficients>().unwrap_err();
        assert!(matches!(err, ModelLoadError::NotFound { .. }));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = create_test_dir();
        let path = dir.join("model.json");
        fs::write(&path, b"{\"intercept\": 1.0, \"weig").unwrap();

        let err = ModelStore::new(&path).load::<Coefficients>().unwrap_err();
        assert!(matches!(err, ModelLoadError::Corrupt { .. }));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = create_test_dir();
        let store = ModelStore::new(dir.join("nested").join("model.json"));
        let model = Coefficients {
            intercept: -12.5,
            weights: vec![0.01, 0.5],
        };

        store.save(&model).unwrap();
        assert!(!store.path().with_extension("tmp").exists());
        assert_eq!(store.load::<Coefficients>().unwrap(), model);
        fs::remove_dir_all(dir).ok();
    }
}

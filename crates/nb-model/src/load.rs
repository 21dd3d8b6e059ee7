//! Model document loading.
//!
//! Loading performs no validation beyond parsing: a document that is
//! well-formed JSON but sparse or partially specified loads successfully
//! and degrades at scoring time through the epsilon floor. Only an
//! unreachable or unparsable document is an error.

use crate::document::Model;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a model document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no model document found; pass --model, set NBAYES_MODEL, or install model.json in the config directory")]
    NoModel,

    #[error("model file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in model document: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

/// A loaded model with its provenance.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    /// The parsed model.
    pub model: Model,
    /// Path the document was read from.
    pub path: PathBuf,
    /// SHA-256 hash of the raw document content.
    pub hash: String,
}

impl Model {
    /// Parse a model document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Model, LoadError> {
        serde_json::from_str(text).map_err(|source| LoadError::Parse { source })
    }

    /// Parse a model document from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Model, LoadError> {
        serde_json::from_reader(reader).map_err(|source| LoadError::Parse { source })
    }
}

/// Load a model document from a file, recording its content hash.
pub fn load_model(path: &Path) -> Result<LoadedModel, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let hash = compute_hash(&content);
    let model = Model::from_json_str(&content)?;
    Ok(LoadedModel {
        model,
        path: path.to_path_buf(),
        hash,
    })
}

/// SHA-256 hash of document content, hex-encoded.
fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

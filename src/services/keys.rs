//! Public key material used to verify access tokens.
use std::{
    fmt,
    path::{Path, PathBuf},
};

use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("error in reading the key file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Hands out the current public key (PEM bytes).
///
/// Called once per decision, so implementations decide whether to cache,
/// reload or rotate. Returning `Err` denies the request (fail-closed).
pub trait KeyProvider: Send + Sync {
    fn public_key(&self) -> Result<Vec<u8>, KeyError>;
}

/// Key bytes held in memory.
#[derive(Clone)]
pub struct StaticKeyProvider {
    pem: Vec<u8>,
}

impl StaticKeyProvider {
    pub fn new(pem: impl Into<Vec<u8>>) -> Self {
        Self { pem: pem.into() }
    }

    /// Read the file once and keep its contents.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KeyError> {
        Ok(Self::new(read_key_file(path.as_ref())?))
    }
}

impl fmt::Debug for StaticKeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("StaticKeyProvider")
            .field("len", &self.pem.len())
            .finish()
    }
}

impl KeyProvider for StaticKeyProvider {
    fn public_key(&self) -> Result<Vec<u8>, KeyError> {
        Ok(self.pem.clone())
    }
}

/// Re-reads the key file on every call, so a replaced file is picked up immediately.
#[derive(Debug, Clone)]
pub struct FileKeyProvider {
    path: PathBuf,
}

impl FileKeyProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KeyProvider for FileKeyProvider {
    fn public_key(&self) -> Result<Vec<u8>, KeyError> {
        read_key_file(&self.path)
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyError> {
    std::fs::read(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "error in reading the key file");
        KeyError::Read {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

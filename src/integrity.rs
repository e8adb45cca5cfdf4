//! Artifact content hashing
//!
//! Fingerprints the cached artifact for update checks and validates
//! freshly downloaded bytes against the hash the server declared.

use crate::error::{BotstrapError, BotstrapResult};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs;

/// SHA-256 of a byte slice as lowercase hex
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// SHA-256 of a file's full contents as lowercase hex.
///
/// Returns `Ok(None)` when the file does not exist; a missing artifact
/// is an expected state, not an error.
pub async fn compute_hash(path: &Path) -> BotstrapResult<Option<String>> {
    let contents = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(BotstrapError::io(
                format!("reading artifact {}", path.display()),
                e,
            ))
        }
    };

    Ok(Some(hash_bytes(&contents)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn hash_bytes_known_vector() {
        // SHA-256 of the empty input
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hash_bytes_deterministic() {
        let a = hash_bytes(b"bot source");
        let b = hash_bytes(b"bot source");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn compute_hash_matches_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bot.js");
        tokio::fs::write(&path, b"console.log('hi')").await.unwrap();

        let from_file = compute_hash(&path).await.unwrap().unwrap();
        assert_eq!(from_file, hash_bytes(b"console.log('hi')"));
    }

    #[tokio::test]
    async fn compute_hash_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let result = compute_hash(&dir.path().join("absent.js")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn compute_hash_stable_across_calls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bot.js");
        tokio::fs::write(&path, b"same bytes").await.unwrap();

        let first = compute_hash(&path).await.unwrap();
        let second = compute_hash(&path).await.unwrap();
        assert_eq!(first, second);
    }
}

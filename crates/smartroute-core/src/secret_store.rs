use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use keyring::Entry;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::config_directory;

const SERVICE_NAME: &str = "com.smartroute.app";
const MASTER_KEY_FILE: &str = "secret.key";
const ACCOUNT_PREFIX: &str = "smartroute-";
const FALLBACK_DIR: &str = "secrets";
const FALLBACK_EXTENSION: &str = ".json";

#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error("keyring operation failed: {0}")]
    Keyring(String),
    #[error("local encryption failed: {0}")]
    Crypto(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("serialization error: {0}")]
    Serde(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct FallbackSecret {
    nonce: String,
    ciphertext: String,
}

fn fallback_secret_path(label: &str) -> PathBuf {
    config_directory()
        .join(FALLBACK_DIR)
        .join(format!("{label}{FALLBACK_EXTENSION}"))
}

fn store_fallback_secret(label: &str, secret: &str) -> Result<(), SecretStoreError> {
    let (nonce, ciphertext) = encrypt_with_local_key(secret.as_bytes())?;
    let payload = FallbackSecret {
        nonce: STANDARD.encode(nonce),
        ciphertext: STANDARD.encode(ciphertext),
    };

    let path = fallback_secret_path(label);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let encoded =
        serde_json::to_string(&payload).map_err(|err| SecretStoreError::Serde(err.to_string()))?;
    fs::write(path, encoded)?;
    Ok(())
}

fn load_fallback_secret(label: &str) -> Result<Option<String>, SecretStoreError> {
    let path = fallback_secret_path(label);
    let raw = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) => match err.kind() {
            io::ErrorKind::NotFound => return Ok(None),
            _ => return Err(SecretStoreError::Io(err)),
        },
    };

    let payload: FallbackSecret =
        serde_json::from_str(&raw).map_err(|err| SecretStoreError::Serde(err.to_string()))?;
    let nonce_bytes = STANDARD.decode(payload.nonce)?;
    let cipher_bytes = STANDARD.decode(payload.ciphertext)?;
    let plaintext = decrypt_with_local_key(&nonce_bytes, &cipher_bytes)?;
    Ok(Some(String::from_utf8_lossy(&plaintext).to_string()))
}

fn delete_fallback_secret(label: &str) -> Result<(), SecretStoreError> {
    let path = fallback_secret_path(label);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(err) => match err.kind() {
            io::ErrorKind::NotFound => Ok(()),
            _ => Err(SecretStoreError::Io(err)),
        },
    }
}

/// Persist a secret under `label` using the most secure backend available.
///
/// The OS keyring is tried first; when the keyring is unavailable the secret
/// is encrypted with the local master key and written under the config
/// directory instead.
pub fn store_secret(label: &str, secret: &str) -> Result<(), SecretStoreError> {
    let trimmed = secret.trim();
    if trimmed.is_empty() {
        return Err(SecretStoreError::Crypto(
            "cannot store empty secret".to_string(),
        ));
    }

    let account = format!("{ACCOUNT_PREFIX}{label}");
    match Entry::new(SERVICE_NAME, &account) {
        Ok(entry) => match entry.set_password(trimmed) {
            Ok(()) => return Ok(()),
            Err(err) => {
                warn!(label, %err, "keyring set_password failed; falling back to local encryption");
            }
        },
        Err(err) => {
            warn!(label, %err, "keyring unavailable; falling back to local encryption");
        }
    }

    store_fallback_secret(label, trimmed)
}

/// Retrieve the secret stored under `label`, if any.
pub fn load_secret(label: &str) -> Result<Option<String>, SecretStoreError> {
    let account = format!("{ACCOUNT_PREFIX}{label}");
    match Entry::new(SERVICE_NAME, &account) {
        Ok(entry) => match entry.get_password() {
            Ok(value) if !value.trim().is_empty() => return Ok(Some(value)),
            Ok(_) | Err(keyring::Error::NoEntry) => {}
            Err(err) => {
                warn!(label, %err, "keyring get_password failed; trying encrypted fallback");
            }
        },
        Err(err) => {
            warn!(label, %err, "keyring unavailable; trying encrypted fallback");
        }
    }

    load_fallback_secret(label)
}

/// Remove the secret stored under `label` from every backing store.
pub fn delete_secret(label: &str) -> Result<(), SecretStoreError> {
    let account = format!("{ACCOUNT_PREFIX}{label}");
    match Entry::new(SERVICE_NAME, &account) {
        Ok(entry) => match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => (),
            Err(err) => return Err(SecretStoreError::Keyring(err.to_string())),
        },
        Err(err) => {
            warn!(label, %err, "keyring unavailable while deleting secret");
        }
    }
    delete_fallback_secret(label)
}

fn encrypt_with_local_key(plaintext: &[u8]) -> Result<([u8; 12], Vec<u8>), SecretStoreError> {
    let key = get_or_create_master_key()?;
    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|err| SecretStoreError::Crypto(err.to_string()))?;

    let mut nonce_bytes = [0u8; 12];
    let mut rng = rand::rng();
    rng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from(nonce_bytes);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|err| SecretStoreError::Crypto(err.to_string()))?;
    Ok((nonce_bytes, ciphertext))
}

fn decrypt_with_local_key(nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, SecretStoreError> {
    if nonce.len() != 12 {
        return Err(SecretStoreError::Crypto(
            "invalid nonce length for chacha20poly1305".to_string(),
        ));
    }
    let key = get_or_create_master_key()?;
    let cipher = ChaCha20Poly1305::new_from_slice(&key)
        .map_err(|err| SecretStoreError::Crypto(err.to_string()))?;
    let mut nonce_array = [0u8; 12];
    nonce_array.copy_from_slice(nonce);
    let nonce = Nonce::from(nonce_array);
    cipher
        .decrypt(&nonce, ciphertext)
        .map_err(|err| SecretStoreError::Crypto(err.to_string()))
}

fn get_or_create_master_key() -> Result<[u8; 32], SecretStoreError> {
    let path = master_key_path();
    if path.exists() {
        let bytes = fs::read(&path)?;
        if bytes.len() == 32 {
            let mut key = [0u8; 32];
            key.copy_from_slice(&bytes);
            return Ok(key);
        }
        warn!(
            path = %path.display(),
            length = bytes.len(),
            "master key had unexpected length; regenerating"
        );
    }

    let mut key = [0u8; 32];
    let mut rng = rand::rng();
    rng.fill_bytes(&mut key);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_key_file(&path, &key)?;
    Ok(key)
}

fn write_key_file(path: &PathBuf, key: &[u8]) -> Result<(), SecretStoreError> {
    let mut file = fs::File::create(path)?;
    file.write_all(key)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

fn master_key_path() -> PathBuf {
    config_directory().join(MASTER_KEY_FILE)
}

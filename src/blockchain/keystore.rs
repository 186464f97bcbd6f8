//! Keystore directory management.
//!
//! # Security
//! - Passwords are never logged or stored
//! - Private keys only exist on disk in encrypted keystore form

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use alloy::signers::local::PrivateKeySigner;
use serde_json::Value;

use crate::blockchain::types::{BlockchainError, BlockchainResult, WalletDescriptor};

const SHORT_ADDRESS_CHARS: usize = 5;

/// Directory of encrypted JSON keystore files.
#[derive(Debug, Clone)]
pub struct Keystore {
    dir: PathBuf,
}

impl Keystore {
    /// Open the keystore at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> BlockchainResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Generate a new key, encrypt it with `password` and describe the file.
    pub fn create(&self, password: &str) -> BlockchainResult<WalletDescriptor> {
        let (signer, generated_name) =
            PrivateKeySigner::new_keystore(&self.dir, &mut rand::thread_rng(), password, None)
                .map_err(|e| BlockchainError::Wallet(e.to_string()))?;

        let address = alloy::hex::encode(signer.address());
        let created = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let path = self.dir.join(format!("UTC--{}--{}.json", created, address));
        finalize_keystore(&self.dir.join(&generated_name), &path)?;

        tracing::info!(address = %signer.address(), path = %path.display(), "Wallet created");
        descriptor_from_file(&path)
    }

    /// Describe every `*.json` keystore file, ordered by file name.
    ///
    /// Files that cannot be read as keystores are logged and skipped.
    pub fn list(&self) -> BlockchainResult<Vec<WalletDescriptor>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut wallets = Vec::with_capacity(paths.len());
        for path in paths {
            match descriptor_from_file(&path) {
                Ok(descriptor) => wallets.push(descriptor),
                Err(e) => tracing::error!(error = %e, "Skipping keystore file"),
            }
        }
        Ok(wallets)
    }
}

/// Build a descriptor from a keystore file's `address` field.
pub fn descriptor_from_file(path: &Path) -> BlockchainResult<WalletDescriptor> {
    let keystore_error = |reason: String| BlockchainError::Keystore {
        path: path.display().to_string(),
        reason,
    };

    let contents = fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&contents).map_err(|e| keystore_error(e.to_string()))?;
    let raw = json
        .get("address")
        .and_then(Value::as_str)
        .ok_or_else(|| keystore_error("missing \"address\" field".to_string()))?;

    let hex = raw.strip_prefix("0x").unwrap_or(raw);
    if hex.len() < SHORT_ADDRESS_CHARS * 2 || !hex.is_ascii() {
        return Err(keystore_error(format!("malformed address '{}'", raw)));
    }

    let file_path = fs::canonicalize(path)?;
    Ok(WalletDescriptor {
        address: format!("0x{}", hex),
        short_address: format!(
            "0x{}...{}",
            &hex[..SHORT_ADDRESS_CHARS],
            &hex[hex.len() - SHORT_ADDRESS_CHARS..]
        ),
        file_path: file_path.display().to_string(),
    })
}

/// Move a freshly written keystore from `from` to its final `.json` name.
///
/// On failure the key stays at `from`; the error names that path.
fn finalize_keystore(from: &Path, to: &Path) -> BlockchainResult<()> {
    fs::rename(from, to).map_err(|e| {
        tracing::warn!(
            orphaned = %from.display(),
            target = %to.display(),
            error = %e,
            "Keystore written but not renamed; key remains at orphaned path"
        );
        BlockchainError::Keystore {
            path: from.display().to_string(),
            reason: format!("could not rename to {}: {}", to.display(), e),
        }
    })
}

//! Artifact size and digest, printed for operator verification.

use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{Error, Result};
use crate::interrupt;

/// Read size used when hashing artifacts.
pub const CHUNK_SIZE: usize = 8 * 1024;

const UNITS: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];

/// Format a byte count with base-1024 unit prefixes and one decimal.
///
/// `0 → "0.0 B"`, `1024 → "1.0 KiB"`, `1536 → "1.5 KiB"`.
pub fn size_fmt(num: f64) -> String {
    let mut num = num;
    for unit in UNITS {
        if num.abs() < 1024.0 {
            return format!("{:.1} {}B", num, unit);
        }
        num /= 1024.0;
    }
    format!("{:.1} YiB", num)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
            DigestAlgorithm::Sha512 => write!(f, "sha512"),
        }
    }
}

fn hash_stream<D: Digest, R: Read>(mut reader: R) -> Result<String> {
    let mut hasher = D::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        interrupt::check()?;
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Lowercase hex digest of everything `reader` yields.
pub fn digest_reader<R: Read>(reader: R, algorithm: DigestAlgorithm) -> Result<String> {
    match algorithm {
        DigestAlgorithm::Sha256 => hash_stream::<Sha256, _>(reader),
        DigestAlgorithm::Sha512 => hash_stream::<Sha512, _>(reader),
    }
}

/// Lowercase hex digest of the file at `path`.
pub fn file_digest(path: &Path, algorithm: DigestAlgorithm) -> Result<String> {
    let file = File::open(path).map_err(|e| Error::fs(path, e.to_string()))?;
    digest_reader(file, algorithm)
}

/// Print an indented, left-aligned `key: value` line.
pub fn printkv(width: usize, key: &str, value: impl fmt::Display) {
    println!("    {:<width$}{}", format!("{}:", key), value, width = width);
}

/// Size and digest of a finished artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    pub path: PathBuf,
    pub size: u64,
    pub algorithm: DigestAlgorithm,
    pub digest: String,
}

impl ArtifactReport {
    pub fn from_file(path: &Path, algorithm: DigestAlgorithm) -> Result<Self> {
        let size = fs::metadata(path)
            .map_err(|e| Error::fs(path, e.to_string()))?
            .len();
        let digest = file_digest(path, algorithm)?;
        Ok(Self {
            path: path.to_path_buf(),
            size,
            algorithm,
            digest,
        })
    }

    pub fn size_display(&self) -> String {
        size_fmt(self.size as f64)
    }

    /// Print the report as builder key/value lines.
    pub fn print(&self, width: usize) {
        printkv(width, "Output Image", self.path.display());
        printkv(width, "Output Image Size", self.size_display());
        printkv(width, "Output Image Hash", &self.digest);
    }
}

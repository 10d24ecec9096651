//! Build artifacts: the packaged tarball and its operator report.
//!
//! - `tarball` - gzip tar creation, listing, layout checks and extraction
//! - `report` - human-readable size and content digest of an artifact

pub mod report;
pub mod tarball;

pub use report::{
    digest_reader, file_digest, printkv, size_fmt, ArtifactReport,
    DigestAlgorithm,
};
pub use tarball::{check_top_level, create_tarball, extract_tarball, list_tarball, ArchiveEntry};

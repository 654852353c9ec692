//! # Error Module
//!
//! Error types for the sorter and the metadata editors.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - Only fingerprint failures abort a sort run; everything else is a
//!   per-file skip reported by the caller

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SorterError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Metadata tool error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),

    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while listing the source tree
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Could not find {role} directory {path}")]
    DirectoryNotFound { role: &'static str, path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the metadata gateway (the external tool)
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("exiftool is not installed or not found ({program}). Install it from https://exiftool.org/install.html or pass --exiftool")]
    ToolNotFound { program: PathBuf },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error getting metadata for {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Error setting metadata for {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Error stripping metadata from {path}: {reason}")]
    Strip { path: PathBuf, reason: String },

    #[error("Failed to stage metadata at {path}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while fingerprinting file content
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to get metadata-free content for {path}: {source}")]
    Stripped {
        path: PathBuf,
        #[source]
        source: GatewayError,
    },
}

/// Errors that occur while copying, moving or deleting files
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Failed to create {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to transfer {from} -> {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Copy verification failed for {path}: source {expected} bytes, dest {actual} bytes")]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SorterError>;

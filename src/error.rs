//! Error handling module
//!
//! Provides the unified error type for the whole tool. Every failure
//! propagates to the caller; the core performs no silent recovery, so a
//! failed family in a `getall` run fails the whole operation instead of
//! reporting false "no changes".

use crate::records::Family;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The record source could not be reached or a query failed.
    #[error("record source unavailable: {0}")]
    Source(#[from] tokio_postgres::Error),

    /// The record source pool could not hand out a connection.
    #[error("record source unavailable: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// A fetched record is missing a required column or carries an
    /// unexpected type. Fatal for its family.
    #[error("malformed {family} record: {reason}")]
    MalformedRecord { family: Family, reason: String },

    /// Two records of the same family share an identity key within one
    /// snapshot. This is a precondition failure, never a silent pick.
    #[error("duplicate {family} identity key {key:?} in one snapshot")]
    DuplicateKey { family: Family, key: String },

    /// The hierarchy resolver was asked about a menu id that does not exist.
    #[error("menu node {0} not found")]
    NotFound(i32),

    /// The menu parent chain loops back on itself.
    #[error("cyclic menu hierarchy detected while resolving node {0}")]
    CyclicHierarchy(i32),

    /// The message sink rejected or never received the report.
    #[error("message sink unavailable: {0}")]
    Sink(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("branch inspection failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;

/// Helper to build a malformed-record error for a specific column.
pub fn malformed(family: Family, reason: impl Into<String>) -> AppError {
    AppError::MalformedRecord {
        family,
        reason: reason.into(),
    }
}

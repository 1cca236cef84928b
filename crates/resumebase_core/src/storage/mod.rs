//! Storage contract and backend implementations.
//!
//! # Responsibility
//! - Define the uniform CRUD contract every backend satisfies.
//! - Define the shared error taxonomy callers program against.
//!
//! # Invariants
//! - `uuid` is unique per storage instance; `save` of a present key fails.
//! - Absent keys are reported as typed `NotFound` failures, never as
//!   silent no-ops.
//! - `get_all_sorted` orders by `(full_name, uuid)` ascending on every
//!   backend, regardless of insertion history.

use crate::model::resume::{Resume, ResumeValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod array;
pub mod file;
pub mod sql;

pub use array::{ArrayStorage, SortedArrayStorage};
pub use file::PathStorage;
pub use sql::SqlStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Uniform failure taxonomy shared by all backends.
#[derive(Debug)]
pub enum StorageError {
    /// No record with the given uuid.
    NotFound(String),
    /// `save` referenced a uuid already present.
    AlreadyExists(String),
    /// `save` attempted beyond a fixed-capacity backend's limit.
    CapacityExceeded(usize),
    /// Record failed model invariants before any state was touched.
    Validation(ResumeValidationError),
    /// File or codec operation failed on the named resource.
    Io {
        resource: String,
        source: Box<dyn Error + Send + Sync>,
    },
    /// Relational unit of work failed; the transaction was rolled back.
    Transaction {
        step: &'static str,
        source: Box<dyn Error + Send + Sync>,
    },
    /// Construction-time failure; the backend is unusable.
    Config(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(uuid) => write!(f, "resume not found: {uuid}"),
            Self::AlreadyExists(uuid) => write!(f, "resume already exists: {uuid}"),
            Self::CapacityExceeded(capacity) => {
                write!(f, "storage capacity of {capacity} records exceeded")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Io { resource, source } => {
                write!(f, "storage i/o failed on `{resource}`: {source}")
            }
            Self::Transaction { step, source } => {
                write!(f, "transaction failed at step `{step}`: {source}")
            }
            Self::Config(message) => write!(f, "storage configuration invalid: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io { source, .. } | Self::Transaction { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<ResumeValidationError> for StorageError {
    fn from(value: ResumeValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Uniform CRUD contract over resume records.
///
/// Backends differ only in representation and performance; success and
/// failure conditions are identical across implementations, so callers
/// stay backend-agnostic.
pub trait Storage {
    /// Returns the record stored under `uuid`.
    ///
    /// # Errors
    /// `NotFound` when no record has that uuid.
    fn get(&self, uuid: &str) -> StorageResult<Resume>;

    /// Inserts a new record.
    ///
    /// # Errors
    /// - `AlreadyExists` when the uuid is present.
    /// - `CapacityExceeded` when a fixed-capacity backend is full.
    fn save(&mut self, resume: Resume) -> StorageResult<()>;

    /// Replaces the full content stored under the record's uuid.
    ///
    /// # Errors
    /// `NotFound` when no record has that uuid.
    fn update(&mut self, resume: Resume) -> StorageResult<()>;

    /// Removes the record stored under `uuid`, freeing its slot.
    ///
    /// # Errors
    /// `NotFound` when no record has that uuid.
    fn delete(&mut self, uuid: &str) -> StorageResult<()>;

    /// Current record count.
    fn size(&self) -> StorageResult<usize>;

    /// Removes all records. Idempotent.
    fn clear(&mut self) -> StorageResult<()>;

    /// Every record sorted ascending by `(full_name, uuid)`.
    fn get_all_sorted(&self) -> StorageResult<Vec<Resume>>;
}

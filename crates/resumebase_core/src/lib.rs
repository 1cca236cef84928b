//! Resume storage core: one CRUD contract, four interchangeable backends.
//! This crate is the single source of truth for storage invariants.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod storage;

pub use codec::{CodecError, CodecResult, JsonCodec, ResumeCodec, SectionCodec};
pub use db::{open_db, open_db_in_memory};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::resume::{
    ContactType, OrganizationEntry, Resume, ResumeValidationError, Section, SectionType,
};
pub use storage::{
    ArrayStorage, PathStorage, SortedArrayStorage, SqlStorage, Storage, StorageError,
    StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

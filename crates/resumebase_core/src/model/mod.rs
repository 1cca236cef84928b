//! Domain model for resume records.
//!
//! # Responsibility
//! - Define the canonical resume shape shared by every storage backend.
//! - Keep contact and section keys closed enumerations.
//!
//! # Invariants
//! - Every record is identified by a stable, non-empty `uuid`.
//! - A section value's variant always matches the shape its `SectionType`
//!   mandates.

pub mod resume;

//! Pluggable record and section codecs.
//!
//! # Responsibility
//! - Define the encode/decode contracts the file and relational backends
//!   depend on.
//! - Keep backends agnostic to the concrete byte/text format.
//!
//! # Invariants
//! - `decode_section` must reject values whose variant does not match the
//!   requested `SectionType`.
//! - Codecs carry no hidden global state; callers construct and own them.

use crate::model::resume::{Resume, Section, SectionType};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{Read, Write};

pub mod json;

pub use json::JsonCodec;

pub type CodecResult<T> = Result<T, CodecError>;

/// Failure while encoding or decoding a record or section.
#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
    Io(std::io::Error),
    ShapeMismatch(SectionType),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::ShapeMismatch(kind) => write!(
                f,
                "decoded section does not match the shape mandated by `{}`",
                kind.as_str()
            ),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::ShapeMismatch(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<std::io::Error> for CodecError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Converts single sections to and from a tagged textual form suitable
/// for a one-column store.
pub trait SectionCodec {
    fn encode_section(&self, section: &Section) -> CodecResult<String>;

    /// Decodes `text` and checks the result against the shape `kind`
    /// mandates.
    fn decode_section(&self, text: &str, kind: SectionType) -> CodecResult<Section>;
}

/// Converts whole resumes to and from a byte stream.
pub trait ResumeCodec: SectionCodec {
    fn encode(&self, resume: &Resume, target: &mut dyn Write) -> CodecResult<()>;

    fn decode(&self, source: &mut dyn Read) -> CodecResult<Resume>;
}

//! JSON codec backed by serde_json.
//!
//! Sections serialize as externally tagged values (`{"Text": "..."}`), so
//! a stored section stays self-describing even though the owning
//! `SectionType` already implies the variant.

use super::{CodecResult, ResumeCodec, SectionCodec};
use crate::model::resume::{Resume, Section, SectionType};
use std::io::{Read, Write};

/// serde_json implementation of the codec contracts.
///
/// Stateless; construct one per storage instance or share by value.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl SectionCodec for JsonCodec {
    fn encode_section(&self, section: &Section) -> CodecResult<String> {
        Ok(serde_json::to_string(section)?)
    }

    fn decode_section(&self, text: &str, kind: SectionType) -> CodecResult<Section> {
        let section: Section = serde_json::from_str(text)?;
        if !section.matches(kind) {
            return Err(super::CodecError::ShapeMismatch(kind));
        }
        Ok(section)
    }
}

impl ResumeCodec for JsonCodec {
    fn encode(&self, resume: &Resume, target: &mut dyn Write) -> CodecResult<()> {
        serde_json::to_writer(target, resume)?;
        Ok(())
    }

    fn decode(&self, source: &mut dyn Read) -> CodecResult<Resume> {
        Ok(serde_json::from_reader(source)?)
    }
}

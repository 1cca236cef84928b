//! Resume entity and its typed section variants.
//!
//! # Responsibility
//! - Define `Resume`, the closed contact/section enumerations and the
//!   tagged `Section` sum type.
//! - Provide validation used by every storage write path.
//!
//! # Invariants
//! - `uuid` is non-empty and never changes after construction.
//! - `contacts` holds at most one value per `ContactType`.
//! - `sections` values always match the shape mandated by their key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Closed set of contact channels a resume can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    Phone,
    Skype,
    Email,
    LinkedIn,
    GitHub,
    StackOverflow,
    HomePage,
}

impl ContactType {
    /// Stable textual name used in database `type` columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Skype => "skype",
            Self::Email => "email",
            Self::LinkedIn => "linked_in",
            Self::GitHub => "git_hub",
            Self::StackOverflow => "stack_overflow",
            Self::HomePage => "home_page",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "phone" => Some(Self::Phone),
            "skype" => Some(Self::Skype),
            "email" => Some(Self::Email),
            "linked_in" => Some(Self::LinkedIn),
            "git_hub" => Some(Self::GitHub),
            "stack_overflow" => Some(Self::StackOverflow),
            "home_page" => Some(Self::HomePage),
            _ => None,
        }
    }
}

/// Closed set of resume sections. Each type mandates exactly one
/// [`Section`] shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Personal,
    Objective,
    Achievement,
    Qualifications,
    Experience,
    Education,
}

impl SectionType {
    /// Stable textual name used in database `type` columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Objective => "objective",
            Self::Achievement => "achievement",
            Self::Qualifications => "qualifications",
            Self::Experience => "experience",
            Self::Education => "education",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "personal" => Some(Self::Personal),
            "objective" => Some(Self::Objective),
            "achievement" => Some(Self::Achievement),
            "qualifications" => Some(Self::Qualifications),
            "experience" => Some(Self::Experience),
            "education" => Some(Self::Education),
            _ => None,
        }
    }
}

/// One engagement inside an organization-style section: a title, a date
/// range and a free-form description list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationEntry {
    pub title: String,
    /// `YYYY-MM` start of the engagement.
    pub start_date: String,
    /// `YYYY-MM` end; `None` means ongoing.
    pub end_date: Option<String>,
    pub description: Vec<String>,
}

/// Tagged section value. The variant is implied by the owning
/// [`SectionType`]; serialization keeps the tag so persisted values stay
/// self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Text(String),
    List(Vec<String>),
    Organizations(Vec<OrganizationEntry>),
}

impl Section {
    /// Whether this value has the shape `kind` mandates.
    pub fn matches(&self, kind: SectionType) -> bool {
        match kind {
            SectionType::Personal | SectionType::Objective => matches!(self, Self::Text(_)),
            SectionType::Achievement | SectionType::Qualifications => {
                matches!(self, Self::List(_))
            }
            SectionType::Experience | SectionType::Education => {
                matches!(self, Self::Organizations(_))
            }
        }
    }
}

/// Validation failures for resume state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeValidationError {
    EmptyUuid,
    SectionShapeMismatch(SectionType),
}

impl Display for ResumeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUuid => write!(f, "resume uuid cannot be empty"),
            Self::SectionShapeMismatch(kind) => write!(
                f,
                "section value does not match the shape mandated by `{}`",
                kind.as_str()
            ),
        }
    }
}

impl Error for ResumeValidationError {}

/// Canonical resume record persisted by every storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    /// Stable global identity. Two records with the same uuid are the
    /// same logical entity.
    pub uuid: String,
    pub full_name: String,
    #[serde(default)]
    pub contacts: BTreeMap<ContactType, String>,
    #[serde(default)]
    pub sections: BTreeMap<SectionType, Section>,
}

impl Resume {
    /// Creates an empty resume with a generated uuid.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self::with_uuid(Uuid::new_v4().to_string(), full_name)
    }

    /// Creates an empty resume under a caller-provided identity.
    ///
    /// Used when identity already exists externally (imports, tests,
    /// re-reads from persistent state).
    pub fn with_uuid(uuid: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            full_name: full_name.into(),
            contacts: BTreeMap::new(),
            sections: BTreeMap::new(),
        }
    }

    /// Sets a contact value, replacing any previous value of that type.
    pub fn add_contact(&mut self, kind: ContactType, value: impl Into<String>) {
        self.contacts.insert(kind, value.into());
    }

    /// Sets a section value, replacing any previous value of that type.
    ///
    /// # Errors
    /// Rejects values whose variant does not match `kind`.
    pub fn add_section(
        &mut self,
        kind: SectionType,
        section: Section,
    ) -> Result<(), ResumeValidationError> {
        if !section.matches(kind) {
            return Err(ResumeValidationError::SectionShapeMismatch(kind));
        }
        self.sections.insert(kind, section);
        Ok(())
    }

    /// Checks record invariants. Storage write paths call this before
    /// mutating any persistent state.
    pub fn validate(&self) -> Result<(), ResumeValidationError> {
        if self.uuid.is_empty() {
            return Err(ResumeValidationError::EmptyUuid);
        }
        for (kind, section) in &self.sections {
            if !section.matches(*kind) {
                return Err(ResumeValidationError::SectionShapeMismatch(*kind));
            }
        }
        Ok(())
    }

    /// Retrieval ordering key: full name first, uuid as the tie-break.
    pub fn order_key(&self) -> (&str, &str) {
        (&self.full_name, &self.uuid)
    }
}

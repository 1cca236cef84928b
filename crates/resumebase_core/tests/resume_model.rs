use resumebase_core::{
    ContactType, Resume, ResumeValidationError, Section, SectionType,
};

#[test]
fn new_resume_gets_a_non_empty_generated_uuid() {
    let a = Resume::new("Ada");
    let b = Resume::new("Ada");

    assert!(!a.uuid.is_empty());
    assert_ne!(a.uuid, b.uuid);
    assert!(a.validate().is_ok());
}

#[test]
fn add_contact_replaces_previous_value_of_same_type() {
    let mut resume = Resume::with_uuid("r1", "Ada");
    resume.add_contact(ContactType::Email, "old@example.org");
    resume.add_contact(ContactType::Email, "new@example.org");

    assert_eq!(resume.contacts.len(), 1);
    assert_eq!(
        resume.contacts.get(&ContactType::Email).map(String::as_str),
        Some("new@example.org")
    );
}

#[test]
fn add_section_rejects_wrong_shape() {
    let mut resume = Resume::with_uuid("r1", "Ada");

    let err = resume
        .add_section(SectionType::Personal, Section::List(vec!["not text".into()]))
        .unwrap_err();
    assert_eq!(
        err,
        ResumeValidationError::SectionShapeMismatch(SectionType::Personal)
    );
    assert!(resume.sections.is_empty());
}

#[test]
fn every_section_type_accepts_its_mandated_shape() {
    let mut resume = Resume::with_uuid("r1", "Ada");

    for kind in [SectionType::Personal, SectionType::Objective] {
        resume.add_section(kind, Section::Text("text".into())).unwrap();
    }
    for kind in [SectionType::Achievement, SectionType::Qualifications] {
        resume.add_section(kind, Section::List(vec![])).unwrap();
    }
    for kind in [SectionType::Experience, SectionType::Education] {
        resume
            .add_section(kind, Section::Organizations(vec![]))
            .unwrap();
    }

    assert_eq!(resume.sections.len(), 6);
    assert!(resume.validate().is_ok());
}

#[test]
fn validate_rejects_empty_uuid() {
    let resume = Resume::with_uuid("", "Nameless");
    assert_eq!(resume.validate(), Err(ResumeValidationError::EmptyUuid));
}

#[test]
fn order_key_sorts_by_name_then_uuid() {
    let ann_a = Resume::with_uuid("a", "Ann");
    let ann_b = Resume::with_uuid("b", "Ann");
    let zed = Resume::with_uuid("a", "Zed");

    assert!(ann_a.order_key() < ann_b.order_key());
    assert!(ann_b.order_key() < zed.order_key());
}

#[test]
fn type_names_roundtrip_through_their_textual_form() {
    for kind in [
        ContactType::Phone,
        ContactType::Skype,
        ContactType::Email,
        ContactType::LinkedIn,
        ContactType::GitHub,
        ContactType::StackOverflow,
        ContactType::HomePage,
    ] {
        assert_eq!(ContactType::parse(kind.as_str()), Some(kind));
    }
    for kind in [
        SectionType::Personal,
        SectionType::Objective,
        SectionType::Achievement,
        SectionType::Qualifications,
        SectionType::Experience,
        SectionType::Education,
    ] {
        assert_eq!(SectionType::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(ContactType::parse("fax"), None);
    assert_eq!(SectionType::parse("hobbies"), None);
}

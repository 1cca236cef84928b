use resumebase_core::{ArrayStorage, ContactType, Resume, Section, SectionType, Storage, StorageError};

fn resume(uuid: &str, full_name: &str) -> Resume {
    Resume::with_uuid(uuid, full_name)
}

#[test]
fn save_then_get_roundtrips_full_content() {
    let mut storage = ArrayStorage::new();

    let mut original = resume("r1", "Ada Lovelace");
    original.add_contact(ContactType::Email, "ada@analytical.engine");
    original
        .add_section(SectionType::Personal, Section::Text("first programmer".into()))
        .unwrap();
    original
        .add_section(
            SectionType::Achievement,
            Section::List(vec!["notes on the engine".into()]),
        )
        .unwrap();

    storage.save(original.clone()).unwrap();

    let loaded = storage.get("r1").unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn save_duplicate_fails_and_leaves_existing_unchanged() {
    let mut storage = ArrayStorage::new();
    storage.save(resume("r1", "Original")).unwrap();

    let err = storage.save(resume("r1", "Impostor")).unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists(uuid) if uuid == "r1"));

    assert_eq!(storage.get("r1").unwrap().full_name, "Original");
    assert_eq!(storage.size().unwrap(), 1);
}

#[test]
fn operations_on_absent_uuid_fail_not_found_without_side_effects() {
    let mut storage = ArrayStorage::new();
    storage.save(resume("r1", "Only One")).unwrap();

    assert!(matches!(
        storage.get("missing").unwrap_err(),
        StorageError::NotFound(uuid) if uuid == "missing"
    ));
    assert!(matches!(
        storage.update(resume("missing", "Ghost")).unwrap_err(),
        StorageError::NotFound(_)
    ));
    assert!(matches!(
        storage.delete("missing").unwrap_err(),
        StorageError::NotFound(_)
    ));
    assert_eq!(storage.size().unwrap(), 1);
}

#[test]
fn delete_frees_slot_and_get_fails_afterwards() {
    let mut storage = ArrayStorage::new();
    storage.save(resume("r1", "One")).unwrap();
    storage.save(resume("r2", "Two")).unwrap();

    storage.delete("r1").unwrap();

    assert_eq!(storage.size().unwrap(), 1);
    assert!(matches!(
        storage.get("r1").unwrap_err(),
        StorageError::NotFound(_)
    ));
    assert_eq!(storage.get("r2").unwrap().full_name, "Two");
}

#[test]
fn update_replaces_full_content() {
    let mut storage = ArrayStorage::new();
    storage.save(resume("r1", "Before")).unwrap();

    let mut replacement = resume("r1", "After");
    replacement.add_contact(ContactType::Phone, "+1-555-0100");
    storage.update(replacement.clone()).unwrap();

    assert_eq!(storage.get("r1").unwrap(), replacement);
    assert_eq!(storage.size().unwrap(), 1);
}

#[test]
fn capacity_three_scenario_orders_by_name_and_rejects_fourth() {
    let mut storage = ArrayStorage::with_capacity(3);
    storage.save(resume("b", "Zed")).unwrap();
    storage.save(resume("a", "Ann")).unwrap();
    storage.save(resume("c", "Mid")).unwrap();

    let sorted = storage.get_all_sorted().unwrap();
    let pairs: Vec<(&str, &str)> = sorted
        .iter()
        .map(|r| (r.uuid.as_str(), r.full_name.as_str()))
        .collect();
    assert_eq!(pairs, vec![("a", "Ann"), ("c", "Mid"), ("b", "Zed")]);

    let err = storage.save(resume("d", "Late")).unwrap_err();
    assert!(matches!(err, StorageError::CapacityExceeded(3)));
    assert_eq!(storage.size().unwrap(), 3);
}

#[test]
fn get_all_sorted_breaks_name_ties_by_uuid() {
    let mut storage = ArrayStorage::new();
    storage.save(resume("z", "Same Name")).unwrap();
    storage.save(resume("a", "Same Name")).unwrap();
    storage.save(resume("m", "Same Name")).unwrap();

    let sorted = storage.get_all_sorted().unwrap();
    let uuids: Vec<&str> = sorted.iter().map(|r| r.uuid.as_str()).collect();
    assert_eq!(uuids, vec!["a", "m", "z"]);
}

#[test]
fn clear_is_idempotent() {
    let mut storage = ArrayStorage::new();
    storage.save(resume("r1", "One")).unwrap();

    storage.clear().unwrap();
    storage.clear().unwrap();

    assert_eq!(storage.size().unwrap(), 0);
    assert!(storage.get_all_sorted().unwrap().is_empty());
}

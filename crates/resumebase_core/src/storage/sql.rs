//! Relational backend over SQLite.
//!
//! # Responsibility
//! - Persist one parent row per record plus child rows for contacts and
//!   sections, with transactional write paths.
//! - Keep section values opaque text produced by the section codec.
//!
//! # Invariants
//! - Every multi-statement write commits or rolls back as one unit; a
//!   dropped transaction rolls back on every failure path.
//! - Contacts and sections without values never persist as rows; the
//!   empty `type` marker only ever appears as an outer-join artifact.

use super::{Storage, StorageError, StorageResult};
use crate::codec::SectionCodec;
use crate::model::resume::{ContactType, Resume, SectionType};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

// One round trip for get(): contact and section rows are UNIONed with a
// splitter column, and COALESCE marks the all-NULL outer-join artifact
// with an empty type, which read-back skips.
const SELECT_ONE_SQL: &str = "\
SELECT r.full_name, COALESCE(c.type, '') AS type, c.value, 0 AS splitter
  FROM resume r
  LEFT JOIN contact c ON r.uuid = c.resume_uuid
 WHERE r.uuid = ?1
UNION ALL
SELECT r.full_name, COALESCE(s.type, ''), s.value, 1
  FROM resume r
  LEFT JOIN section s ON r.uuid = s.resume_uuid
 WHERE r.uuid = ?1";

/// Persisted enumeration name that no longer parses.
#[derive(Debug)]
struct UnknownTypeName {
    column: &'static str,
    value: String,
}

impl Display for UnknownTypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value `{}` in {}", self.value, self.column)
    }
}

impl Error for UnknownTypeName {}

/// SQLite-backed resume storage.
///
/// Borrows a connection supplied by the caller and treats it as opaque;
/// [`crate::db::open_db`] and [`crate::db::open_db_in_memory`] are the
/// stock providers.
#[derive(Debug)]
pub struct SqlStorage<'conn, C: SectionCodec> {
    conn: &'conn Connection,
    codec: C,
}

impl<'conn, C: SectionCodec> SqlStorage<'conn, C> {
    /// Binds the backend to a connection with the resume schema applied.
    ///
    /// # Errors
    /// `Config` when a required table is missing.
    pub fn new(conn: &'conn Connection, codec: C) -> StorageResult<Self> {
        for table in ["resume", "contact", "section"] {
            let exists: bool = conn
                .query_row(
                    "SELECT EXISTS (
                        SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
                     );",
                    [table],
                    |row| row.get(0),
                )
                .map_err(|err| {
                    StorageError::Config(format!("schema check failed for `{table}`: {err}"))
                })?;
            if !exists {
                return Err(StorageError::Config(format!(
                    "required table `{table}` is missing"
                )));
            }
        }
        Ok(Self { conn, codec })
    }

    fn insert_contacts(&self, conn: &Connection, resume: &Resume) -> StorageResult<()> {
        let mut stmt = conn
            .prepare("INSERT INTO contact (resume_uuid, type, value) VALUES (?1, ?2, ?3);")
            .map_err(|err| tx_failure("insert contacts", err))?;
        for (kind, value) in &resume.contacts {
            stmt.execute(params![resume.uuid, kind.as_str(), value])
                .map_err(|err| tx_failure("insert contacts", err))?;
        }
        Ok(())
    }

    fn insert_sections(&self, conn: &Connection, resume: &Resume) -> StorageResult<()> {
        let mut stmt = conn
            .prepare("INSERT INTO section (resume_uuid, type, value) VALUES (?1, ?2, ?3);")
            .map_err(|err| tx_failure("insert sections", err))?;
        for (kind, section) in &resume.sections {
            let encoded = self
                .codec
                .encode_section(section)
                .map_err(|err| StorageError::Transaction {
                    step: "encode sections",
                    source: Box::new(err),
                })?;
            stmt.execute(params![resume.uuid, kind.as_str(), encoded])
                .map_err(|err| tx_failure("insert sections", err))?;
        }
        Ok(())
    }

    fn attach_contact(&self, resume: &mut Resume, kind: &str, value: String) -> StorageResult<()> {
        let kind = ContactType::parse(kind)
            .ok_or_else(|| invalid_type_name(resume, "contact.type", kind))?;
        resume.contacts.insert(kind, value);
        Ok(())
    }

    fn attach_section(&self, resume: &mut Resume, kind: &str, value: &str) -> StorageResult<()> {
        let kind = SectionType::parse(kind)
            .ok_or_else(|| invalid_type_name(resume, "section.type", kind))?;
        let section = self
            .codec
            .decode_section(value, kind)
            .map_err(|err| StorageError::Io {
                resource: resume.uuid.clone(),
                source: Box::new(err),
            })?;
        resume.sections.insert(kind, section);
        Ok(())
    }
}

fn tx_failure(step: &'static str, source: rusqlite::Error) -> StorageError {
    StorageError::Transaction {
        step,
        source: Box::new(source),
    }
}

fn invalid_type_name(resume: &Resume, column: &'static str, value: &str) -> StorageError {
    StorageError::Io {
        resource: resume.uuid.clone(),
        source: Box::new(UnknownTypeName {
            column,
            value: value.to_string(),
        }),
    }
}

// Only key collisions mean AlreadyExists; other constraint classes
// (NOT NULL, CHECK, triggers) stay transaction failures.
fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl<C: SectionCodec> Storage for SqlStorage<'_, C> {
    fn get(&self, uuid: &str) -> StorageResult<Resume> {
        let mut stmt = self
            .conn
            .prepare(SELECT_ONE_SQL)
            .map_err(|err| tx_failure("query resume", err))?;
        let mut rows = stmt
            .query([uuid])
            .map_err(|err| tx_failure("query resume", err))?;

        let mut resume: Option<Resume> = None;
        while let Some(row) = rows.next().map_err(|err| tx_failure("query resume", err))? {
            let full_name: String = row.get(0).map_err(|err| tx_failure("query resume", err))?;
            let kind: String = row.get(1).map_err(|err| tx_failure("query resume", err))?;
            let value: Option<String> = row.get(2).map_err(|err| tx_failure("query resume", err))?;
            let splitter: i64 = row.get(3).map_err(|err| tx_failure("query resume", err))?;

            let record = resume.get_or_insert_with(|| Resume::with_uuid(uuid, full_name));
            if kind.is_empty() {
                // Outer-join artifact for a record with no children.
                continue;
            }
            let value = value.unwrap_or_default();
            if splitter == 0 {
                self.attach_contact(record, &kind, value)?;
            } else {
                self.attach_section(record, &kind, &value)?;
            }
        }

        resume.ok_or_else(|| StorageError::NotFound(uuid.to_string()))
    }

    fn save(&mut self, resume: Resume) -> StorageResult<()> {
        resume.validate()?;
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|err| tx_failure("begin", err))?;

        match tx.execute(
            "INSERT INTO resume (uuid, full_name) VALUES (?1, ?2);",
            params![resume.uuid, resume.full_name],
        ) {
            Ok(_) => {}
            Err(err) if is_primary_key_violation(&err) => {
                return Err(StorageError::AlreadyExists(resume.uuid));
            }
            Err(err) => return Err(tx_failure("insert resume", err)),
        }
        self.insert_contacts(&tx, &resume)?;
        self.insert_sections(&tx, &resume)?;

        tx.commit().map_err(|err| tx_failure("commit", err))
    }

    fn update(&mut self, resume: Resume) -> StorageResult<()> {
        resume.validate()?;
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|err| tx_failure("begin", err))?;

        let updated = tx
            .execute(
                "UPDATE resume SET full_name = ?1 WHERE uuid = ?2;",
                params![resume.full_name, resume.uuid],
            )
            .map_err(|err| tx_failure("update resume", err))?;
        if updated == 0 {
            return Err(StorageError::NotFound(resume.uuid));
        }

        tx.execute("DELETE FROM contact WHERE resume_uuid = ?1;", [&resume.uuid])
            .map_err(|err| tx_failure("delete contacts", err))?;
        self.insert_contacts(&tx, &resume)?;
        tx.execute("DELETE FROM section WHERE resume_uuid = ?1;", [&resume.uuid])
            .map_err(|err| tx_failure("delete sections", err))?;
        self.insert_sections(&tx, &resume)?;

        tx.commit().map_err(|err| tx_failure("commit", err))
    }

    fn delete(&mut self, uuid: &str) -> StorageResult<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM resume WHERE uuid = ?1;", [uuid])
            .map_err(|err| tx_failure("delete resume", err))?;
        if deleted == 0 {
            return Err(StorageError::NotFound(uuid.to_string()));
        }
        Ok(())
    }

    fn size(&self) -> StorageResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(uuid) FROM resume;", [], |row| row.get(0))
            .map_err(|err| tx_failure("count resumes", err))?;
        Ok(count as usize)
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM resume;", [])
            .map_err(|err| tx_failure("clear resumes", err))?;
        Ok(())
    }

    fn get_all_sorted(&self) -> StorageResult<Vec<Resume>> {
        // Three round trips total, independent of record count: parents
        // in display order, then all contacts, then all sections.
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|err| tx_failure("begin", err))?;

        let mut resumes: Vec<Resume> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        {
            let mut stmt = tx
                .prepare("SELECT uuid, full_name FROM resume ORDER BY full_name, uuid;")
                .map_err(|err| tx_failure("query resumes", err))?;
            let mut rows = stmt
                .query([])
                .map_err(|err| tx_failure("query resumes", err))?;
            while let Some(row) = rows.next().map_err(|err| tx_failure("query resumes", err))? {
                let uuid: String = row.get(0).map_err(|err| tx_failure("query resumes", err))?;
                let full_name: String =
                    row.get(1).map_err(|err| tx_failure("query resumes", err))?;
                index.insert(uuid.clone(), resumes.len());
                resumes.push(Resume::with_uuid(uuid, full_name));
            }

            let mut stmt = tx
                .prepare("SELECT resume_uuid, type, value FROM contact;")
                .map_err(|err| tx_failure("query contacts", err))?;
            let mut rows = stmt
                .query([])
                .map_err(|err| tx_failure("query contacts", err))?;
            while let Some(row) = rows.next().map_err(|err| tx_failure("query contacts", err))? {
                let uuid: String = row.get(0).map_err(|err| tx_failure("query contacts", err))?;
                let kind: String = row.get(1).map_err(|err| tx_failure("query contacts", err))?;
                let value: String = row.get(2).map_err(|err| tx_failure("query contacts", err))?;
                if let Some(&at) = index.get(&uuid) {
                    let record = &mut resumes[at];
                    self.attach_contact(record, &kind, value)?;
                }
            }

            let mut stmt = tx
                .prepare("SELECT resume_uuid, type, value FROM section;")
                .map_err(|err| tx_failure("query sections", err))?;
            let mut rows = stmt
                .query([])
                .map_err(|err| tx_failure("query sections", err))?;
            while let Some(row) = rows.next().map_err(|err| tx_failure("query sections", err))? {
                let uuid: String = row.get(0).map_err(|err| tx_failure("query sections", err))?;
                let kind: String = row.get(1).map_err(|err| tx_failure("query sections", err))?;
                let value: String = row.get(2).map_err(|err| tx_failure("query sections", err))?;
                if let Some(&at) = index.get(&uuid) {
                    let record = &mut resumes[at];
                    self.attach_section(record, &kind, &value)?;
                }
            }
        }

        tx.commit().map_err(|err| tx_failure("commit", err))?;
        Ok(resumes)
    }
}

//! Directory-of-files backend.
//!
//! # Responsibility
//! - Persist one record per file, filename = uuid, through a pluggable
//!   codec.
//! - Validate the directory once at construction; fail fast otherwise.
//!
//! # Invariants
//! - The directory is the single source of truth; `size` is never cached.
//! - Codec and filesystem failures surface with the resource name, never
//!   silently.

use super::{Storage, StorageError, StorageResult};
use crate::codec::ResumeCodec;
use crate::model::resume::Resume;
use log::{debug, error};
use std::error::Error;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Backend storing each record as one codec-encoded file in a directory.
#[derive(Debug)]
pub struct PathStorage<C: ResumeCodec> {
    directory: PathBuf,
    codec: C,
}

impl<C: ResumeCodec> PathStorage<C> {
    /// Binds the backend to an existing directory.
    ///
    /// # Errors
    /// `Config` when the path is not a readable, writable directory.
    pub fn new(directory: impl Into<PathBuf>, codec: C) -> StorageResult<Self> {
        let directory = directory.into();
        if !directory.is_dir() {
            return Err(StorageError::Config(format!(
                "`{}` is not a directory",
                directory.display()
            )));
        }
        let metadata = fs::metadata(&directory).map_err(|err| {
            StorageError::Config(format!(
                "cannot stat directory `{}`: {err}",
                directory.display()
            ))
        })?;
        if metadata.permissions().readonly() {
            return Err(StorageError::Config(format!(
                "directory `{}` is not writable",
                directory.display()
            )));
        }
        // Probe readability once; later failures are runtime Io errors.
        fs::read_dir(&directory).map_err(|err| {
            StorageError::Config(format!(
                "directory `{}` is not readable: {err}",
                directory.display()
            ))
        })?;

        debug!(
            "event=file_storage_open module=storage status=ok dir={}",
            directory.display()
        );
        Ok(Self { directory, codec })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn record_path(&self, uuid: &str) -> PathBuf {
        self.directory.join(uuid)
    }

    // `Path::exists` folds permission errors into `false`; only a real
    // NotFound may map to the NotFound failure.
    fn record_exists(&self, path: &Path) -> StorageResult<bool> {
        match fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(io_failure(path, err.into())),
        }
    }

    fn read_record(&self, path: &Path) -> StorageResult<Resume> {
        let file = File::open(path).map_err(|err| io_failure(path, err.into()))?;
        let mut reader = BufReader::new(file);
        self.codec
            .decode(&mut reader)
            .map_err(|err| io_failure(path, err.into()))
    }

    fn write_record(&self, path: &Path, file: File, resume: &Resume) -> StorageResult<()> {
        let mut writer = BufWriter::new(file);
        self.codec
            .encode(resume, &mut writer)
            .map_err(|err| io_failure(path, err.into()))?;
        // Buffered bytes only hit the file here; a flush error at drop
        // would be discarded.
        writer.flush().map_err(|err| io_failure(path, err.into()))
    }

    fn entries(&self) -> StorageResult<Vec<PathBuf>> {
        let read_dir = fs::read_dir(&self.directory)
            .map_err(|err| io_failure(&self.directory, err.into()))?;
        let mut paths = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|err| io_failure(&self.directory, err.into()))?;
            paths.push(entry.path());
        }
        Ok(paths)
    }
}

fn io_failure(path: &Path, source: Box<dyn Error + Send + Sync>) -> StorageError {
    let resource = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    error!("event=file_storage_io module=storage status=error resource={resource} error={source}");
    StorageError::Io { resource, source }
}

impl<C: ResumeCodec> Storage for PathStorage<C> {
    fn get(&self, uuid: &str) -> StorageResult<Resume> {
        let path = self.record_path(uuid);
        if !self.record_exists(&path)? {
            return Err(StorageError::NotFound(uuid.to_string()));
        }
        self.read_record(&path)
    }

    fn save(&mut self, resume: Resume) -> StorageResult<()> {
        resume.validate()?;
        let path = self.record_path(&resume.uuid);
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(resume.uuid));
            }
            Err(err) => return Err(io_failure(&path, err.into())),
        };
        self.write_record(&path, file, &resume)
    }

    fn update(&mut self, resume: Resume) -> StorageResult<()> {
        resume.validate()?;
        let path = self.record_path(&resume.uuid);
        if !self.record_exists(&path)? {
            return Err(StorageError::NotFound(resume.uuid));
        }
        // Truncate and rewrite; never append.
        let file = File::create(&path).map_err(|err| io_failure(&path, err.into()))?;
        self.write_record(&path, file, &resume)
    }

    fn delete(&mut self, uuid: &str) -> StorageResult<()> {
        let path = self.record_path(uuid);
        if !self.record_exists(&path)? {
            return Err(StorageError::NotFound(uuid.to_string()));
        }
        fs::remove_file(&path).map_err(|err| io_failure(&path, err.into()))
    }

    fn size(&self) -> StorageResult<usize> {
        Ok(self.entries()?.len())
    }

    fn clear(&mut self) -> StorageResult<()> {
        for path in self.entries()? {
            fs::remove_file(&path).map_err(|err| io_failure(&path, err.into()))?;
        }
        Ok(())
    }

    fn get_all_sorted(&self) -> StorageResult<Vec<Resume>> {
        let mut resumes = Vec::new();
        for path in self.entries()? {
            resumes.push(self.read_record(&path)?);
        }
        resumes.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        Ok(resumes)
    }
}

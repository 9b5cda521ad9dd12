use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::StorageError;
use crate::task::Task;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Result of reading the task file.
#[derive(Debug, Default)]
pub struct Loaded {
    pub tasks: Vec<Task>,
    /// False when there was no file yet.
    pub existed: bool,
}

/// The flat tab-separated file backing the store.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load *all* tasks, one per line, in file order.
    ///
    /// A missing file is an empty list. Lines that don't parse are dropped.
    /// Each line is decoded on its own; invalid UTF-8 becomes U+FFFD.
    pub fn load(&self) -> Result<Loaded, StorageError> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no task file at {}", self.path.display());
                return Ok(Loaded::default());
            }
            Err(source) => {
                warn!("failed to read {}: {}", self.path.display(), source);
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut tasks = Vec::new();
        for (n, line) in content.split(|&b| b == b'\n').enumerate() {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            // a stray bad byte costs one character, not the line or the file
            let line = String::from_utf8_lossy(line);
            match Task::parse(&line) {
                Ok(task) => tasks.push(task),
                Err(e) => debug!("skipping line {} of {}: {}", n + 1, self.path.display(), e),
            }
        }

        info!("loaded {} tasks from {}", tasks.len(), self.path.display());
        Ok(Loaded {
            tasks,
            existed: true,
        })
    }

    /// Overwrite the file with the given tasks, one line each.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let mut data = String::new();
        for t in tasks {
            data.push_str(&t.serialize());
            data.push_str(LINE_ENDING);
        }

        self.write_atomic(data.as_bytes()).map_err(|source| {
            warn!("failed to write {}: {}", self.path.display(), source);
            StorageError::Write {
                path: self.path.clone(),
                source,
            }
        })?;

        info!("saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }

    // Write to a sibling temp file, then rename over the target.
    fn write_atomic(&self, data: &[u8]) -> io::Result<()> {
        let temp_path = match self.path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.path.with_extension(format!("{ext}.tmp")),
            None => self.path.with_extension("tmp"),
        };

        let result = File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(data)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&temp_path, &self.path));

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

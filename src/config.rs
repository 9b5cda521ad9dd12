use std::path::{Path, PathBuf};

/// Default name of the task file, relative to the working directory.
pub const DEFAULT_TASKS_FILE: &str = "tasks.tsv";

/// Timestamp layout used both in the file and in the task table.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Session settings. Compiled-in only: the tracker takes no flags and
/// reads no environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tasks_file: PathBuf,
}

impl Config {
    pub fn with_tasks_file(path: impl Into<PathBuf>) -> Self {
        Self { tasks_file: path.into() }
    }

    pub fn tasks_file(&self) -> &Path {
        &self.tasks_file
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_tasks_file(DEFAULT_TASKS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_tasks_tsv() {
        let config = Config::default();
        assert_eq!(config.tasks_file(), Path::new("tasks.tsv"));
    }

    #[test]
    fn with_tasks_file_overrides_path() {
        let config = Config::with_tasks_file("/tmp/elsewhere.tsv");
        assert_eq!(config.tasks_file(), Path::new("/tmp/elsewhere.tsv"));
    }
}

//! Per-request stdout capture files.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use uuid::Uuid;

/// Suffix every capture file carries.
pub const STDOUT_SUFFIX: &str = "-stdout.log";

/// Build a log file name from a local timestamp and a random token.
///
/// The timestamp keeps names sortable and readable; the token keeps two
/// requests landing in the same microsecond apart.
pub fn log_file_name(now: DateTime<Local>, token: Uuid) -> String {
    format!(
        "{}-{}{}",
        now.format("%Y-%m-%dT%H-%M-%S%.6f%z"),
        token.simple(),
        STDOUT_SUFFIX
    )
}

/// A freshly created, empty capture file.
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    file: File,
}

impl LogFile {
    /// Create a new capture file in `dir`.
    ///
    /// The directory is not created. The file is opened create-new, so an
    /// existing file is never truncated.
    pub fn create(dir: &Path) -> io::Result<Self> {
        let path = dir.join(log_file_name(Local::now(), Uuid::new_v4()));
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| io::Error::new(e.kind(), format!("open {}: {}", path.display(), e)))?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Split into the path and the open handle, for handing to a child process.
    pub fn into_parts(self) -> (PathBuf, File) {
        (self.path, self.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_name_embeds_timestamp_and_suffix() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let token = Uuid::nil();
        let name = log_file_name(now, token);

        assert!(name.starts_with("2024-03-09T14-05-07.000000"), "{}", name);
        assert!(name.contains(&token.simple().to_string()));
        assert!(name.ends_with(STDOUT_SUFFIX));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_names_differ_within_same_instant() {
        let now = Local::now();
        assert_ne!(
            log_file_name(now, Uuid::new_v4()),
            log_file_name(now, Uuid::new_v4())
        );
    }

    #[test]
    fn test_create_makes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::create(dir.path()).unwrap();

        assert_eq!(log.path().parent(), Some(dir.path()));
        assert!(log.path().exists());
        assert_eq!(std::fs::metadata(log.path()).unwrap().len(), 0);
    }

    #[test]
    fn test_create_fails_without_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("logs");

        let err = LogFile::create(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("open "));
        assert!(!missing.exists());
    }
}

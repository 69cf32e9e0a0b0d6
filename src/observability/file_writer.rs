//! Rotating file writer with size-based rotation and backup retention.
//!
//! Keeps the console log from growing without bound. Wrapped in a `Mutex` it
//! serves as the `MakeWriter` for the fmt layer.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Appends to a log file, rotating it once it exceeds [`MAX_FILE_SIZE_BYTES`].
///
/// Rotated files are renamed `<name>.<unix_timestamp>`; only the newest
/// [`MAX_BACKUP_FILES`] are kept. The file is opened on first write.
pub struct RotatingFile {
    file_path: PathBuf,
    file: Option<File>,
    max_bytes: u64,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, MAX_FILE_SIZE_BYTES)
    }

    #[must_use]
    pub const fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            file: None,
            max_bytes,
        }
    }

    fn check_and_rotate(&mut self) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_bytes {
                self.file = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn rotate_files(&self) -> io::Result<()> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        let mut backup_name = self.file_path.clone().into_os_string();
        backup_name.push(format!(".{timestamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, PathBuf::from(backup_name))?;
        }

        self.cleanup_old_backups()
    }

    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no parent directory"))?;

        let file_name = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "invalid file name"))?;
        let prefix = format!("{file_name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamped names sort chronologically; newest first.
        backups.sort_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check_and_rotate()?;

        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            self.file = Some(file);
        }

        match self.file.as_mut() {
            Some(file) => file.write(buf),
            None => Err(io::Error::new(io::ErrorKind::Other, "no file available")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.as_mut().map_or(Ok(()), Write::flush)
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_until_limit_then_rotates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.log");
        let mut writer = RotatingFile::with_limit(path.clone(), 8);

        writer.write_all(b"first line\n").unwrap();
        writer.flush().unwrap();
        writer.write_all(b"second\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        let backups = fs::read_dir(dir.path()).unwrap().count() - 1;
        assert_eq!(backups, 1);
    }

    #[test]
    fn keeps_at_most_three_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.log");
        let mut writer = RotatingFile::with_limit(path.clone(), 1);

        for line in 0..6 {
            writer.write_all(format!("line {line}\n").as_bytes()).unwrap();
            writer.flush().unwrap();
        }

        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1 + MAX_BACKUP_FILES);
        assert_eq!(fs::read_to_string(&path).unwrap(), "line 5\n");
    }
}

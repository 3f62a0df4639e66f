use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Append-only log file capped at `max_size` bytes
///
/// When a write would push the file past the cap, the current file is moved
/// to `<path>.1` (replacing any older backup) and a fresh file is started. A
/// single write larger than the cap still lands in one file.
///
/// `write_all` decides rotation once for the whole buffer, so a log line
/// handed over in one call is never split across the backup and the live
/// file. Plain `write` decides per call.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_size: u64,
    file: File,
    written: u64,
}

impl RotatingFile {
    /// Open `path` for appending, creating it and its parent directory if needed
    pub fn open(path: impl AsRef<Path>, max_size: u64) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            max_size,
            file,
            written,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the single rotated backup
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".1");
        PathBuf::from(name)
    }

    fn needs_rotation(&self, incoming: usize) -> bool {
        self.written > 0 && self.written + incoming as u64 > self.max_size
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush().ok();

        // A live file removed or moved away counts as already rotated
        match fs::rename(&self.path, self.backup_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "Failed to back up log file {}: {e}",
                self.path.display()
            ),
        }

        // Keep the old handle until the new file is open
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.file = file;
        self.written = 0;
        tracing::debug!("Rotated log file {}", self.path.display());
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.needs_rotation(buf.len()) {
            self.rotate()?;
        }

        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.needs_rotation(buf.len()) {
            self.rotate()?;
        }

        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

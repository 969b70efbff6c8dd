use std::fs;
use std::io::Write;
use std::path::PathBuf;

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{ReportError, Result};

/// Destination that hands a finished file to the user
pub trait DownloadSink {
    /// Deliver the complete file. Nothing may be visible under `filename` if this fails.
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes files into a directory through a temp file that is renamed into place
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;

        let path = self.dir.join(filename);
        tmp.persist(&path).map_err(|e| ReportError::Io(e.error))?;
        debug!("wrote {} ({} bytes)", path.display(), bytes.len());

        Ok(path)
    }
}

/// Keeps delivered files in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.files.push((filename.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(filename))
    }
}

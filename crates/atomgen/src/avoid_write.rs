//! A file sink that leaves unchanged files untouched.
//!
//! Generated sources are consumed by cargo, which treats a newer mtime as a
//! reason to rebuild everything downstream. [`FileAvoidWrite`] buffers all
//! output in memory and only replaces the file on disk when the bytes differ.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{AtomGenError, Result};

/// What [`FileAvoidWrite::close`] did with the buffered content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
	/// The file was missing or different and has been replaced.
	Written,
	/// The file already held exactly these bytes.
	Unchanged,
}

/// Buffered writer that commits to `path` only if the content changed.
///
/// Call [`close`](Self::close) to commit and observe the result. A writer
/// dropped without being closed commits from its `Drop` impl and logs any
/// failure instead.
#[derive(Debug)]
pub struct FileAvoidWrite {
	path: PathBuf,
	buf: Vec<u8>,
	closed: bool,
}

impl FileAvoidWrite {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			buf: Vec::new(),
			closed: false,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Appends a string to the buffer.
	pub fn write_str(&mut self, s: &str) {
		self.buf.extend_from_slice(s.as_bytes());
	}

	/// Compares the buffer with the file on disk and writes it if different.
	pub fn close(mut self) -> Result<WriteOutcome> {
		self.commit()
	}

	fn commit(&mut self) -> Result<WriteOutcome> {
		self.closed = true;

		match fs::read(&self.path) {
			Ok(old) if old == self.buf => {
				info!("{} is not changed, skip", self.path.display());
				return Ok(WriteOutcome::Unchanged);
			}
			Ok(_) => {}
			Err(e) if e.kind() == ErrorKind::NotFound => {}
			Err(e) => return Err(AtomGenError::io(&self.path, e)),
		}

		fs::write(&self.path, &self.buf).map_err(|e| AtomGenError::io(&self.path, e))?;
		Ok(WriteOutcome::Written)
	}
}

impl Write for FileAvoidWrite {
	fn write(&mut self, data: &[u8]) -> io::Result<usize> {
		self.buf.extend_from_slice(data);
		Ok(data.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl Drop for FileAvoidWrite {
	fn drop(&mut self) {
		if self.closed {
			return;
		}
		if let Err(err) = self.commit() {
			error!(path = %self.path.display(), error = %err, "failed to commit generated file");
		}
	}
}

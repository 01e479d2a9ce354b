//! Build-dependency tracking for the invoking build script.

use std::path::{Path, PathBuf};

/// Collects the inputs read during a run and reports them to cargo.
///
/// Each tracked path is printed as `cargo:rerun-if-changed=<path>` on stdout
/// unless the context was created with [`BuildCtx::quiet`].
#[derive(Debug)]
pub struct BuildCtx {
	echo: bool,
	tracked: Vec<PathBuf>,
}

impl Default for BuildCtx {
	fn default() -> Self {
		Self::new()
	}
}

impl BuildCtx {
	pub fn new() -> Self {
		Self {
			echo: true,
			tracked: Vec::new(),
		}
	}

	/// A context that records dependencies without printing them.
	pub fn quiet() -> Self {
		Self {
			echo: false,
			tracked: Vec::new(),
		}
	}

	pub fn rerun_if_changed(&mut self, path: &Path) {
		if self.echo {
			println!("cargo:rerun-if-changed={}", path.display());
		}
		self.tracked.push(path.to_path_buf());
	}

	/// Paths tracked so far, in the order they were read.
	pub fn tracked(&self) -> &[PathBuf] {
		&self.tracked
	}
}

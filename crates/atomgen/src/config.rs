//! Input and output locations for a generation run.

use std::path::{Path, PathBuf};

/// Location of the atom list header, relative to the dist directory.
pub const HEADER_FILE: &str = "include/nsGkAtomList.h";

/// File name of the generated `atom!` macro table.
pub const ATOM_MACRO_FILE: &str = "atom_macro.rs";

/// File name of the rendered pseudo-element definition.
pub const PSEUDO_DEFINITION_FILE: &str = "pseudo_element_definition.rs";

/// The bundled pseudo-element definition template.
pub const DEFAULT_TEMPLATE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/pseudo_element_definition.rs.hbs");

/// Paths a run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
	pub dist_dir: PathBuf,
	pub out_dir: PathBuf,
	pub template: PathBuf,
}

impl GenConfig {
	/// Config for `dist` and `out` using the bundled template.
	pub fn new(dist: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
		Self {
			dist_dir: dist.into(),
			out_dir: out.into(),
			template: PathBuf::from(DEFAULT_TEMPLATE),
		}
	}

	pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
		self.template = template.into();
		self
	}

	pub fn header_path(&self) -> PathBuf {
		self.dist_dir.join(HEADER_FILE)
	}

	pub fn atom_macro_path(&self) -> PathBuf {
		self.out_dir.join(ATOM_MACRO_FILE)
	}

	pub fn pseudo_definition_path(&self) -> PathBuf {
		self.out_dir.join(PSEUDO_DEFINITION_FILE)
	}

	pub fn template_path(&self) -> &Path {
		&self.template
	}
}

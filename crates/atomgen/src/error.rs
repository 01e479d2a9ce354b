//! Error types for atom generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum AtomGenError {
	/// Reading the header or template, or writing an output, failed.
	#[error("I/O error on {path}: {source}")]
	Io {
		/// Path of the file being read or written.
		path: PathBuf,
		/// The underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// An anonymous box atom declared with a non anon-box Gecko type.
	#[error("anon box atom '{ident}' must be declared as nsICSSAnonBoxPseudo, found '{ty}'")]
	AnonBox { ident: String, ty: String },

	/// A pseudo atom with no pseudo name: either its identifier has no `_`
	/// separated prefix, or its category is not a pseudo category.
	#[error("pseudo atom '{ident}' has no pseudo name")]
	PseudoIdent { ident: String },

	/// The template bindings could not be serialized.
	#[error("failed to build template bindings: {0}")]
	Bindings(#[from] serde_json::Error),

	/// The template engine rejected the template or its bindings.
	#[error("failed to render {path}: {message}")]
	Template { path: PathBuf, message: String },
}

impl AtomGenError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}

/// Result type for atom generation.
pub type Result<T> = std::result::Result<T, AtomGenError>;

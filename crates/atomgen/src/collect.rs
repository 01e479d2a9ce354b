//! Extraction of atom declarations from `nsGkAtomList.h`.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::atom::Atom;
use crate::build::BuildCtx;
use crate::config::GenConfig;
use crate::error::{AtomGenError, Result};

/// Matches lines like `GK_ATOM(foo, "foo", 0x12345678, nsStaticAtom, Atom)`.
///
/// A second, ignored argument before the literal is accepted, quoted or bare:
/// `GK_ATOM(foo, "", "foo", 0x12345678, nsStaticAtom, Atom)`.
static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(concat!(
		r#"(?m)^[ \t]*GK_ATOM\(\s*([^,\s]+)\s*,"#,
		r#"(?:\s*(?:"[^"]*"|[^",\n]*)\s*,)??"#,
		r#"\s*"([^"]*)"\s*,"#,
		r#"\s*(0x[0-9a-fA-F]+)\s*,"#,
		r#"\s*([^,\s]+)\s*,"#,
		r#"\s*([^)\s]+)\s*\)"#,
	))
	.expect("atom declaration pattern is valid")
});

/// Reads the header named by `config` and returns its atoms in header order.
pub fn collect_atoms(config: &GenConfig, ctx: &mut BuildCtx) -> Result<Vec<Atom>> {
	let path = config.header_path();
	let path = std::path::absolute(&path).map_err(|e| AtomGenError::io(&path, e))?;
	ctx.rerun_if_changed(&path);

	let content = fs::read_to_string(&path).map_err(|e| AtomGenError::io(&path, e))?;
	let atoms = parse_atoms(&content)?;
	debug!(path = %path.display(), count = atoms.len(), "collected atoms");
	Ok(atoms)
}

/// Parses every declaration in `content`. Lines that are not declarations are
/// skipped.
pub fn parse_atoms(content: &str) -> Result<Vec<Atom>> {
	PATTERN
		.captures_iter(content)
		.map(|caps| {
			let (_, [ident, value, hash, ty, kind]) = caps.extract();
			Atom::from_tags(ident, value, hash, ty, kind)
		})
		.collect()
}

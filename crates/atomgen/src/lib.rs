//! Source generator for Gecko's static atom table.
//!
//! `atomgen` scrapes `nsGkAtomList.h` for `GK_ATOM(...)` declarations and
//! emits two Rust sources consumed by the style system:
//!
//! - **`atom_macro.rs`**: one `k_nsGkAtoms_*` index constant per atom and the
//!   `atom!` macro, which resolves a string literal to the matching entry of
//!   the linked `nsGkAtoms::sAtoms` array.
//! - **`pseudo_element_definition.rs`**: the pseudo-element and anonymous box
//!   atoms, rendered through a Handlebars template.
//!
//! # Pipeline
//!
//! ```text
//! nsGkAtomList.h
//!   -> collect      (regex extraction into ordered Atom records)
//!   -> macro_table  (constants + atom! rules)     -> atom_macro.rs
//!   -> pseudo       (filter + template rendering) -> pseudo_element_definition.rs
//! ```
//!
//! Both outputs go through [`FileAvoidWrite`], so an unchanged file keeps its
//! mtime and does not trigger downstream rebuilds. Every input read is
//! reported to cargo through [`BuildCtx`].
//!
//! Header order is load-bearing: an atom's position in the header is its
//! index into the static array, and nothing here can detect a reordering.

pub mod atom;
pub mod avoid_write;
pub mod build;
pub mod collect;
pub mod config;
pub mod error;
pub mod macro_table;
pub mod pseudo;
pub mod template;

use tracing::info;
// Binary-only dependencies.
use anyhow as _;
use clap as _;
use tracing_subscriber as _;

pub use atom::{Atom, AtomKind, GeckoType};
pub use avoid_write::{FileAvoidWrite, WriteOutcome};
pub use build::BuildCtx;
pub use config::GenConfig;
pub use error::{AtomGenError, Result};
pub use template::{HandlebarsRenderer, TemplateRenderer};

/// What a [`generate_atoms`] run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateReport {
	pub atoms: usize,
	pub pseudos: usize,
	pub atom_macro: WriteOutcome,
	pub pseudo_definition: WriteOutcome,
}

/// Runs the full pipeline with the bundled Handlebars renderer.
pub fn generate_atoms(config: &GenConfig, ctx: &mut BuildCtx) -> Result<GenerateReport> {
	generate_atoms_with(config, &HandlebarsRenderer::new(), ctx)
}

/// Runs the full pipeline with a caller-supplied template renderer.
///
/// The header is fully parsed before either output is touched. The two
/// outputs are written in sequence, so a failure while rendering the pseudo
/// definition can leave a freshly written `atom_macro.rs` behind.
pub fn generate_atoms_with(
	config: &GenConfig,
	renderer: &dyn TemplateRenderer,
	ctx: &mut BuildCtx,
) -> Result<GenerateReport> {
	let atoms = collect::collect_atoms(config, ctx)?;

	let atom_macro = macro_table::write_atom_macro(&atoms, &config.atom_macro_path())?;
	let pseudo_definition = pseudo::write_pseudo_elements(
		&atoms,
		config.template_path(),
		renderer,
		&config.pseudo_definition_path(),
		ctx,
	)?;

	let report = GenerateReport {
		atoms: atoms.len(),
		pseudos: pseudo::pseudo_atoms(&atoms).count(),
		atom_macro,
		pseudo_definition,
	};
	info!(
		atoms = report.atoms,
		pseudos = report.pseudos,
		atom_macro = ?report.atom_macro,
		pseudo_definition = ?report.pseudo_definition,
		"atoms generated"
	);
	Ok(report)
}

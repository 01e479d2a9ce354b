//! Emission of `pseudo_element_definition.rs` through a template.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::atom::Atom;
use crate::avoid_write::{FileAvoidWrite, WriteOutcome};
use crate::build::BuildCtx;
use crate::error::{AtomGenError, Result};
use crate::template::{Bindings, TemplateRenderer};

/// Name of the template binding holding the filtered atoms.
pub const PSEUDOS_BINDING: &str = "PSEUDOS";

/// Template-facing view of a pseudo-element or anon-box atom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PseudoBinding<'a> {
	pub ident: &'a str,
	pub original_ident: &'a str,
	pub value: &'a str,
	pub hash: &'a str,
	pub ty: &'a str,
	pub atom_type: &'a str,
	/// Position of the atom in the full `nsGkAtoms` table.
	pub index: usize,
	pub pseudo_ident: &'a str,
	pub capitalized_pseudo: String,
	pub is_pseudo: bool,
	pub is_anon_box: bool,
	pub is_inheriting_anon_box: bool,
	pub is_non_inheriting_anon_box: bool,
	pub is_tree_pseudo_element: bool,
}

impl<'a> PseudoBinding<'a> {
	/// Fails if `atom` was declared with a pseudo type but a category that
	/// carries no pseudo name, since the template has nothing to name it by.
	fn new(index: usize, atom: &'a Atom) -> Result<Self> {
		let (Some(pseudo_ident), Some(capitalized_pseudo)) = (atom.pseudo_ident(), atom.capitalized_pseudo()) else {
			return Err(AtomGenError::PseudoIdent {
				ident: atom.original_ident().to_string(),
			});
		};

		Ok(Self {
			ident: atom.ident(),
			original_ident: atom.original_ident(),
			value: atom.value(),
			hash: atom.hash(),
			ty: atom.ty_tag(),
			atom_type: atom.kind_tag(),
			index,
			pseudo_ident,
			capitalized_pseudo,
			is_pseudo: atom.is_pseudo(),
			is_anon_box: atom.is_anon_box(),
			is_inheriting_anon_box: atom.is_inheriting_anon_box(),
			is_non_inheriting_anon_box: atom.is_non_inheriting_anon_box(),
			is_tree_pseudo_element: atom.is_tree_pseudo_element(),
		})
	}
}

/// Atoms declared as `nsICSSPseudoElement` or `nsICSSAnonBoxPseudo`, in
/// header order, paired with their index in the full table.
pub fn pseudo_atoms(atoms: &[Atom]) -> impl Iterator<Item = (usize, &Atom)> {
	atoms.iter().enumerate().filter(|(_, atom)| atom.is_pseudo_definition())
}

/// Builds the bindings handed to the pseudo-element definition template.
pub fn pseudo_bindings(atoms: &[Atom]) -> Result<Bindings> {
	let pseudos = pseudo_atoms(atoms)
		.map(|(i, atom)| PseudoBinding::new(i, atom))
		.collect::<Result<Vec<_>>>()?;
	let value = serde_json::to_value(&pseudos)?;

	let mut bindings = Bindings::new();
	bindings.insert(PSEUDOS_BINDING.to_string(), value);
	Ok(bindings)
}

/// Renders `template` with the pseudo atoms and writes the result to `path`.
pub fn write_pseudo_elements(
	atoms: &[Atom],
	template: &Path,
	renderer: &dyn TemplateRenderer,
	path: &Path,
	ctx: &mut BuildCtx,
) -> Result<WriteOutcome> {
	let template = std::path::absolute(template).map_err(|e| AtomGenError::io(template, e))?;
	ctx.rerun_if_changed(&template);

	let bindings = pseudo_bindings(atoms)?;
	let contents = renderer.render(&template, &bindings)?;

	let mut file = FileAvoidWrite::new(path);
	file.write_str(&contents);
	let outcome = file.close()?;
	debug!(path = %path.display(), ?outcome, "pseudo element definition emitted");
	Ok(outcome)
}

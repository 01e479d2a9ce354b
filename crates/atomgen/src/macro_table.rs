//! Emission of `atom_macro.rs`: the `k_*` index constants and the `atom!`
//! dispatch macro.
//!
//! Every atom gets `pub const k_<ident>: isize = <n>`, where `n` is its
//! position in the header. The `atom!("literal")` rule for that atom offsets
//! the linked `nsGkAtoms::sAtoms` array by the constant, so the emitted order
//! must match the order Gecko lays the array out in.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use tracing::{debug, warn};

use crate::atom::Atom;
use crate::avoid_write::{FileAvoidWrite, WriteOutcome};
use crate::error::Result;

const PRELUDE: &str = "\
/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// Autogenerated file created by regen-atoms.
// DO NOT EDIT DIRECTLY
";

const IMPORTS: &str = "
use gecko_bindings::structs::nsStaticAtom;
use string_cache::Atom;
";

const UNSAFE_STATIC: &str = "
#[inline(always)]
pub unsafe fn atom_from_static(ptr: *const nsStaticAtom) -> Atom {
    Atom::from_static(ptr)
}
";

/// Itanium mangling of `nsGkAtoms::sAtoms`.
const GNU_SYMBOL: &str = "_ZN9nsGkAtoms6sAtomsE";

const MSVC64_SYMBOL: &str = "?sAtoms@nsGkAtoms@@0QEBVnsStaticAtom@@EB";

/// The leading `\x01` stops LLVM from prefixing the 32-bit symbol with `_`.
/// See <https://github.com/rust-lang/rust/issues/36097>.
const MSVC32_SYMBOL: &str = r"\x01?sAtoms@nsGkAtoms@@0QBVnsStaticAtom@@B";

fn satoms_decl(link_name: &str) -> String {
	format!(
		"            #[link_name = \"{link_name}\"]\n            pub static nsGkAtoms_sAtoms: *const nsStaticAtom;\n"
	)
}

fn cfg_if_block() -> String {
	let gnu = satoms_decl(GNU_SYMBOL);
	let msvc64 = satoms_decl(MSVC64_SYMBOL);
	let msvc32 = satoms_decl(MSVC32_SYMBOL);
	format!(
		"
cfg_if! {{
    if #[cfg(not(target_env = \"msvc\"))] {{
        extern {{
{gnu}        }}
    }} else if #[cfg(target_pointer_width = \"64\")] {{
        extern {{
{msvc64}        }}
    }} else {{
        extern {{
{msvc32}        }}
    }}
}}

"
	)
}

fn rule(atom: &Atom) -> String {
	format!(
		"(\"{value}\") =>
    {{{{
        use $crate::string_cache::atom_macro;
        #[allow(unsafe_code)] #[allow(unused_unsafe)]
        unsafe {{ atom_macro::atom_from_static(atom_macro::nsGkAtoms_sAtoms.offset(atom_macro::k_{name})) }}
    }}}};
",
		value = atom.value(),
		name = atom.ident(),
	)
}

/// Renders the complete `atom_macro.rs` source for `atoms`.
pub fn render_atom_macro(atoms: &[Atom]) -> String {
	let mut out = String::new();
	out.push_str(PRELUDE);
	out.push_str(IMPORTS);
	out.push_str(UNSAFE_STATIC);
	out.push_str(&cfg_if_block());

	for (index, atom) in atoms.iter().enumerate() {
		let _ = writeln!(out, "pub const k_{}: isize = {index};", atom.ident());
	}

	out.push_str("\n#[macro_export]\nmacro_rules! atom {\n");
	for atom in atoms {
		out.push_str(&rule(atom));
	}
	out.push_str("}\n");
	out
}

/// Writes `atom_macro.rs` to `path`, leaving it untouched if unchanged.
pub fn write_atom_macro(atoms: &[Atom], path: &Path) -> Result<WriteOutcome> {
	warn_duplicate_literals(atoms);

	let mut file = FileAvoidWrite::new(path);
	file.write_str(&render_atom_macro(atoms));
	let outcome = file.close()?;
	debug!(path = %path.display(), atoms = atoms.len(), ?outcome, "atom macro emitted");
	Ok(outcome)
}

/// `macro_rules!` picks the first matching rule, so a repeated literal makes
/// every later atom with that value unreachable through `atom!`.
fn warn_duplicate_literals(atoms: &[Atom]) {
	let mut seen: HashMap<&str, &str> = HashMap::with_capacity(atoms.len());
	for atom in atoms {
		if let Some(first) = seen.insert(atom.value(), atom.ident()) {
			warn!(
				literal = atom.value(),
				first,
				shadowed = atom.ident(),
				"duplicate atom literal; atom! resolves to the first declaration"
			);
			seen.insert(atom.value(), first);
		}
	}
}

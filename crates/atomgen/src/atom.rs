//! In-memory model of one `GK_ATOM` declaration.
//!
//! An [`Atom`] is built once per declaration line and never mutated. Its
//! position in the collected list is significant: it becomes the index into
//! the linked `nsGkAtoms::sAtoms` array, so callers must preserve header order.

use strum::{Display, EnumString, IntoStaticStr};

use crate::error::{AtomGenError, Result};

/// Prefix applied to every emitted constant and rule name.
pub const IDENT_PREFIX: &str = "nsGkAtoms_";

/// Literal prefix shared by all XUL tree pseudo-elements.
pub const TREE_PSEUDO_PREFIX: &str = ":-moz-tree-";

/// Identifiers that collide with Rust keywords once emitted.
const RESERVED_IDENTS: &[&str] = &["box", "loop", "match", "mod", "ref", "self", "type", "use", "where", "in"];

/// How the native runtime exposes an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum GeckoType {
	#[strum(serialize = "nsStaticAtom")]
	StaticAtom,
	#[strum(serialize = "nsICSSPseudoElement")]
	PseudoElement,
	#[strum(serialize = "nsICSSAnonBoxPseudo")]
	AnonBoxPseudo,
}

impl GeckoType {
	/// Whether atoms of this type belong in the pseudo-element definition.
	pub fn is_pseudo_definition(self) -> bool {
		matches!(self, Self::PseudoElement | Self::AnonBoxPseudo)
	}
}

/// The category tag of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum AtomKind {
	#[strum(serialize = "Atom")]
	Atom,
	#[strum(serialize = "PseudoElementAtom")]
	PseudoElement,
	#[strum(serialize = "NonInheritingAnonBoxAtom")]
	NonInheritingAnonBox,
	#[strum(serialize = "InheritingAnonBoxAtom")]
	InheritingAnonBox,
}

impl AtomKind {
	pub fn is_anon_box(self) -> bool {
		matches!(self, Self::NonInheritingAnonBox | Self::InheritingAnonBox)
	}

	/// Pseudo-elements and anon boxes both carry a pseudo name.
	pub fn has_pseudo_ident(self) -> bool {
		self == Self::PseudoElement || self.is_anon_box()
	}
}

/// Appends `_` to identifiers that would otherwise be Rust keywords.
pub fn map_atom(ident: &str) -> String {
	if RESERVED_IDENTS.contains(&ident) {
		format!("{ident}_")
	} else {
		ident.to_string()
	}
}

/// One atom declaration, with its derived names.
///
/// The type and category tags are kept as written. Tags outside the known
/// sets still produce an atom (it keeps its table index and `atom!` rule) but
/// classify as neither a pseudo-element nor an anon box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
	original_ident: String,
	ident: String,
	value: String,
	hash: String,
	ty_tag: String,
	kind_tag: String,
	ty: Option<GeckoType>,
	kind: Option<AtomKind>,
	pseudo_ident: Option<String>,
}

impl Atom {
	/// Builds an atom from known tags.
	pub fn new(ident: &str, value: &str, hash: &str, ty: GeckoType, kind: AtomKind) -> Result<Self> {
		let ty_tag: &'static str = ty.into();
		let kind_tag: &'static str = kind.into();
		Self::from_tags(ident, value, hash, ty_tag, kind_tag)
	}

	/// Builds an atom from the raw tag strings found in the header.
	///
	/// Fails if an anon box is not declared as `nsICSSAnonBoxPseudo`, or if
	/// a pseudo atom has no prefix segment to strip from its identifier.
	pub fn from_tags(ident: &str, value: &str, hash: &str, ty_tag: &str, kind_tag: &str) -> Result<Self> {
		let ty = ty_tag.parse::<GeckoType>().ok();
		let kind = kind_tag.parse::<AtomKind>().ok();

		if kind.is_some_and(AtomKind::is_anon_box) && ty != Some(GeckoType::AnonBoxPseudo) {
			return Err(AtomGenError::AnonBox {
				ident: ident.to_string(),
				ty: ty_tag.to_string(),
			});
		}

		let pseudo_ident = if kind.is_some_and(AtomKind::has_pseudo_ident) {
			let (_, rest) = ident
				.split_once('_')
				.filter(|(_, rest)| !rest.is_empty())
				.ok_or_else(|| AtomGenError::PseudoIdent {
					ident: ident.to_string(),
				})?;
			Some(rest.to_string())
		} else {
			None
		};

		Ok(Self {
			original_ident: ident.to_string(),
			ident: format!("{IDENT_PREFIX}{}", map_atom(ident)),
			value: value.to_string(),
			hash: hash.to_string(),
			ty_tag: ty_tag.to_string(),
			kind_tag: kind_tag.to_string(),
			ty,
			kind,
			pseudo_ident,
		})
	}

	/// The emitted name, e.g. `nsGkAtoms_foo` or `nsGkAtoms_type_`.
	pub fn ident(&self) -> &str {
		&self.ident
	}

	/// The identifier exactly as written in the header.
	pub fn original_ident(&self) -> &str {
		&self.original_ident
	}

	/// The string the atom interns; also the `atom!` dispatch key.
	pub fn value(&self) -> &str {
		&self.value
	}

	pub fn hash(&self) -> &str {
		&self.hash
	}

	/// The Gecko type, or `None` for a tag outside the known set.
	pub fn ty(&self) -> Option<GeckoType> {
		self.ty
	}

	/// The category, or `None` for a tag outside the known set.
	pub fn kind(&self) -> Option<AtomKind> {
		self.kind
	}

	/// The Gecko type tag as written in the header.
	pub fn ty_tag(&self) -> &str {
		&self.ty_tag
	}

	/// The category tag as written in the header.
	pub fn kind_tag(&self) -> &str {
		&self.kind_tag
	}

	/// Whether this atom belongs in the pseudo-element definition.
	pub fn is_pseudo_definition(&self) -> bool {
		self.ty.is_some_and(GeckoType::is_pseudo_definition)
	}

	/// The identifier without its category prefix, for pseudo atoms only.
	pub fn pseudo_ident(&self) -> Option<&str> {
		self.pseudo_ident.as_deref()
	}

	/// [`Self::pseudo_ident`] with its first character upper-cased.
	pub fn capitalized_pseudo(&self) -> Option<String> {
		let pseudo = self.pseudo_ident.as_deref()?;
		let mut chars = pseudo.chars();
		let first = chars.next()?;
		Some(first.to_uppercase().chain(chars).collect())
	}

	pub fn is_pseudo(&self) -> bool {
		self.kind == Some(AtomKind::PseudoElement)
	}

	pub fn is_anon_box(&self) -> bool {
		self.kind.is_some_and(AtomKind::is_anon_box)
	}

	pub fn is_non_inheriting_anon_box(&self) -> bool {
		self.kind == Some(AtomKind::NonInheritingAnonBox)
	}

	pub fn is_inheriting_anon_box(&self) -> bool {
		self.kind == Some(AtomKind::InheritingAnonBox)
	}

	pub fn is_tree_pseudo_element(&self) -> bool {
		self.value.starts_with(TREE_PSEUDO_PREFIX)
	}
}

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow as _;
use atomgen::{AtomGenError, BuildCtx, GenConfig, WriteOutcome, generate_atoms};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
// Linked into every test target; only the binary and library use these.
use clap as _;
use handlebars as _;
use regex as _;
use serde as _;
use serde_json as _;
use strum as _;
use thiserror as _;
use tracing as _;
use tracing_subscriber as _;

const HEADER: &str = r#"// Generated by StaticAtoms.py
GK_ATOM(_empty, "", 0x00000000, nsStaticAtom, Atom)
GK_ATOM(foo, "", "foo", 0x12345678, nsStaticAtom, Atom)
GK_ATOM(type, "type", 0x0000beef, nsStaticAtom, Atom)
GK_ATOM(PseudoElement_after, ":after", 0x0000abcd, nsICSSPseudoElement, PseudoElementAtom)
GK_ATOM(AnonBox_mozTreeCell, ":-moz-tree-cell", 0x00001234, nsICSSAnonBoxPseudo, InheritingAnonBoxAtom)
"#;

struct Fixture {
	dist: TempDir,
	out: TempDir,
}

impl Fixture {
	fn new(header: &str) -> Self {
		let dist = tempfile::tempdir().unwrap();
		fs::create_dir_all(dist.path().join("include")).unwrap();
		fs::write(dist.path().join("include/nsGkAtomList.h"), header).unwrap();
		Self {
			dist,
			out: tempfile::tempdir().unwrap(),
		}
	}

	fn config(&self) -> GenConfig {
		GenConfig::new(self.dist.path(), self.out.path())
	}

	fn read(&self, name: &str) -> String {
		fs::read_to_string(self.out.path().join(name)).unwrap()
	}
}

fn mtime(path: &Path) -> std::time::SystemTime {
	fs::metadata(path).unwrap().modified().unwrap()
}

#[test]
fn test_generate_writes_both_outputs() {
	let fx = Fixture::new(HEADER);
	let mut ctx = BuildCtx::quiet();

	let report = generate_atoms(&fx.config(), &mut ctx).unwrap();

	assert_eq!(report.atoms, 5);
	assert_eq!(report.pseudos, 2);
	assert_eq!(report.atom_macro, WriteOutcome::Written);
	assert_eq!(report.pseudo_definition, WriteOutcome::Written);

	let atom_macro = fx.read("atom_macro.rs");
	let consts: Vec<&str> = atom_macro.lines().filter(|l| l.starts_with("pub const ")).collect();
	assert_eq!(
		consts,
		[
			"pub const k_nsGkAtoms__empty: isize = 0;",
			"pub const k_nsGkAtoms_foo: isize = 1;",
			"pub const k_nsGkAtoms_type_: isize = 2;",
			"pub const k_nsGkAtoms_PseudoElement_after: isize = 3;",
			"pub const k_nsGkAtoms_AnonBox_mozTreeCell: isize = 4;",
		]
	);
	assert!(atom_macro.contains("(\"foo\") =>"));

	let pseudo = fx.read("pseudo_element_definition.rs");
	assert!(pseudo.contains("    After,\n"));
	assert!(pseudo.contains("    MozTreeCell(Box<[Atom]>),\n"));

	let tracked = ctx.tracked();
	assert_eq!(tracked.len(), 2);
	assert!(tracked[0].ends_with("include/nsGkAtomList.h"));
	assert!(tracked[1].ends_with("templates/pseudo_element_definition.rs.hbs"));
}

#[test]
fn test_second_run_leaves_outputs_untouched() {
	let fx = Fixture::new(HEADER);
	generate_atoms(&fx.config(), &mut BuildCtx::quiet()).unwrap();

	let macro_path = fx.out.path().join("atom_macro.rs");
	let pseudo_path = fx.out.path().join("pseudo_element_definition.rs");
	let first_macro = fx.read("atom_macro.rs");
	let first_pseudo = fx.read("pseudo_element_definition.rs");
	let macro_mtime = mtime(&macro_path);
	let pseudo_mtime = mtime(&pseudo_path);

	let report = generate_atoms(&fx.config(), &mut BuildCtx::quiet()).unwrap();

	assert_eq!(report.atom_macro, WriteOutcome::Unchanged);
	assert_eq!(report.pseudo_definition, WriteOutcome::Unchanged);
	assert_eq!(fx.read("atom_macro.rs"), first_macro);
	assert_eq!(fx.read("pseudo_element_definition.rs"), first_pseudo);
	assert_eq!(mtime(&macro_path), macro_mtime);
	assert_eq!(mtime(&pseudo_path), pseudo_mtime);
}

#[test]
fn test_header_change_rewrites_only_affected_output() {
	let fx = Fixture::new(HEADER);
	generate_atoms(&fx.config(), &mut BuildCtx::quiet()).unwrap();

	let extended = format!("{HEADER}GK_ATOM(zed, \"zed\", 0x00000001, nsStaticAtom, Atom)\n");
	fs::write(fx.dist.path().join("include/nsGkAtomList.h"), extended).unwrap();

	let report = generate_atoms(&fx.config(), &mut BuildCtx::quiet()).unwrap();
	assert_eq!(report.atom_macro, WriteOutcome::Written);
	assert_eq!(report.pseudo_definition, WriteOutcome::Unchanged);
	assert!(fx.read("atom_macro.rs").contains("pub const k_nsGkAtoms_zed: isize = 5;"));
}

#[test]
fn test_no_pseudos_still_renders_definition() {
	let fx = Fixture::new(r#"GK_ATOM(foo, "", "foo", 0x12345678, nsStaticAtom, Atom)"#);

	let report = generate_atoms(&fx.config(), &mut BuildCtx::quiet()).unwrap();
	assert_eq!(report.atoms, 1);
	assert_eq!(report.pseudos, 0);
	assert!(fx.read("pseudo_element_definition.rs").contains("pub enum PseudoElement {"));

	let report = generate_atoms(&fx.config(), &mut BuildCtx::quiet()).unwrap();
	assert_eq!(report.pseudo_definition, WriteOutcome::Unchanged);
}

#[test]
fn test_missing_header_aborts_before_output() {
	let fx = Fixture::new("");
	fs::remove_file(fx.dist.path().join("include/nsGkAtomList.h")).unwrap();

	let err = generate_atoms(&fx.config(), &mut BuildCtx::quiet()).unwrap_err();
	assert!(matches!(err, AtomGenError::Io { .. }));
	assert!(!fx.out.path().join("atom_macro.rs").exists());
	assert!(!fx.out.path().join("pseudo_element_definition.rs").exists());
}

#[test]
fn test_anon_box_violation_aborts_before_output() {
	let fx = Fixture::new(
		r#"GK_ATOM(foo, "foo", 0x1, nsStaticAtom, Atom)
GK_ATOM(AnonBox_bad, ":-moz-bad", 0x2, nsICSSPseudoElement, NonInheritingAnonBoxAtom)
"#,
	);

	let err = generate_atoms(&fx.config(), &mut BuildCtx::quiet()).unwrap_err();
	assert!(matches!(err, AtomGenError::AnonBox { .. }));
	assert!(!fx.out.path().join("atom_macro.rs").exists());
}

#[test]
fn test_unknown_type_tag_keeps_its_index() {
	let fx = Fixture::new(
		r#"GK_ATOM(foo, "foo", 0x1, nsStaticAtom, Atom)
GK_ATOM(bar, "bar", 0x2, nsAtom, Atom)
GK_ATOM(PseudoElement_after, ":after", 0x3, nsICSSPseudoElement, PseudoElementAtom)
"#,
	);

	let report = generate_atoms(&fx.config(), &mut BuildCtx::quiet()).unwrap();

	assert_eq!(report.atoms, 3);
	assert_eq!(report.pseudos, 1);
	let atom_macro = fx.read("atom_macro.rs");
	assert!(atom_macro.contains("pub const k_nsGkAtoms_bar: isize = 1;"));
	assert!(atom_macro.contains("pub const k_nsGkAtoms_PseudoElement_after: isize = 2;"));
	assert!(fx.read("pseudo_element_definition.rs").contains("PseudoElement::After => 2,"));
}

#[test]
fn test_pseudo_type_without_pseudo_name_fails() {
	let fx = Fixture::new(r#"GK_ATOM(PseudoElement_x, ":x", 0x1, nsICSSPseudoElement, Atom)"#);

	let err = generate_atoms(&fx.config(), &mut BuildCtx::quiet()).unwrap_err();
	assert!(matches!(err, AtomGenError::PseudoIdent { ref ident } if ident == "PseudoElement_x"));
	assert!(!fx.out.path().join("pseudo_element_definition.rs").exists());
}

#[test]
fn test_template_failure_keeps_earlier_output() {
	let fx = Fixture::new(HEADER);
	let template = fx.dist.path().join("broken.hbs");
	fs::write(&template, "{{#each PSEUDOS}}{{no_such_field}}{{/each}}").unwrap();

	let err = generate_atoms(&fx.config().with_template(&template), &mut BuildCtx::quiet()).unwrap_err();
	assert!(matches!(err, AtomGenError::Template { .. }));
	assert!(fx.out.path().join("atom_macro.rs").exists());
	assert!(!fx.out.path().join("pseudo_element_definition.rs").exists());
}

#[test]
fn test_cli_wrong_arg_count_prints_usage() {
	let output = Command::new(env!("CARGO_BIN_EXE_regen-atoms"))
		.arg("only-one")
		.output()
		.unwrap();

	assert_eq!(output.status.code(), Some(2));
	assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn test_cli_help_exits_cleanly() {
	let output = Command::new(env!("CARGO_BIN_EXE_regen-atoms"))
		.arg("--help")
		.output()
		.unwrap();

	assert_eq!(output.status.code(), Some(0));
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("Usage"));
	assert_eq!(stdout.matches("Usage").count(), 1);
}

#[test]
fn test_cli_reports_dependencies_on_stdout() {
	let fx = Fixture::new(HEADER);
	let output = Command::new(env!("CARGO_BIN_EXE_regen-atoms"))
		.arg(fx.dist.path())
		.arg(fx.out.path())
		.output()
		.unwrap();

	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
	let stdout = String::from_utf8(output.stdout).unwrap();
	let lines: Vec<&str> = stdout.lines().collect();
	assert_eq!(lines.len(), 2);
	assert!(lines[0].starts_with("cargo:rerun-if-changed="));
	assert!(lines[0].ends_with("include/nsGkAtomList.h"));
	assert!(lines[1].ends_with("pseudo_element_definition.rs.hbs"));
	assert!(fx.out.path().join("atom_macro.rs").exists());
}

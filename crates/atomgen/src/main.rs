//! `regen-atoms`: regenerates the atom table sources from a Gecko build.
//!
//! Stdout carries `cargo:rerun-if-changed` lines for the invoking build
//! script; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use atomgen::{BuildCtx, GenConfig};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{debug, error};
// Library-only dependencies.
use handlebars as _;
#[cfg(test)]
use pretty_assertions as _;
use regex as _;
use serde as _;
use serde_json as _;
use strum as _;
#[cfg(test)]
use tempfile as _;
use thiserror as _;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "regen-atoms")]
#[command(about = "Generate atom_macro.rs and pseudo_element_definition.rs from nsGkAtomList.h")]
#[command(version)]
struct Cli {
	/// Gecko dist directory containing include/nsGkAtomList.h
	dist: PathBuf,

	/// Directory the generated sources are written to
	out: PathBuf,
}

fn main() -> ExitCode {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(err) => return usage_error(err),
	};

	setup_tracing();

	match run(&cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{err:#}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: &Cli) -> anyhow::Result<()> {
	let config = GenConfig::new(&cli.dist, &cli.out);
	debug!(?config, "regenerating atoms");

	let mut ctx = BuildCtx::new();
	atomgen::generate_atoms(&config, &mut ctx)
		.with_context(|| format!("failed to generate atoms from {}", cli.dist.display()))?;
	Ok(())
}

/// Prints usage to stdout and exits with status 2 on a bad invocation.
fn usage_error(err: clap::Error) -> ExitCode {
	let _ = err.print();
	if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
		return ExitCode::SUCCESS;
	}

	println!("{}", Cli::command().render_usage());
	ExitCode::from(2)
}

fn setup_tracing() {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("atomgen=info,regen_atoms=info"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

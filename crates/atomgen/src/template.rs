//! Template rendering seam.

use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use serde_json::{Map, Value};

use crate::error::{AtomGenError, Result};

/// Named values exposed to a template.
pub type Bindings = Map<String, Value>;

/// Renders a template file against a set of bindings.
pub trait TemplateRenderer {
	fn render(&self, template: &Path, bindings: &Bindings) -> Result<String>;
}

/// [`TemplateRenderer`] backed by Handlebars.
///
/// Rendering is strict, so a template that names a missing binding fails
/// instead of producing empty text. Output is not HTML-escaped.
pub struct HandlebarsRenderer {
	registry: Handlebars<'static>,
}

impl Default for HandlebarsRenderer {
	fn default() -> Self {
		Self::new()
	}
}

impl HandlebarsRenderer {
	pub fn new() -> Self {
		let mut registry = Handlebars::new();
		registry.set_strict_mode(true);
		registry.register_escape_fn(handlebars::no_escape);
		Self { registry }
	}
}

impl TemplateRenderer for HandlebarsRenderer {
	fn render(&self, template: &Path, bindings: &Bindings) -> Result<String> {
		let source = fs::read_to_string(template).map_err(|e| AtomGenError::io(template, e))?;
		self.registry
			.render_template(&source, bindings)
			.map_err(|e| AtomGenError::Template {
				path: template.to_path_buf(),
				message: e.to_string(),
			})
	}
}

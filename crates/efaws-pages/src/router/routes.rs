//! Route table.

use std::collections::HashMap;

/// The root path.
pub const ROOT_PATH: &str = "/";

/// Normalizes a requested path; the empty path is the root.
pub fn normalize_path(path: &str) -> &str {
	if path.is_empty() { ROOT_PATH } else { path }
}

/// Exact-match mapping from paths to template names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
	routes: HashMap<String, String>,
}

impl RouteTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates the site's route table.
	pub fn site_default() -> Self {
		Self::new()
			.route("/", "home")
			.route("/about", "about")
			.route("/services", "services")
			.route("/internship", "internship")
			.route("/blog", "blog")
			.route("/contact", "contact")
	}

	/// Adds a route, replacing any previous template for `path`.
	pub fn add(&mut self, path: impl Into<String>, template: impl Into<String>) {
		self.routes.insert(path.into(), template.into());
	}

	/// Builder form of [`add`](Self::add).
	pub fn route(mut self, path: impl Into<String>, template: impl Into<String>) -> Self {
		self.add(path, template);
		self
	}

	/// Returns the template name for `path`.
	pub fn resolve(&self, path: &str) -> Option<&str> {
		self.routes.get(path).map(String::as_str)
	}

	/// Checks whether `path` is registered.
	pub fn contains(&self, path: &str) -> bool {
		self.routes.contains_key(path)
	}

	/// Registered paths, sorted.
	pub fn paths(&self) -> Vec<&str> {
		let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
		paths.sort_unstable();
		paths
	}

	/// Number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns true if no routes are registered.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

//! Page templates.
//!
//! Each page is a pure function returning its markup. The site pages are
//! compiled into the binary from `templates/*.html`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A template function.
pub type TemplateFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Names of the built-in site templates.
pub const SITE_TEMPLATES: [&str; 6] = ["home", "about", "services", "internship", "blog", "contact"];

const HOME: &str = include_str!("templates/home.html");
const ABOUT: &str = include_str!("templates/about.html");
const SERVICES: &str = include_str!("templates/services.html");
const INTERNSHIP: &str = include_str!("templates/internship.html");
const BLOG: &str = include_str!("templates/blog.html");
const CONTACT: &str = include_str!("templates/contact.html");

/// Registry mapping template names to template functions.
#[derive(Clone, Default)]
pub struct TemplateRegistry {
	templates: HashMap<String, TemplateFn>,
}

impl fmt::Debug for TemplateRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<&String> = self.templates.keys().collect();
		names.sort();
		f.debug_struct("TemplateRegistry")
			.field("templates", &names)
			.finish()
	}
}

impl TemplateRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates the registry holding the six site pages.
	pub fn site_default() -> Self {
		Self::new()
			.with_static("home", HOME)
			.with_static("about", ABOUT)
			.with_static("services", SERVICES)
			.with_static("internship", INTERNSHIP)
			.with_static("blog", BLOG)
			.with_static("contact", CONTACT)
	}

	/// Registers a template function, replacing any previous one of that name.
	pub fn register<F>(&mut self, name: impl Into<String>, template: F)
	where
		F: Fn() -> String + Send + Sync + 'static,
	{
		self.templates.insert(name.into(), Arc::new(template));
	}

	/// Builder form of [`register`](Self::register).
	pub fn with<F>(mut self, name: impl Into<String>, template: F) -> Self
	where
		F: Fn() -> String + Send + Sync + 'static,
	{
		self.register(name, template);
		self
	}

	/// Registers a template returning fixed markup.
	pub fn with_static(self, name: impl Into<String>, markup: &'static str) -> Self {
		self.with(name, move || markup.to_string())
	}

	/// Removes a template.
	pub fn unregister(&mut self, name: &str) -> Option<TemplateFn> {
		self.templates.remove(name)
	}

	/// Renders the named template, or `None` if it is not registered.
	pub fn get(&self, name: &str) -> Option<String> {
		self.templates.get(name).map(|template| template())
	}

	/// Checks whether a template is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.templates.contains_key(name)
	}

	/// Number of registered templates.
	pub fn len(&self) -> usize {
		self.templates.len()
	}

	/// Returns true if no templates are registered.
	pub fn is_empty(&self) -> bool {
		self.templates.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_site_default_has_every_page() {
		let registry = TemplateRegistry::site_default();
		assert_eq!(registry.len(), SITE_TEMPLATES.len());
		for name in SITE_TEMPLATES {
			assert!(registry.contains(name), "missing template {}", name);
		}
	}

	#[rstest]
	#[case("home", "Your Trusted Partner in AI Solutions")]
	#[case("about", "About E-Faws Tech Services Pvt Ltd")]
	#[case("services", "Our Services")]
	#[case("internship", "AI Internship Program")]
	#[case("blog", "AI Insights & Resources")]
	#[case("contact", "Get In Touch With Us")]
	fn test_page_headline(#[case] name: &str, #[case] headline: &str) {
		let markup = TemplateRegistry::site_default().get(name).unwrap();
		assert!(markup.contains(headline));
	}

	#[rstest]
	fn test_templates_are_deterministic() {
		let registry = TemplateRegistry::site_default();
		assert_eq!(registry.get("home"), registry.get("home"));
	}

	#[rstest]
	fn test_unknown_template_is_none() {
		assert_eq!(TemplateRegistry::site_default().get("pricing"), None);
	}

	#[rstest]
	fn test_register_and_unregister() {
		let mut registry = TemplateRegistry::new().with("pricing", || "<h1>Pricing</h1>".to_string());
		assert_eq!(registry.get("pricing").as_deref(), Some("<h1>Pricing</h1>"));

		assert!(registry.unregister("pricing").is_some());
		assert!(registry.is_empty());
	}

	#[rstest]
	#[case("home", &["tab-btn", "logo-track", "popupOverlay", "openPdfModal", "data-route"])]
	#[case("services", &["tab-btn", "service-card"])]
	#[case("internship", &["faq-item", "faq-question"])]
	#[case("blog", &["newsletter-form", "name=\"phone\""])]
	fn test_feature_hooks_present(#[case] name: &str, #[case] hooks: &[&str]) {
		let markup = TemplateRegistry::site_default().get(name).unwrap();
		for hook in hooks {
			assert!(markup.contains(hook), "{} lacks {}", name, hook);
		}
	}
}

//! Navigation origins and their history semantics.

use std::fmt;

/// What started a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationSource {
	/// A same-document link click or a programmatic navigation.
	Link,
	/// A browser back/forward step.
	PopState,
	/// The path the page was loaded with.
	InitialLoad,
	/// The fallback to the root path after an unknown route.
	Redirect,
}

impl NavigationSource {
	/// Whether the navigation adds a history entry.
	///
	/// Only link navigations push; pops, the initial load and redirects keep
	/// the history length unchanged.
	pub fn pushes_history(&self) -> bool {
		matches!(self, Self::Link)
	}
}

impl fmt::Display for NavigationSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Link => "link",
			Self::PopState => "popstate",
			Self::InitialLoad => "initial load",
			Self::Redirect => "redirect",
		};
		f.write_str(name)
	}
}

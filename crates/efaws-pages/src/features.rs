//! Page feature initializers.
//!
//! After the router installs a page it runs the widgets of that page. The
//! set of pages is closed ([`PageKind`]) and every page maps to a fixed list
//! of [`Widget`]s:
//!
//! | Page       | Widgets                                            |
//! |------------|----------------------------------------------------|
//! | home       | service tabs, logo slider, service popup, PDF modal |
//! | services   | service tabs                                       |
//! | blog       | newsletter form                                    |
//! | internship | FAQ accordion                                      |
//! | about      | none                                               |
//! | contact    | none                                               |
//!
//! A widget whose elements are missing from the document does nothing and
//! installs no listeners. Listeners and intervals go into the
//! [`EventRegistry`] of the mount cycle.

use crate::dom::{Dom, DomError};
use crate::events::EventRegistry;
use crate::settings::FeatureSettings;
use crate::{debug_log, error_log};
use std::fmt;
use std::rc::Rc;

pub mod faq;
pub mod newsletter;
pub mod pdf_modal;
pub mod popup;
pub mod slider;
pub mod tabs;

/// Error type for widget initialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
	/// A host operation failed while wiring a widget.
	#[error("Failed to initialize {widget}: {source}")]
	Dom {
		/// The failing widget.
		widget: Widget,
		/// Underlying host error.
		#[source]
		source: DomError,
	},
}

impl FeatureError {
	pub(crate) fn dom(widget: Widget) -> impl FnOnce(DomError) -> Self {
		move |source| Self::Dom { widget, source }
	}
}

/// The site pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
	/// `home`
	Home,
	/// `about`
	About,
	/// `services`
	Services,
	/// `internship`
	Internship,
	/// `blog`
	Blog,
	/// `contact`
	Contact,
}

impl PageKind {
	/// Resolves a template name.
	pub fn from_template(name: &str) -> Option<Self> {
		match name {
			"home" => Some(Self::Home),
			"about" => Some(Self::About),
			"services" => Some(Self::Services),
			"internship" => Some(Self::Internship),
			"blog" => Some(Self::Blog),
			"contact" => Some(Self::Contact),
			_ => None,
		}
	}

	/// Returns the template name.
	pub fn template_name(&self) -> &'static str {
		match self {
			Self::Home => "home",
			Self::About => "about",
			Self::Services => "services",
			Self::Internship => "internship",
			Self::Blog => "blog",
			Self::Contact => "contact",
		}
	}

	/// Widgets initialized for this page, in order.
	pub fn widgets(&self) -> &'static [Widget] {
		match self {
			Self::Home => &[
				Widget::ServiceTabs,
				Widget::LogoSlider,
				Widget::ServicePopup,
				Widget::PdfModal,
			],
			Self::Services => &[Widget::ServiceTabs],
			Self::Blog => &[Widget::NewsletterForm],
			Self::Internship => &[Widget::FaqAccordion],
			Self::About | Self::Contact => &[],
		}
	}
}

/// Interactive page widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
	/// Category tabs filtering service cards.
	ServiceTabs,
	/// Partner logo carousel.
	LogoSlider,
	/// Service card detail popup.
	ServicePopup,
	/// AI book PDF viewer.
	PdfModal,
	/// Newsletter phone subscription.
	NewsletterForm,
	/// Internship FAQ accordion.
	FaqAccordion,
}

impl Widget {
	/// Every widget.
	pub const ALL: [Widget; 6] = [
		Widget::ServiceTabs,
		Widget::LogoSlider,
		Widget::ServicePopup,
		Widget::PdfModal,
		Widget::NewsletterForm,
		Widget::FaqAccordion,
	];

	/// Returns the widget name.
	pub fn name(&self) -> &'static str {
		match self {
			Self::ServiceTabs => "service tabs",
			Self::LogoSlider => "logo slider",
			Self::ServicePopup => "service popup",
			Self::PdfModal => "PDF modal",
			Self::NewsletterForm => "newsletter form",
			Self::FaqAccordion => "FAQ accordion",
		}
	}

	/// Wires the widget into the current document.
	pub fn initialize<D: Dom>(&self, cx: &mut FeatureContext<'_, D>) -> Result<(), FeatureError> {
		match self {
			Self::ServiceTabs => tabs::initialize(cx),
			Self::LogoSlider => slider::initialize(cx),
			Self::ServicePopup => popup::initialize(cx),
			Self::PdfModal => pdf_modal::initialize(cx),
			Self::NewsletterForm => newsletter::initialize(cx),
			Self::FaqAccordion => faq::initialize(cx),
		}
	}
}

impl fmt::Display for Widget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// What a widget needs to wire itself up.
pub struct FeatureContext<'a, D: Dom> {
	/// The host document.
	pub dom: &'a Rc<D>,
	/// Registry of the current mount cycle.
	pub registry: &'a mut EventRegistry<D>,
	/// Feature settings.
	pub settings: &'a FeatureSettings,
}

impl<'a, D: Dom> FeatureContext<'a, D> {
	/// Creates a context.
	pub fn new(
		dom: &'a Rc<D>,
		registry: &'a mut EventRegistry<D>,
		settings: &'a FeatureSettings,
	) -> Self {
		Self {
			dom,
			registry,
			settings,
		}
	}
}

/// Runs the widgets of `page`.
///
/// A failing widget is logged and skipped; the remaining widgets still run.
/// Returns the failures.
pub fn initialize_page<D: Dom>(page: PageKind, cx: &mut FeatureContext<'_, D>) -> Vec<FeatureError> {
	let mut failures = Vec::new();

	for widget in page.widgets() {
		match widget.initialize(cx) {
			Ok(()) => debug_log!("Initialized {} on {}", widget, page.template_name()),
			Err(err) => {
				error_log!("{}", err);
				failures.push(err);
			}
		}
	}

	failures
}

/// Runs the widgets of the page rendered by `template`; unknown names do nothing.
pub fn initialize_template<D: Dom>(
	template: &str,
	cx: &mut FeatureContext<'_, D>,
) -> Vec<FeatureError> {
	match PageKind::from_template(template) {
		Some(page) => initialize_page(page, cx),
		None => {
			debug_log!("No page features for template '{}'", template);
			Vec::new()
		}
	}
}

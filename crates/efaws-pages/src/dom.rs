//! DOM abstraction layer.
//!
//! The router, the head updater and the page features never talk to
//! `web_sys` directly. They go through the [`Dom`] trait, which is implemented
//! by [`WebDom`](web::WebDom) in the browser and by
//! [`MemoryDom`](crate::testing::MemoryDom) in native tests.
//!
//! Element lookups use the typed [`Selector`] instead of raw CSS strings so a
//! host without a CSS engine can still answer them.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Error type for host document operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
	/// The host has no window or document.
	#[error("Document unavailable: {0}")]
	Unavailable(String),
	/// An element could not be created or attached.
	#[error("Failed to create <{0}> element")]
	CreateElement(String),
	/// A DOM mutation was rejected by the host.
	#[error("DOM operation '{operation}' failed: {reason}")]
	Operation {
		/// The attempted operation.
		operation: &'static str,
		/// Host-provided reason.
		reason: String,
	},
	/// A network request issued on behalf of the page failed.
	#[error("Request failed: {0}")]
	Request(String),
}

impl DomError {
	/// Creates an [`DomError::Operation`] error.
	pub fn operation(operation: &'static str, reason: impl Into<String>) -> Self {
		Self::Operation {
			operation,
			reason: reason.into(),
		}
	}
}

/// A typed element selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
	/// `#id`
	Id(String),
	/// `.class`
	Class(String),
	/// `tag`
	Tag(String),
	/// `[name]`
	HasAttribute(String),
	/// `tag[name="value"]`, or `[name="value"]` without a tag.
	AttributeEquals {
		/// Optional tag name restriction.
		tag: Option<String>,
		/// Attribute name.
		name: String,
		/// Expected attribute value.
		value: String,
	},
	/// `ancestor descendant`
	Descendant(Box<Selector>, Box<Selector>),
}

impl Selector {
	/// `#id`
	pub fn id(id: impl Into<String>) -> Self {
		Self::Id(id.into())
	}

	/// `.class`
	pub fn class(class: impl Into<String>) -> Self {
		Self::Class(class.into())
	}

	/// `tag`
	pub fn tag(tag: impl Into<String>) -> Self {
		Self::Tag(tag.into())
	}

	/// `[name]`
	pub fn has_attribute(name: impl Into<String>) -> Self {
		Self::HasAttribute(name.into())
	}

	/// `[name="value"]`
	pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self::AttributeEquals {
			tag: None,
			name: name.into(),
			value: value.into(),
		}
	}

	/// `tag[name="value"]`
	pub fn tag_attribute(
		tag: impl Into<String>,
		name: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		Self::AttributeEquals {
			tag: Some(tag.into()),
			name: name.into(),
			value: value.into(),
		}
	}

	/// Restricts `self` to descendants of `ancestor`.
	pub fn within(self, ancestor: Selector) -> Self {
		Self::Descendant(Box::new(ancestor), Box::new(self))
	}

	/// Renders the selector as a CSS selector string.
	pub fn to_css(&self) -> String {
		match self {
			Self::Id(id) => format!("#{}", id),
			Self::Class(class) => format!(".{}", class),
			Self::Tag(tag) => tag.clone(),
			Self::HasAttribute(name) => format!("[{}]", name),
			Self::AttributeEquals { tag, name, value } => format!(
				"{}[{}=\"{}\"]",
				tag.as_deref().unwrap_or(""),
				name,
				value.replace('\\', "\\\\").replace('"', "\\\"")
			),
			Self::Descendant(ancestor, descendant) => {
				format!("{} {}", ancestor.to_css(), descendant.to_css())
			}
		}
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_css())
	}
}

/// DOM event types the site listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	/// `click`
	Click,
	/// `submit`
	Submit,
	/// `scroll`
	Scroll,
	/// `popstate`
	PopState,
	/// `mouseenter`
	MouseEnter,
	/// `mouseleave`
	MouseLeave,
}

impl EventKind {
	/// Returns the DOM event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Click => "click",
			Self::Submit => "submit",
			Self::Scroll => "scroll",
			Self::PopState => "popstate",
			Self::MouseEnter => "mouseenter",
			Self::MouseLeave => "mouseleave",
		}
	}
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a, E> {
	/// The global `window`.
	Window,
	/// The `document`.
	Document,
	/// A specific element.
	Element(&'a E),
}

/// Shared event handler.
pub type Handler<D> = Rc<dyn Fn(&<D as Dom>::Event)>;

/// Callback invoked when a fire-and-forget request completes.
pub type RequestCallback = Box<dyn FnOnce(Result<(), DomError>)>;

/// Host document and window operations.
///
/// The listener and timer handles are RAII guards: dropping a
/// [`Dom::Listener`] detaches the listener and dropping a [`Dom::Timer`]
/// cancels the interval.
pub trait Dom: Sized + 'static {
	/// Element handle.
	type Element: Clone + PartialEq + fmt::Debug + 'static;
	/// Event passed to handlers.
	type Event: 'static;
	/// Attached listener guard.
	type Listener: 'static;
	/// Repeating timer guard.
	type Timer: 'static;

	// Document

	/// Returns the document title.
	fn title(&self) -> String;

	/// Sets the document title.
	fn set_title(&self, title: &str);

	/// Returns the first element matching `selector`.
	fn query(&self, selector: &Selector) -> Option<Self::Element> {
		self.query_all(selector).into_iter().next()
	}

	/// Returns every element matching `selector`, in document order.
	fn query_all(&self, selector: &Selector) -> Vec<Self::Element>;

	/// Returns descendants of `root` matching `selector`, in document order.
	fn query_within(&self, root: &Self::Element, selector: &Selector) -> Vec<Self::Element>;

	/// Returns the closest inclusive ancestor of `element` matching `selector`.
	fn closest(&self, element: &Self::Element, selector: &Selector) -> Option<Self::Element>;

	/// Returns the parent element.
	fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

	/// Returns the `<body>` element.
	fn body(&self) -> Option<Self::Element>;

	/// Creates an element with `attributes` and appends it to `<head>`.
	fn append_to_head(
		&self,
		tag: &str,
		attributes: &[(&str, &str)],
	) -> Result<Self::Element, DomError>;

	// Elements

	/// Returns an attribute value.
	fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

	/// Sets an attribute value.
	fn set_attribute(&self, element: &Self::Element, name: &str, value: &str)
	-> Result<(), DomError>;

	/// Returns the element's inner HTML.
	fn inner_html(&self, element: &Self::Element) -> String;

	/// Replaces the element's children with parsed `html`.
	fn set_inner_html(&self, element: &Self::Element, html: &str) -> Result<(), DomError>;

	/// Checks for a class.
	fn has_class(&self, element: &Self::Element, class: &str) -> bool;

	/// Adds a class.
	fn add_class(&self, element: &Self::Element, class: &str);

	/// Removes a class.
	fn remove_class(&self, element: &Self::Element, class: &str);

	/// Toggles a class, returning whether it is now present.
	fn toggle_class(&self, element: &Self::Element, class: &str) -> bool {
		if self.has_class(element, class) {
			self.remove_class(element, class);
			false
		} else {
			self.add_class(element, class);
			true
		}
	}

	/// Sets an inline style property.
	fn set_style(&self, element: &Self::Element, property: &str, value: &str)
	-> Result<(), DomError>;

	/// Returns the inline style property value, if set.
	fn style(&self, element: &Self::Element, property: &str) -> Option<String>;

	/// Returns the rendered width in pixels.
	fn client_width(&self, element: &Self::Element) -> f64;

	/// Whether the element is inside the viewport (bottom edge allowed 20% below).
	fn is_in_viewport(&self, element: &Self::Element) -> bool;

	/// Appends a deep clone of `source` to `parent`.
	fn append_clone(&self, parent: &Self::Element, source: &Self::Element) -> Result<(), DomError>;

	/// Removes the element from the document.
	fn remove(&self, element: &Self::Element);

	/// Returns the value of the named control inside `form`.
	fn form_value(&self, form: &Self::Element, name: &str) -> Option<String>;

	/// Resets a form to its initial values.
	fn reset_form(&self, form: &Self::Element);

	// Events

	/// Attaches `handler` for `kind` events on `target`.
	fn listen(
		&self,
		target: Target<'_, Self::Element>,
		kind: EventKind,
		handler: Handler<Self>,
	) -> Result<Self::Listener, DomError>;

	/// Returns the element that dispatched the event.
	fn event_target(&self, event: &Self::Event) -> Option<Self::Element>;

	/// Prevents the browser default action.
	fn prevent_default(&self, event: &Self::Event);

	// Window

	/// Runs `callback` once after `delay`.
	fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>);

	/// Runs `callback` every `period` until the returned guard is dropped.
	fn set_interval(&self, period: Duration, callback: Rc<dyn Fn()>) -> Self::Timer;

	/// Returns `location.pathname`.
	fn location_path(&self) -> String;

	/// Pushes a same-document history entry.
	fn push_history(&self, path: &str) -> Result<(), DomError>;

	/// Smoothly scrolls the viewport to the top.
	fn scroll_to_top(&self);

	/// Shows a blocking alert.
	fn alert(&self, message: &str);

	/// POSTs `body` as JSON to `url` without blocking the caller.
	fn post_json(&self, url: &str, body: serde_json::Value, on_complete: RequestCallback);
}

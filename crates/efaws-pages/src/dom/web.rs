//! Browser implementation of [`Dom`] over `web_sys`.

use super::{Dom, DomError, EventKind, Handler, RequestCallback, Selector, Target};
use crate::warn_log;
use gloo_timers::callback::{Interval, Timeout};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn js_reason(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn millis(duration: Duration) -> u32 {
	u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

fn collect_elements(list: web_sys::NodeList) -> Vec<web_sys::Element> {
	(0..list.length())
		.filter_map(|index| list.item(index))
		.filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
		.collect()
}

/// A listener attached with `addEventListener`, removed again on drop.
pub struct WebListener {
	target: web_sys::EventTarget,
	kind: &'static str,
	closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for WebListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
	}
}

impl std::fmt::Debug for WebListener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WebListener")
			.field("kind", &self.kind)
			.finish()
	}
}

/// The live browser document.
#[derive(Debug, Clone)]
pub struct WebDom {
	window: web_sys::Window,
	document: web_sys::Document,
}

impl WebDom {
	/// Binds to the global `window` and its `document`.
	pub fn new() -> Result<Self, DomError> {
		let window =
			web_sys::window().ok_or_else(|| DomError::Unavailable("no global window".into()))?;
		let document = window
			.document()
			.ok_or_else(|| DomError::Unavailable("window has no document".into()))?;

		Ok(Self { window, document })
	}

	/// Returns the underlying window.
	pub fn window(&self) -> &web_sys::Window {
		&self.window
	}

	fn html_element<'a>(
		element: &'a web_sys::Element,
		operation: &'static str,
	) -> Result<&'a web_sys::HtmlElement, DomError> {
		element
			.dyn_ref::<web_sys::HtmlElement>()
			.ok_or_else(|| DomError::operation(operation, "element is not an HTMLElement"))
	}
}

impl Dom for WebDom {
	type Element = web_sys::Element;
	type Event = web_sys::Event;
	type Listener = WebListener;
	type Timer = Interval;

	fn title(&self) -> String {
		self.document.title()
	}

	fn set_title(&self, title: &str) {
		self.document.set_title(title);
	}

	fn query(&self, selector: &Selector) -> Option<Self::Element> {
		match self.document.query_selector(&selector.to_css()) {
			Ok(found) => found,
			Err(err) => {
				warn_log!("Invalid selector '{}': {}", selector, js_reason(&err));
				None
			}
		}
	}

	fn query_all(&self, selector: &Selector) -> Vec<Self::Element> {
		match self.document.query_selector_all(&selector.to_css()) {
			Ok(list) => collect_elements(list),
			Err(err) => {
				warn_log!("Invalid selector '{}': {}", selector, js_reason(&err));
				Vec::new()
			}
		}
	}

	fn query_within(&self, root: &Self::Element, selector: &Selector) -> Vec<Self::Element> {
		root.query_selector_all(&selector.to_css())
			.map(collect_elements)
			.unwrap_or_default()
	}

	fn closest(&self, element: &Self::Element, selector: &Selector) -> Option<Self::Element> {
		element.closest(&selector.to_css()).ok().flatten()
	}

	fn parent(&self, element: &Self::Element) -> Option<Self::Element> {
		element.parent_element()
	}

	fn body(&self) -> Option<Self::Element> {
		self.document.body().map(|body| body.unchecked_into())
	}

	fn append_to_head(
		&self,
		tag: &str,
		attributes: &[(&str, &str)],
	) -> Result<Self::Element, DomError> {
		let element = self
			.document
			.create_element(tag)
			.map_err(|_| DomError::CreateElement(tag.to_string()))?;
		for (name, value) in attributes {
			self.set_attribute(&element, name, value)?;
		}

		let head = self
			.document
			.head()
			.ok_or_else(|| DomError::Unavailable("document has no <head>".into()))?;
		head.append_child(&element)
			.map_err(|err| DomError::operation("appendChild", js_reason(&err)))?;

		Ok(element)
	}

	fn attribute(&self, element: &Self::Element, name: &str) -> Option<String> {
		element.get_attribute(name)
	}

	fn set_attribute(
		&self,
		element: &Self::Element,
		name: &str,
		value: &str,
	) -> Result<(), DomError> {
		element
			.set_attribute(name, value)
			.map_err(|err| DomError::operation("setAttribute", js_reason(&err)))
	}

	fn inner_html(&self, element: &Self::Element) -> String {
		element.inner_html()
	}

	fn set_inner_html(&self, element: &Self::Element, html: &str) -> Result<(), DomError> {
		element.set_inner_html(html);
		Ok(())
	}

	fn has_class(&self, element: &Self::Element, class: &str) -> bool {
		element.class_list().contains(class)
	}

	fn add_class(&self, element: &Self::Element, class: &str) {
		let _ = element.class_list().add_1(class);
	}

	fn remove_class(&self, element: &Self::Element, class: &str) {
		let _ = element.class_list().remove_1(class);
	}

	fn set_style(
		&self,
		element: &Self::Element,
		property: &str,
		value: &str,
	) -> Result<(), DomError> {
		Self::html_element(element, "style.setProperty")?
			.style()
			.set_property(property, value)
			.map_err(|err| DomError::operation("style.setProperty", js_reason(&err)))
	}

	fn style(&self, element: &Self::Element, property: &str) -> Option<String> {
		element
			.dyn_ref::<web_sys::HtmlElement>()
			.and_then(|html| html.style().get_property_value(property).ok())
			.filter(|value| !value.is_empty())
	}

	fn client_width(&self, element: &Self::Element) -> f64 {
		f64::from(element.client_width())
	}

	fn is_in_viewport(&self, element: &Self::Element) -> bool {
		let rect = element.get_bounding_client_rect();
		let fallback = self
			.document
			.document_element()
			.map(|root| (f64::from(root.client_height()), f64::from(root.client_width())))
			.unwrap_or_default();
		let height = self
			.window
			.inner_height()
			.ok()
			.and_then(|value| value.as_f64())
			.unwrap_or(fallback.0);
		let width = self
			.window
			.inner_width()
			.ok()
			.and_then(|value| value.as_f64())
			.unwrap_or(fallback.1);

		rect.top() >= 0.0
			&& rect.left() >= 0.0
			&& rect.bottom() <= height * 1.2
			&& rect.right() <= width
	}

	fn append_clone(&self, parent: &Self::Element, source: &Self::Element) -> Result<(), DomError> {
		let clone = source
			.clone_node_with_deep(true)
			.map_err(|err| DomError::operation("cloneNode", js_reason(&err)))?;
		parent
			.append_child(&clone)
			.map(|_| ())
			.map_err(|err| DomError::operation("appendChild", js_reason(&err)))
	}

	fn remove(&self, element: &Self::Element) {
		element.remove();
	}

	fn form_value(&self, form: &Self::Element, name: &str) -> Option<String> {
		let selector = Selector::attribute("name", name);
		form.query_selector(&selector.to_css())
			.ok()
			.flatten()
			.and_then(|control| control.dyn_into::<web_sys::HtmlInputElement>().ok())
			.map(|input| input.value())
	}

	fn reset_form(&self, form: &Self::Element) {
		if let Some(form) = form.dyn_ref::<web_sys::HtmlFormElement>() {
			form.reset();
		}
	}

	fn listen(
		&self,
		target: Target<'_, Self::Element>,
		kind: EventKind,
		handler: Handler<Self>,
	) -> Result<Self::Listener, DomError> {
		let target: web_sys::EventTarget = match target {
			Target::Window => self.window.clone().into(),
			Target::Document => self.document.clone().into(),
			Target::Element(element) => element.clone().into(),
		};

		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
			handler(&event);
		}) as Box<dyn FnMut(web_sys::Event)>);

		target
			.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
			.map_err(|err| DomError::operation("addEventListener", js_reason(&err)))?;

		Ok(WebListener {
			target,
			kind: kind.as_str(),
			closure,
		})
	}

	fn event_target(&self, event: &Self::Event) -> Option<Self::Element> {
		event
			.target()
			.and_then(|target| target.dyn_into::<web_sys::Element>().ok())
	}

	fn prevent_default(&self, event: &Self::Event) {
		event.prevent_default();
	}

	fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
		Timeout::new(millis(delay), callback).forget();
	}

	fn set_interval(&self, period: Duration, callback: Rc<dyn Fn()>) -> Self::Timer {
		Interval::new(millis(period), move || callback())
	}

	fn location_path(&self) -> String {
		self.window
			.location()
			.pathname()
			.unwrap_or_else(|_| "/".to_string())
	}

	fn push_history(&self, path: &str) -> Result<(), DomError> {
		let history = self
			.window
			.history()
			.map_err(|err| DomError::operation("history", js_reason(&err)))?;
		history
			.push_state_with_url(&JsValue::NULL, "", Some(path))
			.map_err(|err| DomError::operation("pushState", js_reason(&err)))
	}

	fn scroll_to_top(&self) {
		let options = web_sys::ScrollToOptions::new();
		options.set_top(0.0);
		options.set_behavior(web_sys::ScrollBehavior::Smooth);
		self.window.scroll_to_with_scroll_to_options(&options);
	}

	fn alert(&self, message: &str) {
		let _ = self.window.alert_with_message(message);
	}

	fn post_json(&self, url: &str, body: serde_json::Value, on_complete: RequestCallback) {
		use gloo_net::http::Request;

		let url = url.to_string();
		wasm_bindgen_futures::spawn_local(async move {
			let result = async {
				let response = Request::post(&url)
					.json(&body)
					.map_err(|e| DomError::Request(format!("Failed to create request: {:?}", e)))?
					.send()
					.await
					.map_err(|e| DomError::Request(format!("Failed to send request: {:?}", e)))?;

				if response.ok() {
					Ok(())
				} else {
					Err(DomError::Request(format!(
						"Submit failed with status: {}",
						response.status()
					)))
				}
			}
			.await;

			on_complete(result);
		});
	}
}

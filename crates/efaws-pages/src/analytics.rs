//! Page view analytics.
//!
//! The router reports every completed navigation to a [`PageViewSink`].
//! Vendor integrations live behind that trait so they can be swapped or
//! recorded in tests; [`AnalyticsHub`] fans one page view out to several
//! sinks.

use std::fmt;
use std::rc::Rc;

/// Receiver of page view notifications.
pub trait PageViewSink {
	/// Called after a page has been installed.
	fn on_page_view(&self, path: &str, title: &str);
}

impl<F> PageViewSink for F
where
	F: Fn(&str, &str),
{
	fn on_page_view(&self, path: &str, title: &str) {
		self(path, title)
	}
}

/// Forwards page views to every registered sink.
#[derive(Default, Clone)]
pub struct AnalyticsHub {
	sinks: Vec<Rc<dyn PageViewSink>>,
}

impl fmt::Debug for AnalyticsHub {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AnalyticsHub")
			.field("sinks", &self.sinks.len())
			.finish()
	}
}

impl AnalyticsHub {
	/// Creates a hub without sinks.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a sink.
	pub fn add(&mut self, sink: Rc<dyn PageViewSink>) {
		self.sinks.push(sink);
	}

	/// Builder form of [`add`](Self::add).
	pub fn with(mut self, sink: Rc<dyn PageViewSink>) -> Self {
		self.add(sink);
		self
	}

	/// Number of sinks.
	pub fn len(&self) -> usize {
		self.sinks.len()
	}

	/// Returns true if no sinks are registered.
	pub fn is_empty(&self) -> bool {
		self.sinks.is_empty()
	}
}

impl PageViewSink for AnalyticsHub {
	fn on_page_view(&self, path: &str, title: &str) {
		for sink in &self.sinks {
			sink.on_page_view(path, title);
		}
	}
}

#[cfg(target_arch = "wasm32")]
pub use web::{GlobalAnalytics, GtagAnalytics};

#[cfg(target_arch = "wasm32")]
mod web {
	use super::PageViewSink;
	use crate::warn_log;
	use wasm_bindgen::{JsCast, JsValue};

	fn global_function(target: &JsValue, name: &str) -> Option<js_sys::Function> {
		js_sys::Reflect::get(target, &JsValue::from_str(name))
			.ok()
			.and_then(|value| value.dyn_into::<js_sys::Function>().ok())
	}

	/// Forwards page views to `window.analyticsManager.trackPageView`.
	///
	/// The page-level manager may load after the router or not at all; a
	/// missing manager is skipped silently.
	#[derive(Debug, Clone)]
	pub struct GlobalAnalytics {
		window: web_sys::Window,
	}

	impl GlobalAnalytics {
		/// Binds to `window`.
		pub fn new(window: web_sys::Window) -> Self {
			Self { window }
		}
	}

	impl PageViewSink for GlobalAnalytics {
		fn on_page_view(&self, path: &str, title: &str) {
			let Some(manager) = self.window.get("analyticsManager") else {
				return;
			};
			let manager: JsValue = manager.into();
			if let Some(track) = global_function(&manager, "trackPageView")
				&& let Err(err) = track.call2(
					&manager,
					&JsValue::from_str(path),
					&JsValue::from_str(title),
				) {
				warn_log!("analyticsManager.trackPageView failed: {:?}", err);
			}
		}
	}

	/// Reports page views to GA4 through `gtag('config', id, {...})`.
	#[derive(Debug, Clone)]
	pub struct GtagAnalytics {
		window: web_sys::Window,
		measurement_id: String,
	}

	impl GtagAnalytics {
		/// Binds to `window` for the given measurement id.
		pub fn new(window: web_sys::Window, measurement_id: impl Into<String>) -> Self {
			Self {
				window,
				measurement_id: measurement_id.into(),
			}
		}
	}

	impl PageViewSink for GtagAnalytics {
		fn on_page_view(&self, path: &str, title: &str) {
			let Some(gtag) = global_function(&self.window, "gtag") else {
				return;
			};

			let params = js_sys::Object::new();
			let location = self.window.location().href().unwrap_or_default();
			for (key, value) in [
				("page_path", path),
				("page_title", title),
				("page_location", location.as_str()),
			] {
				let _ = js_sys::Reflect::set(&params, &JsValue::from_str(key), &JsValue::from_str(value));
			}

			if let Err(err) = gtag.call3(
				&JsValue::NULL,
				&JsValue::from_str("config"),
				&JsValue::from_str(&self.measurement_id),
				&params,
			) {
				warn_log!("gtag page view failed: {:?}", err);
			}
		}
	}
}

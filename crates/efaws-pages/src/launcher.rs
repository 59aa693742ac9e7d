//! Application startup.
//!
//! [`launch`] wires a router over any [`Dom`] host and loads the current
//! page. In the browser, [`ClientLauncher`] builds the host, the settings and
//! the analytics sinks first.

use crate::analytics::PageViewSink;
use crate::dom::{Dom, DomError};
use crate::router::{Router, RouterError};
use crate::settings::{SettingsError, SiteSettings};
use std::rc::Rc;

/// Error type for application startup.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
	/// The settings could not be loaded.
	#[error(transparent)]
	Settings(#[from] SettingsError),
	/// The host document is unusable.
	#[error(transparent)]
	Dom(#[from] DomError),
	/// The router could not be created or started.
	#[error(transparent)]
	Router(#[from] RouterError),
}

#[cfg(target_arch = "wasm32")]
impl From<LaunchError> for wasm_bindgen::JsValue {
	fn from(err: LaunchError) -> Self {
		wasm_bindgen::JsValue::from_str(&err.to_string())
	}
}

/// Builds the router over `dom`, attaches its listeners and loads the
/// current path.
pub fn launch<D: Dom>(
	dom: Rc<D>,
	settings: SiteSettings,
	analytics: Option<Rc<dyn PageViewSink>>,
) -> Result<Rc<Router<D>>, LaunchError> {
	let mut builder = Router::builder(dom).settings(settings);
	if let Some(sink) = analytics {
		builder = builder.analytics(sink);
	}

	let router = builder.build()?;
	router.start()?;
	Ok(router)
}

#[cfg(target_arch = "wasm32")]
pub use client::ClientLauncher;

#[cfg(target_arch = "wasm32")]
mod client {
	use super::{LaunchError, launch};
	use crate::analytics::{AnalyticsHub, GlobalAnalytics, GtagAnalytics, PageViewSink};
	use crate::dom::web::WebDom;
	use crate::info_log;
	use crate::router::Router;
	use crate::settings::{DEFAULT_SETTINGS, SiteSettings};
	use std::rc::Rc;

	/// Starts the site in the browser.
	///
	/// ```ignore
	/// let router = ClientLauncher::new().launch()?;
	/// ```
	#[derive(Debug, Clone)]
	pub struct ClientLauncher {
		settings: String,
	}

	impl Default for ClientLauncher {
		fn default() -> Self {
			Self::new()
		}
	}

	impl ClientLauncher {
		/// Creates a launcher using the embedded settings.
		pub fn new() -> Self {
			Self {
				settings: DEFAULT_SETTINGS.to_string(),
			}
		}

		/// Replaces the settings document.
		pub fn settings_toml(mut self, source: impl Into<String>) -> Self {
			self.settings = source.into();
			self
		}

		/// Launches the router over the live document.
		pub fn launch(self) -> Result<Rc<Router<WebDom>>, LaunchError> {
			#[cfg(feature = "console_error_panic_hook")]
			console_error_panic_hook::set_once();

			let settings = SiteSettings::from_toml(&self.settings)?;
			let dom = Rc::new(WebDom::new()?);

			let mut hub = AnalyticsHub::new();
			if settings.analytics.forward_to_global_manager {
				hub.add(Rc::new(GlobalAnalytics::new(dom.window().clone())));
			}
			if let Some(id) = &settings.analytics.ga4_measurement_id {
				hub.add(Rc::new(GtagAnalytics::new(dom.window().clone(), id.clone())));
			}
			info_log!("Launching with {} analytics sinks", hub.len());

			let analytics: Option<Rc<dyn PageViewSink>> =
				(!hub.is_empty()).then(|| Rc::new(hub) as Rc<dyn PageViewSink>);
			launch(dom, settings, analytics)
		}
	}
}

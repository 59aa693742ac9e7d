//! E-Faws Pages - client runtime for the E-Faws Tech Services site
//!
//! The site is a single-page application: one HTML shell, six page templates
//! swapped into `#main-content`, and a handful of interactive widgets wired up
//! after every swap.
//!
//! ## Architecture
//!
//! - [`dom`]: the [`Dom`](dom::Dom) host abstraction, with the browser
//!   implementation in `dom::web`
//! - [`router`]: client-side routing, history integration and the loading
//!   indicator
//! - [`templates`]: page markup registry
//! - [`head`]: per-route title and SEO tags
//! - [`features`]: service tabs, logo slider, service popup, PDF modal,
//!   newsletter form and FAQ accordion
//! - [`animations`]: fade-in on scroll
//! - [`analytics`]: page view reporting
//! - [`events`]: listener and timer ownership per mounted page
//! - [`settings`]: TOML configuration
//! - [`launcher`]: startup
//! - [`testing`]: an in-memory host for native tests
//!
//! ## Example
//!
//! ```ignore
//! use efaws_pages::launcher::ClientLauncher;
//!
//! let router = ClientLauncher::new().launch()?;
//! router.navigate("/contact")?;
//! ```

#![warn(missing_docs)]

pub mod analytics;
pub mod animations;
pub mod dom;
pub mod events;
pub mod features;
pub mod head;
pub mod launcher;
pub mod logging;
pub mod prelude;
pub mod router;
pub mod settings;
pub mod templates;

// In-memory host (available on every target so integration tests can use it)
pub mod testing;

pub use analytics::{AnalyticsHub, PageViewSink};
pub use dom::{Dom, DomError, EventKind, Selector, Target};
pub use events::EventRegistry;
pub use features::{FeatureError, PageKind, Widget};
pub use head::{HeadError, PageMetadata, apply_metadata, metadata_for};
pub use launcher::{LaunchError, launch};
#[cfg(target_arch = "wasm32")]
pub use launcher::ClientLauncher;
pub use router::{NavigationPhase, NavigationSource, RouteTable, Router, RouterError};
pub use settings::{SettingsError, SiteSettings};
pub use templates::TemplateRegistry;

// Logging macros are exported via #[macro_export]:
// efaws_pages::debug_log!, efaws_pages::info_log!, etc.

#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	pub use web_sys;
}

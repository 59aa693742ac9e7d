//! Common imports.
//!
//! ```ignore
//! use efaws_pages::prelude::*;
//! ```

pub use crate::analytics::{AnalyticsHub, PageViewSink};
pub use crate::dom::{Dom, DomError, EventKind, Handler, Selector, Target};
pub use crate::events::EventRegistry;
pub use crate::features::{FeatureContext, FeatureError, PageKind, Widget};
pub use crate::head::{PageMetadata, apply_metadata};
pub use crate::launcher::{LaunchError, launch};
pub use crate::router::{NavigationPhase, NavigationSource, Router, RouterError};
pub use crate::settings::SiteSettings;
pub use crate::templates::TemplateRegistry;

#[cfg(target_arch = "wasm32")]
pub use crate::dom::web::WebDom;
#[cfg(target_arch = "wasm32")]
pub use crate::launcher::ClientLauncher;

pub use crate::{debug_log, error_log, info_log, warn_log};

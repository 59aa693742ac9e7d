//! Client-side router.
//!
//! The router maps exact paths to page templates, installs the page into the
//! mount element after a short delay, and keeps browser history, document
//! metadata, page features and analytics in step with the installed page.
//!
//! ## Example
//!
//! ```ignore
//! use efaws_pages::router::Router;
//!
//! let router = Router::builder(dom).settings(settings).build()?;
//! router.start()?;
//! router.navigate("/contact")?;
//! ```

mod core;
mod history;
mod routes;

pub use self::core::{NavigationPhase, Router, RouterBuilder, RouterError};
pub use history::NavigationSource;
pub use routes::{ROOT_PATH, RouteTable, normalize_path};

//! Core Router Implementation.
//!
//! A navigation runs in two steps. [`Router::navigate_with`] resolves the
//! path, shows the loading indicator, updates history and schedules the swap;
//! after the configured delay the swap installs the page. Every request takes
//! the next sequence number and a swap whose number is no longer the latest
//! is dropped, so the last requested navigation wins.

use super::history::NavigationSource;
use super::routes::{ROOT_PATH, RouteTable, normalize_path};
use crate::analytics::PageViewSink;
use crate::animations;
use crate::dom::{Dom, DomError, EventKind, Selector, Target};
use crate::events::EventRegistry;
use crate::features::{self, FeatureContext};
use crate::head;
use crate::settings::{FeatureSettings, RouterSettings, SiteSettings};
use crate::templates::TemplateRegistry;
use crate::{debug_log, error_log, info_log, warn_log};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Class toggled on the loading indicator while a navigation is pending.
const LOADING_ACTIVE_CLASS: &str = "active";
/// Class marking the navigation link of the current page.
const NAV_ACTIVE_CLASS: &str = "active";

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// No route matches and the root fallback is missing too.
	#[error("Route not found: {0}")]
	RouteNotFound(String),
	/// A route names a template that is not registered.
	#[error("Template '{0}' not found")]
	TemplateMissing(String),
	/// A required element is absent from the document.
	#[error("Required element #{0} not found")]
	MissingElement(String),
	/// A host operation failed.
	#[error(transparent)]
	Dom(#[from] DomError),
	/// The history entry could not be pushed.
	#[error("History update failed: {0}")]
	History(DomError),
}

/// Router lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationPhase {
	/// No navigation has happened yet.
	Idle,
	/// A navigation is waiting for its swap.
	Loading,
	/// The requested page is installed, or the last navigation failed.
	Ready,
}

#[derive(Debug)]
struct RouterState {
	phase: NavigationPhase,
	current_route: Option<String>,
	sequence: u64,
	started: bool,
}

/// Builder for [`Router`].
pub struct RouterBuilder<D: Dom> {
	dom: Rc<D>,
	routes: RouteTable,
	templates: TemplateRegistry,
	settings: SiteSettings,
	analytics: Option<Rc<dyn PageViewSink>>,
}

impl<D: Dom> RouterBuilder<D> {
	/// Replaces the site settings.
	pub fn settings(mut self, settings: SiteSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Replaces the route table.
	pub fn routes(mut self, routes: RouteTable) -> Self {
		self.routes = routes;
		self
	}

	/// Replaces the template registry.
	pub fn templates(mut self, templates: TemplateRegistry) -> Self {
		self.templates = templates;
		self
	}

	/// Sets the page view sink.
	pub fn analytics(mut self, sink: Rc<dyn PageViewSink>) -> Self {
		self.analytics = Some(sink);
		self
	}

	/// Locates the mount and loading elements and creates the router.
	pub fn build(self) -> Result<Rc<Router<D>>, RouterError> {
		let RouterSettings {
			mount_id,
			loading_id,
			..
		} = &self.settings.router;

		let mount = self
			.dom
			.query(&Selector::id(mount_id.as_str()))
			.ok_or_else(|| RouterError::MissingElement(mount_id.clone()))?;
		let loading = self
			.dom
			.query(&Selector::id(loading_id.as_str()))
			.ok_or_else(|| RouterError::MissingElement(loading_id.clone()))?;

		let SiteSettings {
			router, features, ..
		} = self.settings;

		Ok(Rc::new_cyclic(|this| Router {
			dom: self.dom,
			routes: self.routes,
			templates: self.templates,
			settings: router,
			features,
			analytics: self.analytics,
			mount,
			loading,
			state: RefCell::new(RouterState {
				phase: NavigationPhase::Idle,
				current_route: None,
				sequence: 0,
				started: false,
			}),
			page_events: RefCell::new(EventRegistry::new()),
			listeners: RefCell::new(Vec::new()),
			this: this.clone(),
		}))
	}
}

/// The site router.
///
/// Created through [`Router::builder`] and shared as `Rc<Router<D>>`; the
/// document listeners hold only weak references to it.
pub struct Router<D: Dom> {
	dom: Rc<D>,
	routes: RouteTable,
	templates: TemplateRegistry,
	settings: RouterSettings,
	features: FeatureSettings,
	analytics: Option<Rc<dyn PageViewSink>>,
	mount: D::Element,
	loading: D::Element,
	state: RefCell<RouterState>,
	page_events: RefCell<EventRegistry<D>>,
	listeners: RefCell<Vec<D::Listener>>,
	this: Weak<Self>,
}

impl<D: Dom> fmt::Debug for Router<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("Router")
			.field("routes", &self.routes.paths())
			.field("phase", &state.phase)
			.field("current_route", &state.current_route)
			.field("sequence", &state.sequence)
			.finish()
	}
}

impl<D: Dom> Router<D> {
	/// Starts building a router over `dom` with the site routes, templates
	/// and default settings.
	pub fn builder(dom: Rc<D>) -> RouterBuilder<D> {
		RouterBuilder {
			dom,
			routes: RouteTable::site_default(),
			templates: TemplateRegistry::site_default(),
			settings: SiteSettings::default(),
			analytics: None,
		}
	}

	/// Attaches the link and history listeners and loads the current path.
	///
	/// Calling `start` again only reloads the current path.
	pub fn start(&self) -> Result<(), RouterError> {
		let already_started = std::mem::replace(&mut self.state.borrow_mut().started, true);
		if !already_started {
			self.attach_listeners()?;
			info_log!("Router started with {} routes", self.routes.len());
		}

		let path = self.dom.location_path();
		self.navigate_with(&path, NavigationSource::InitialLoad)
	}

	fn attach_listeners(&self) -> Result<(), RouterError> {
		let weak = self.this.clone();
		let on_click = self.dom.listen(
			Target::Document,
			EventKind::Click,
			Rc::new(move |event: &D::Event| {
				if let Some(router) = weak.upgrade() {
					router.handle_link_click(event);
				}
			}),
		)?;

		let weak = self.this.clone();
		let on_pop = self.dom.listen(
			Target::Window,
			EventKind::PopState,
			Rc::new(move |_: &D::Event| {
				if let Some(router) = weak.upgrade() {
					router.handle_pop_state();
				}
			}),
		)?;

		self.listeners.borrow_mut().extend([on_click, on_pop]);
		Ok(())
	}

	fn handle_link_click(&self, event: &D::Event) {
		let marker = self.settings.link_attribute.as_str();
		let Some(link) = self
			.dom
			.event_target(event)
			.and_then(|target| self.dom.closest(&target, &Selector::has_attribute(marker)))
		else {
			return;
		};

		self.dom.prevent_default(event);

		let route = self
			.dom
			.attribute(&link, marker)
			.filter(|value| !value.is_empty())
			.or_else(|| self.dom.attribute(&link, "href"));
		let Some(route) = route else {
			warn_log!("Navigation link without a target");
			return;
		};

		if let Err(err) = self.navigate_with(&route, NavigationSource::Link) {
			error_log!("Navigation to {} failed: {}", route, err);
		}
	}

	fn handle_pop_state(&self) {
		let path = self.dom.location_path();
		if let Err(err) = self.navigate_with(&path, NavigationSource::PopState) {
			error_log!("Navigation to {} failed: {}", path, err);
		}
	}

	/// Navigates to `path` as a link navigation (pushes history).
	pub fn navigate(&self, path: &str) -> Result<(), RouterError> {
		self.navigate_with(path, NavigationSource::Link)
	}

	/// Requests a navigation to `path`.
	///
	/// Every request, including one that fails validation, takes the next
	/// sequence number, so a swap scheduled by an earlier request never lands
	/// after it. Unknown paths fall back to the root without a history entry.
	/// A route whose template is missing is rejected before history is touched
	/// and the current page stays installed.
	pub fn navigate_with(&self, path: &str, source: NavigationSource) -> Result<(), RouterError> {
		let sequence = {
			let mut state = self.state.borrow_mut();
			state.sequence += 1;
			state.sequence
		};
		self.show_loading();

		let requested = normalize_path(path);
		let resolved = match self.routes.resolve(requested) {
			Some(template) => Some((requested, template, source)),
			None if requested == ROOT_PATH => None,
			None => {
				warn_log!("Unknown route {}, redirecting to {}", requested, ROOT_PATH);
				self.routes
					.resolve(ROOT_PATH)
					.map(|template| (ROOT_PATH, template, NavigationSource::Redirect))
			}
		};
		let Some((path, template, source)) = resolved else {
			self.settle();
			return Err(RouterError::RouteNotFound(ROOT_PATH.to_string()));
		};

		if !self.templates.contains(template) {
			error_log!("Template '{}' not found", template);
			self.settle();
			return Err(RouterError::TemplateMissing(template.to_string()));
		}

		if source.pushes_history()
			&& let Err(err) = self.dom.push_history(path)
		{
			self.settle();
			return Err(RouterError::History(err));
		}

		self.state.borrow_mut().phase = NavigationPhase::Loading;
		debug_log!("Navigation #{} to {} ({})", sequence, path, source);

		let weak = self.this.clone();
		let path = path.to_string();
		let template = template.to_string();
		self.dom.set_timeout(
			self.settings.navigation_delay(),
			Box::new(move || {
				if let Some(router) = weak.upgrade() {
					router.complete(sequence, &path, &template);
				}
			}),
		);

		Ok(())
	}

	fn complete(&self, sequence: u64, path: &str, template: &str) {
		if self.state.borrow().sequence != sequence {
			debug_log!("Navigation #{} to {} superseded", sequence, path);
			return;
		}

		let Some(markup) = self.templates.get(template) else {
			error_log!("Template '{}' not found", template);
			self.settle();
			return;
		};
		if let Err(err) = self.dom.set_inner_html(&self.mount, &markup) {
			error_log!("Error loading page {}: {}", path, err);
			self.settle();
			return;
		}

		self.page_events.borrow_mut().clear();
		self.state.borrow_mut().current_route = Some(path.to_string());

		if let Err(err) = head::apply_metadata(&*self.dom, path) {
			warn_log!("Metadata update for {} failed: {}", path, err);
		}
		self.update_active_nav_link(path);

		{
			let mut registry = self.page_events.borrow_mut();
			let mut cx = FeatureContext::new(&self.dom, &mut *registry, &self.features);
			features::initialize_template(template, &mut cx);
		}

		self.dom.scroll_to_top();
		self.settle();

		let fade_in = animations::trigger_fade_in(&self.dom, &mut *self.page_events.borrow_mut());
		if let Err(err) = fade_in {
			warn_log!("Fade-in setup failed: {}", err);
		}

		if let Some(analytics) = &self.analytics {
			analytics.on_page_view(path, &self.dom.title());
		}

		info_log!("Loaded {} ({})", path, template);
	}

	fn update_active_nav_link(&self, path: &str) {
		for link in self.dom.query_all(&Selector::class("nav-link")) {
			self.dom.remove_class(&link, NAV_ACTIVE_CLASS);
		}
		if let Some(active) = self
			.dom
			.query(&Selector::attribute(self.settings.link_attribute.as_str(), path))
		{
			self.dom.add_class(&active, NAV_ACTIVE_CLASS);
		}
	}

	fn show_loading(&self) {
		self.dom.add_class(&self.loading, LOADING_ACTIVE_CLASS);
	}

	/// Hides the loading indicator and marks the router ready.
	fn settle(&self) {
		self.dom.remove_class(&self.loading, LOADING_ACTIVE_CLASS);
		self.state.borrow_mut().phase = NavigationPhase::Ready;
	}

	/// The installed route, once a navigation has completed.
	pub fn current_route(&self) -> Option<String> {
		self.state.borrow().current_route.clone()
	}

	/// The lifecycle phase.
	pub fn phase(&self) -> NavigationPhase {
		self.state.borrow().phase
	}

	/// The sequence number of the latest navigation request.
	pub fn sequence(&self) -> u64 {
		self.state.borrow().sequence
	}

	/// Whether the loading indicator is shown.
	pub fn is_loading(&self) -> bool {
		self.dom.has_class(&self.loading, LOADING_ACTIVE_CLASS)
	}

	/// The content mount element.
	pub fn mount(&self) -> &D::Element {
		&self.mount
	}

	/// The route table.
	pub fn routes(&self) -> &RouteTable {
		&self.routes
	}

	/// The template registry.
	pub fn templates(&self) -> &TemplateRegistry {
		&self.templates
	}

	/// Number of listeners owned by the installed page.
	pub fn page_listener_count(&self) -> usize {
		self.page_events.borrow().listener_count()
	}
}

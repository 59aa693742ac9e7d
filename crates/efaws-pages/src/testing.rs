//! Testing utilities.
//!
//! [`MemoryDom`] is an in-memory [`Dom`] host: an element tree with a virtual
//! clock, a history stack, bubbling event dispatch and recorded network
//! requests. It lets the router and the page features run in native tests
//! without a browser.
//!
//! Markup handed to [`Dom::set_inner_html`] is parsed as an HTML fragment
//! with `scraper`, and the resulting elements (tags and attributes, no text)
//! become nodes of the tree.
//!
//! Host operations can be made to fail with [`MemoryDom::fail_operation`] to
//! exercise error paths.
//!
//! ```ignore
//! use efaws_pages::router::Router;
//! use efaws_pages::testing::MemoryDom;
//!
//! let dom = MemoryDom::site_shell("/");
//! let router = Router::builder(dom.clone()).build()?;
//! router.start()?;
//! dom.advance(Duration::from_millis(300));
//! ```

use crate::analytics::PageViewSink;
use crate::dom::{Dom, DomError, EventKind, Handler, RequestCallback, Selector, Target};
use scraper::{ElementRef, Html};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use std::time::Duration;

/// Handle to an element of a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
	tag: String,
	attributes: BTreeMap<String, String>,
	styles: BTreeMap<String, String>,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	markup: String,
	/// Current value of a form control; `None` means the `value` attribute.
	value: Option<String>,
	client_width: f64,
	in_viewport: bool,
}

impl Node {
	fn new(tag: &str) -> Self {
		Self {
			tag: tag.to_ascii_lowercase(),
			attributes: BTreeMap::new(),
			styles: BTreeMap::new(),
			parent: None,
			children: Vec::new(),
			markup: String::new(),
			value: None,
			client_width: 0.0,
			in_viewport: true,
		}
	}

	fn classes(&self) -> impl Iterator<Item = &str> {
		self.attributes
			.get("class")
			.map(|value| value.split_whitespace())
			.into_iter()
			.flatten()
	}

	fn has_class(&self, class: &str) -> bool {
		self.classes().any(|c| c == class)
	}
}

/// Event delivered to [`MemoryDom`] handlers.
#[derive(Debug)]
pub struct MemoryEvent {
	/// The event type.
	pub kind: EventKind,
	/// The dispatching element, `None` for window/document events.
	pub target: Option<NodeId>,
	default_prevented: Cell<bool>,
}

impl MemoryEvent {
	/// Whether a handler called `preventDefault`.
	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerTarget {
	Window,
	Document,
	Node(NodeId),
}

struct ListenerEntry {
	target: ListenerTarget,
	kind: EventKind,
	handler: Handler<MemoryDom>,
	alive: Rc<Cell<bool>>,
}

/// Listener guard of a [`MemoryDom`]; dropping it detaches the listener.
#[derive(Debug)]
pub struct MemoryListener {
	alive: Rc<Cell<bool>>,
}

impl Drop for MemoryListener {
	fn drop(&mut self) {
		self.alive.set(false);
	}
}

/// Interval guard of a [`MemoryDom`]; dropping it cancels the interval.
#[derive(Debug)]
pub struct MemoryTimer {
	alive: Rc<Cell<bool>>,
}

impl Drop for MemoryTimer {
	fn drop(&mut self) {
		self.alive.set(false);
	}
}

struct IntervalEntry {
	next_due: Duration,
	period: Duration,
	callback: Rc<dyn Fn()>,
	alive: Rc<Cell<bool>>,
}

struct TimeoutEntry {
	due: Duration,
	order: u64,
	callback: Box<dyn FnOnce()>,
}

/// A recorded `post_json` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
	/// Request URL.
	pub url: String,
	/// JSON body.
	pub body: serde_json::Value,
}

struct State {
	nodes: Vec<Node>,
	root: NodeId,
	head: NodeId,
	body: NodeId,
	title: String,
	listeners: Vec<ListenerEntry>,
	timeouts: Vec<TimeoutEntry>,
	intervals: Vec<IntervalEntry>,
	timer_order: u64,
	now: Duration,
	history: Vec<String>,
	history_index: usize,
	scroll_to_top_calls: usize,
	alerts: Vec<String>,
	requests: Vec<RecordedRequest>,
	request_outcome: Result<(), DomError>,
	failing: BTreeSet<&'static str>,
}

impl State {
	fn new(path: &str) -> Self {
		let mut state = Self {
			nodes: Vec::new(),
			root: NodeId(0),
			head: NodeId(0),
			body: NodeId(0),
			title: String::new(),
			listeners: Vec::new(),
			timeouts: Vec::new(),
			intervals: Vec::new(),
			timer_order: 0,
			now: Duration::ZERO,
			history: vec![path.to_string()],
			history_index: 0,
			scroll_to_top_calls: 0,
			alerts: Vec::new(),
			requests: Vec::new(),
			request_outcome: Ok(()),
			failing: BTreeSet::new(),
		};
		state.root = state.create("html", &[]);
		state.head = state.create("head", &[]);
		state.body = state.create("body", &[]);
		state.append(state.root, state.head);
		state.append(state.root, state.body);
		state
	}

	fn node(&self, id: NodeId) -> &Node {
		&self.nodes[id.0]
	}

	fn node_mut(&mut self, id: NodeId) -> &mut Node {
		&mut self.nodes[id.0]
	}

	fn create(&mut self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
		let mut node = Node::new(tag);
		for (name, value) in attributes {
			node.attributes
				.insert(name.to_ascii_lowercase(), (*value).to_string());
		}
		self.nodes.push(node);
		NodeId(self.nodes.len() - 1)
	}

	fn append(&mut self, parent: NodeId, child: NodeId) {
		self.detach(child);
		self.node_mut(child).parent = Some(parent);
		self.node_mut(parent).children.push(child);
	}

	fn detach(&mut self, child: NodeId) {
		if let Some(parent) = self.node_mut(child).parent.take() {
			self.node_mut(parent).children.retain(|c| *c != child);
		}
	}

	fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
		let mut chain = Vec::new();
		let mut current = self.node(id).parent;
		while let Some(parent) = current {
			chain.push(parent);
			current = self.node(parent).parent;
		}
		chain
	}

	fn descendants(&self, id: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack: Vec<NodeId> = self.node(id).children.iter().rev().copied().collect();
		while let Some(next) = stack.pop() {
			out.push(next);
			stack.extend(self.node(next).children.iter().rev().copied());
		}
		out
	}

	fn matches(&self, id: NodeId, selector: &Selector) -> bool {
		let node = self.node(id);
		match selector {
			Selector::Id(expected) => node.attributes.get("id") == Some(expected),
			Selector::Class(class) => node.has_class(class),
			Selector::Tag(tag) => node.tag.eq_ignore_ascii_case(tag),
			Selector::HasAttribute(name) => node.attributes.contains_key(name),
			Selector::AttributeEquals { tag, name, value } => {
				tag.as_ref().is_none_or(|t| node.tag.eq_ignore_ascii_case(t))
					&& node.attributes.get(name) == Some(value)
			}
			Selector::Descendant(ancestor, descendant) => {
				self.matches(id, descendant)
					&& self
						.ancestors(id)
						.into_iter()
						.any(|a| self.matches(a, ancestor))
			}
		}
	}

	fn deep_clone(&mut self, source: NodeId) -> NodeId {
		let mut copy = self.node(source).clone();
		copy.parent = None;
		copy.children = Vec::new();
		self.nodes.push(copy);
		let clone = NodeId(self.nodes.len() - 1);
		for child in self.node(source).children.clone() {
			let child_clone = self.deep_clone(child);
			self.append(clone, child_clone);
		}
		clone
	}

	fn location(&self) -> String {
		self.history[self.history_index].clone()
	}
}

/// In-memory [`Dom`] host for tests.
///
/// Cloning is cheap and every clone shares the same document.
#[derive(Clone)]
pub struct MemoryDom {
	state: Rc<RefCell<State>>,
}

impl std::fmt::Debug for MemoryDom {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("MemoryDom")
			.field("nodes", &state.nodes.len())
			.field("location", &state.location())
			.field("now", &state.now)
			.finish()
	}
}

impl Default for MemoryDom {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryDom {
	/// Creates an empty document (`html`, `head`, `body`) at `/`.
	pub fn new() -> Self {
		Self::at("/")
	}

	/// Creates an empty document whose location is `path`.
	pub fn at(path: &str) -> Self {
		Self {
			state: Rc::new(RefCell::new(State::new(path))),
		}
	}

	/// Creates the site's host page at `path`: a navigation bar with one
	/// `.nav-link` per route, the `#loading` indicator and the
	/// `#main-content` mount.
	pub fn site_shell(path: &str) -> Rc<Self> {
		let dom = Self::at(path);
		let body = dom.body_id();
		let nav = dom.add(body, "nav", &[("class", "navbar")]);
		for route in ["/", "/about", "/services", "/internship", "/blog", "/contact"] {
			dom.add(
				nav,
				"a",
				&[("href", route), ("data-route", route), ("class", "nav-link")],
			);
		}
		dom.add(body, "div", &[("id", "loading"), ("class", "loading")]);
		dom.add(body, "main", &[("id", "main-content")]);
		Rc::new(dom)
	}

	// Building

	/// Returns the `<body>` element.
	pub fn body_id(&self) -> NodeId {
		self.state.borrow().body
	}

	/// Returns the `<head>` element.
	pub fn head_id(&self) -> NodeId {
		self.state.borrow().head
	}

	/// Creates a detached element.
	pub fn create(&self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
		self.state.borrow_mut().create(tag, attributes)
	}

	/// Creates an element and appends it to `parent`.
	pub fn add(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
		let mut state = self.state.borrow_mut();
		let id = state.create(tag, attributes);
		state.append(parent, id);
		id
	}

	/// Appends the elements described by `markup` to `parent`.
	pub fn add_markup(&self, parent: NodeId, markup: &str) {
		build_markup(&mut self.state.borrow_mut(), parent, markup);
	}

	/// Sets the rendered width reported for `element`.
	pub fn set_client_width(&self, element: NodeId, width: f64) {
		self.state.borrow_mut().node_mut(element).client_width = width;
	}

	/// Sets whether `element` is reported inside the viewport.
	pub fn set_in_viewport(&self, element: NodeId, visible: bool) {
		self.state.borrow_mut().node_mut(element).in_viewport = visible;
	}

	/// Sets the outcome of subsequent `post_json` calls.
	pub fn respond_to_requests_with(&self, outcome: Result<(), DomError>) {
		self.state.borrow_mut().request_outcome = outcome;
	}

	/// Types `value` into a form control, leaving its `value` attribute (the
	/// reset default) untouched.
	pub fn set_value(&self, control: NodeId, value: &str) {
		self.state.borrow_mut().node_mut(control).value = Some(value.to_string());
	}

	/// Makes later calls of a host operation fail with
	/// [`DomError::Operation`].
	///
	/// Recognized names are `"innerHTML"`, `"appendChild"`, `"setAttribute"`,
	/// `"style.setProperty"`, `"addEventListener"` and `"pushState"`, the same
	/// names `WebDom` reports.
	pub fn fail_operation(&self, operation: &'static str) {
		self.state.borrow_mut().failing.insert(operation);
	}

	/// Lets every host operation succeed again.
	pub fn clear_failures(&self) {
		self.state.borrow_mut().failing.clear();
	}

	fn check(&self, operation: &'static str) -> Result<(), DomError> {
		if self.state.borrow().failing.contains(operation) {
			Err(DomError::operation(operation, "rejected by host"))
		} else {
			Ok(())
		}
	}

	// Inspection

	/// Returns the tag name of `element`.
	pub fn tag_name(&self, element: NodeId) -> String {
		self.state.borrow().node(element).tag.clone()
	}

	/// Number of connected elements matching `selector`.
	pub fn count(&self, selector: &Selector) -> usize {
		self.query_all(selector).len()
	}

	/// Returns the `content` of `<meta {attribute}="{key}">`.
	pub fn meta_content(&self, attribute: &str, key: &str) -> Option<String> {
		self.query(&Selector::tag_attribute("meta", attribute, key))
			.and_then(|meta| self.attribute(&meta, "content"))
	}

	/// Number of live listeners.
	pub fn listener_count(&self) -> usize {
		self.state
			.borrow()
			.listeners
			.iter()
			.filter(|entry| entry.alive.get())
			.count()
	}

	/// Number of live intervals.
	pub fn active_intervals(&self) -> usize {
		self.state
			.borrow()
			.intervals
			.iter()
			.filter(|entry| entry.alive.get())
			.count()
	}

	/// Number of timeouts that have not fired yet.
	pub fn pending_timeouts(&self) -> usize {
		self.state.borrow().timeouts.len()
	}

	/// Number of history entries.
	pub fn history_len(&self) -> usize {
		self.state.borrow().history.len()
	}

	/// Number of `scroll_to_top` calls.
	pub fn scroll_to_top_calls(&self) -> usize {
		self.state.borrow().scroll_to_top_calls
	}

	/// Alerts shown so far.
	pub fn alerts(&self) -> Vec<String> {
		self.state.borrow().alerts.clone()
	}

	/// Requests sent so far.
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.borrow().requests.clone()
	}

	/// Elapsed virtual time.
	pub fn now(&self) -> Duration {
		self.state.borrow().now
	}

	// Driving

	/// Advances the virtual clock, firing due timeouts and intervals in order.
	pub fn advance(&self, by: Duration) {
		let deadline = self.state.borrow().now + by;

		loop {
			let next = {
				let mut state = self.state.borrow_mut();
				state.intervals.retain(|entry| entry.alive.get());

				let timeout = state
					.timeouts
					.iter()
					.enumerate()
					.filter(|(_, entry)| entry.due <= deadline)
					.min_by_key(|(_, entry)| (entry.due, entry.order))
					.map(|(index, entry)| (index, entry.due));
				let interval = state
					.intervals
					.iter()
					.enumerate()
					.filter(|(_, entry)| entry.next_due <= deadline)
					.min_by_key(|(_, entry)| entry.next_due)
					.map(|(index, entry)| (index, entry.next_due));

				match (timeout, interval) {
					(Some((index, due)), Some((_, interval_due))) if due <= interval_due => {
						state.now = due;
						Some(Fired::Once(state.timeouts.remove(index).callback))
					}
					(Some((index, due)), None) => {
						state.now = due;
						Some(Fired::Once(state.timeouts.remove(index).callback))
					}
					(_, Some((index, due))) => {
						state.now = due;
						let entry = &mut state.intervals[index];
						entry.next_due += entry.period;
						Some(Fired::Repeating(entry.callback.clone(), entry.alive.clone()))
					}
					(None, None) => None,
				}
			};

			match next {
				Some(Fired::Once(callback)) => callback(),
				Some(Fired::Repeating(callback, alive)) => {
					if alive.get() {
						callback();
					}
				}
				None => break,
			}
		}

		self.state.borrow_mut().now = deadline;
	}

	/// Dispatches `kind` at `target`, bubbling from an element through its
	/// ancestors to the document and the window. Returns whether a handler
	/// prevented the default action.
	pub fn dispatch(&self, target: Target<'_, NodeId>, kind: EventKind) -> bool {
		let (event_target, path) = {
			let state = self.state.borrow();
			match target {
				Target::Window => (None, vec![ListenerTarget::Window]),
				Target::Document => (None, vec![ListenerTarget::Document, ListenerTarget::Window]),
				Target::Element(id) => {
					let mut path = vec![ListenerTarget::Node(*id)];
					path.extend(state.ancestors(*id).into_iter().map(ListenerTarget::Node));
					path.push(ListenerTarget::Document);
					path.push(ListenerTarget::Window);
					(Some(*id), path)
				}
			}
		};

		let event = MemoryEvent {
			kind,
			target: event_target,
			default_prevented: Cell::new(false),
		};

		for current in path {
			let handlers: Vec<(Handler<MemoryDom>, Rc<Cell<bool>>)> = {
				let mut state = self.state.borrow_mut();
				state.listeners.retain(|entry| entry.alive.get());
				state
					.listeners
					.iter()
					.filter(|entry| entry.target == current && entry.kind == kind)
					.map(|entry| (entry.handler.clone(), entry.alive.clone()))
					.collect()
			};
			for (handler, alive) in handlers {
				if alive.get() {
					handler(&event);
				}
			}
		}

		event.default_prevented()
	}

	/// Clicks `element`.
	pub fn click(&self, element: NodeId) -> bool {
		self.dispatch(Target::Element(&element), EventKind::Click)
	}

	/// Submits `form`.
	pub fn submit(&self, form: NodeId) -> bool {
		self.dispatch(Target::Element(&form), EventKind::Submit)
	}

	/// Fires a window scroll event.
	pub fn scroll(&self) {
		self.dispatch(Target::Window, EventKind::Scroll);
	}

	/// Goes back one history entry and fires `popstate`.
	pub fn back(&self) -> bool {
		{
			let mut state = self.state.borrow_mut();
			if state.history_index == 0 {
				return false;
			}
			state.history_index -= 1;
		}
		self.dispatch(Target::Window, EventKind::PopState);
		true
	}

	/// Goes forward one history entry and fires `popstate`.
	pub fn forward(&self) -> bool {
		{
			let mut state = self.state.borrow_mut();
			if state.history_index + 1 >= state.history.len() {
				return false;
			}
			state.history_index += 1;
		}
		self.dispatch(Target::Window, EventKind::PopState);
		true
	}
}

enum Fired {
	Once(Box<dyn FnOnce()>),
	Repeating(Rc<dyn Fn()>, Rc<Cell<bool>>),
}

impl Dom for MemoryDom {
	type Element = NodeId;
	type Event = MemoryEvent;
	type Listener = MemoryListener;
	type Timer = MemoryTimer;

	fn title(&self) -> String {
		self.state.borrow().title.clone()
	}

	fn set_title(&self, title: &str) {
		self.state.borrow_mut().title = title.to_string();
	}

	fn query_all(&self, selector: &Selector) -> Vec<Self::Element> {
		let state = self.state.borrow();
		state
			.descendants(state.root)
			.into_iter()
			.filter(|id| state.matches(*id, selector))
			.collect()
	}

	fn query_within(&self, root: &Self::Element, selector: &Selector) -> Vec<Self::Element> {
		let state = self.state.borrow();
		state
			.descendants(*root)
			.into_iter()
			.filter(|id| state.matches(*id, selector))
			.collect()
	}

	fn closest(&self, element: &Self::Element, selector: &Selector) -> Option<Self::Element> {
		let state = self.state.borrow();
		std::iter::once(*element)
			.chain(state.ancestors(*element))
			.find(|id| state.matches(*id, selector))
	}

	fn parent(&self, element: &Self::Element) -> Option<Self::Element> {
		self.state.borrow().node(*element).parent
	}

	fn body(&self) -> Option<Self::Element> {
		Some(self.body_id())
	}

	fn append_to_head(
		&self,
		tag: &str,
		attributes: &[(&str, &str)],
	) -> Result<Self::Element, DomError> {
		if !attributes.is_empty() {
			self.check("setAttribute")?;
		}
		self.check("appendChild")?;
		let head = self.head_id();
		Ok(self.add(head, tag, attributes))
	}

	fn attribute(&self, element: &Self::Element, name: &str) -> Option<String> {
		self.state
			.borrow()
			.node(*element)
			.attributes
			.get(&name.to_ascii_lowercase())
			.cloned()
	}

	fn set_attribute(
		&self,
		element: &Self::Element,
		name: &str,
		value: &str,
	) -> Result<(), DomError> {
		self.check("setAttribute")?;
		self.state
			.borrow_mut()
			.node_mut(*element)
			.attributes
			.insert(name.to_ascii_lowercase(), value.to_string());
		Ok(())
	}

	fn inner_html(&self, element: &Self::Element) -> String {
		self.state.borrow().node(*element).markup.clone()
	}

	fn set_inner_html(&self, element: &Self::Element, html: &str) -> Result<(), DomError> {
		self.check("innerHTML")?;
		let mut state = self.state.borrow_mut();
		for child in state.node(*element).children.clone() {
			state.detach(child);
		}
		state.node_mut(*element).markup = html.to_string();
		build_markup(&mut state, *element, html);
		Ok(())
	}

	fn has_class(&self, element: &Self::Element, class: &str) -> bool {
		self.state.borrow().node(*element).has_class(class)
	}

	fn add_class(&self, element: &Self::Element, class: &str) {
		let mut state = self.state.borrow_mut();
		let node = state.node_mut(*element);
		if !node.has_class(class) {
			let mut classes: Vec<String> = node.classes().map(str::to_string).collect();
			classes.push(class.to_string());
			node.attributes.insert("class".to_string(), classes.join(" "));
		}
	}

	fn remove_class(&self, element: &Self::Element, class: &str) {
		let mut state = self.state.borrow_mut();
		let node = state.node_mut(*element);
		if node.has_class(class) {
			let classes: Vec<String> = node
				.classes()
				.filter(|c| *c != class)
				.map(str::to_string)
				.collect();
			node.attributes.insert("class".to_string(), classes.join(" "));
		}
	}

	fn set_style(
		&self,
		element: &Self::Element,
		property: &str,
		value: &str,
	) -> Result<(), DomError> {
		self.check("style.setProperty")?;
		self.state
			.borrow_mut()
			.node_mut(*element)
			.styles
			.insert(property.to_string(), value.to_string());
		Ok(())
	}

	fn style(&self, element: &Self::Element, property: &str) -> Option<String> {
		self.state
			.borrow()
			.node(*element)
			.styles
			.get(property)
			.cloned()
	}

	fn client_width(&self, element: &Self::Element) -> f64 {
		self.state.borrow().node(*element).client_width
	}

	fn is_in_viewport(&self, element: &Self::Element) -> bool {
		self.state.borrow().node(*element).in_viewport
	}

	fn append_clone(&self, parent: &Self::Element, source: &Self::Element) -> Result<(), DomError> {
		self.check("appendChild")?;
		let mut state = self.state.borrow_mut();
		let clone = state.deep_clone(*source);
		state.append(*parent, clone);
		Ok(())
	}

	fn remove(&self, element: &Self::Element) {
		self.state.borrow_mut().detach(*element);
	}

	fn form_value(&self, form: &Self::Element, name: &str) -> Option<String> {
		let control = self
			.query_within(form, &Selector::attribute("name", name))
			.into_iter()
			.next()?;
		let state = self.state.borrow();
		let node = state.node(control);
		Some(
			node.value
				.clone()
				.or_else(|| node.attributes.get("value").cloned())
				.unwrap_or_default(),
		)
	}

	fn reset_form(&self, form: &Self::Element) {
		let controls = self.query_within(form, &Selector::has_attribute("name"));
		let mut state = self.state.borrow_mut();
		for control in controls {
			state.node_mut(control).value = None;
		}
	}

	fn listen(
		&self,
		target: Target<'_, Self::Element>,
		kind: EventKind,
		handler: Handler<Self>,
	) -> Result<Self::Listener, DomError> {
		self.check("addEventListener")?;
		let target = match target {
			Target::Window => ListenerTarget::Window,
			Target::Document => ListenerTarget::Document,
			Target::Element(id) => ListenerTarget::Node(*id),
		};
		let alive = Rc::new(Cell::new(true));

		let mut state = self.state.borrow_mut();
		state.listeners.retain(|entry| entry.alive.get());
		state.listeners.push(ListenerEntry {
			target,
			kind,
			handler,
			alive: alive.clone(),
		});

		Ok(MemoryListener { alive })
	}

	fn event_target(&self, event: &Self::Event) -> Option<Self::Element> {
		event.target
	}

	fn prevent_default(&self, event: &Self::Event) {
		event.default_prevented.set(true);
	}

	fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
		let mut state = self.state.borrow_mut();
		let due = state.now + delay;
		state.timer_order += 1;
		let order = state.timer_order;
		state.timeouts.push(TimeoutEntry {
			due,
			order,
			callback,
		});
	}

	fn set_interval(&self, period: Duration, callback: Rc<dyn Fn()>) -> Self::Timer {
		let alive = Rc::new(Cell::new(true));
		let mut state = self.state.borrow_mut();
		let next_due = state.now + period;
		state.intervals.push(IntervalEntry {
			next_due,
			period,
			callback,
			alive: alive.clone(),
		});
		MemoryTimer { alive }
	}

	fn location_path(&self) -> String {
		self.state.borrow().location()
	}

	fn push_history(&self, path: &str) -> Result<(), DomError> {
		self.check("pushState")?;
		let mut state = self.state.borrow_mut();
		let keep = state.history_index + 1;
		state.history.truncate(keep);
		state.history.push(path.to_string());
		state.history_index = keep;
		Ok(())
	}

	fn scroll_to_top(&self) {
		self.state.borrow_mut().scroll_to_top_calls += 1;
	}

	fn alert(&self, message: &str) {
		self.state.borrow_mut().alerts.push(message.to_string());
	}

	fn post_json(&self, url: &str, body: serde_json::Value, on_complete: RequestCallback) {
		let outcome = {
			let mut state = self.state.borrow_mut();
			state.requests.push(RecordedRequest {
				url: url.to_string(),
				body,
			});
			state.request_outcome.clone()
		};
		on_complete(outcome);
	}
}

/// Parses `markup` as an HTML fragment and appends its elements to `parent`.
fn build_markup(state: &mut State, parent: NodeId, markup: &str) {
	let fragment = Html::parse_fragment(markup);
	append_elements(state, parent, fragment.root_element());
}

fn append_elements(state: &mut State, parent: NodeId, source: ElementRef<'_>) {
	for child in source.children().filter_map(ElementRef::wrap) {
		let element = child.value();
		let attributes: Vec<(&str, &str)> = element.attrs().collect();
		let id = state.create(element.name(), &attributes);
		state.append(parent, id);
		append_elements(state, id, child);
	}
}

/// A [`PageViewSink`] that records every page view.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
	views: RefCell<Vec<(String, String)>>,
}

impl RecordingAnalytics {
	/// Creates an empty recorder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Recorded `(path, title)` pairs.
	pub fn views(&self) -> Vec<(String, String)> {
		self.views.borrow().clone()
	}
}

impl PageViewSink for RecordingAnalytics {
	fn on_page_view(&self, path: &str, title: &str) {
		self.views
			.borrow_mut()
			.push((path.to_string(), title.to_string()));
	}
}

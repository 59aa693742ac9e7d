//! Per-mount event bookkeeping.
//!
//! Every listener and interval a page feature installs is handed to the
//! [`EventRegistry`] of the current mount cycle. When the router swaps the
//! mount content it clears the registry, which drops the guards (detaching
//! the listeners, cancelling the intervals) and runs the registered
//! cleanups. Re-initializing a page therefore never accumulates handlers.

use crate::dom::{Dom, DomError, EventKind, Handler, Target};
use std::fmt;

/// Registry for listeners and timers owned by the current mount cycle.
pub struct EventRegistry<D: Dom> {
	listeners: Vec<D::Listener>,
	timers: Vec<D::Timer>,
	cleanups: Vec<Box<dyn FnOnce()>>,
}

impl<D: Dom> Default for EventRegistry<D> {
	fn default() -> Self {
		Self {
			listeners: Vec::new(),
			timers: Vec::new(),
			cleanups: Vec::new(),
		}
	}
}

impl<D: Dom> fmt::Debug for EventRegistry<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventRegistry")
			.field("listeners", &self.listeners.len())
			.field("timers", &self.timers.len())
			.field("cleanups", &self.cleanups.len())
			.finish()
	}
}

impl<D: Dom> EventRegistry<D> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Attaches `handler` through `dom` and keeps the listener alive until
	/// the registry is cleared.
	pub fn listen(
		&mut self,
		dom: &D,
		target: Target<'_, D::Element>,
		kind: EventKind,
		handler: Handler<D>,
	) -> Result<(), DomError> {
		let listener = dom.listen(target, kind, handler)?;
		self.listeners.push(listener);
		Ok(())
	}

	/// Keeps an already attached listener alive until the registry is cleared.
	pub fn register_listener(&mut self, listener: D::Listener) {
		self.listeners.push(listener);
	}

	/// Keeps an interval running until the registry is cleared.
	pub fn register_timer(&mut self, timer: D::Timer) {
		self.timers.push(timer);
	}

	/// Runs `cleanup` when the registry is cleared.
	pub fn on_clear(&mut self, cleanup: impl FnOnce() + 'static) {
		self.cleanups.push(Box::new(cleanup));
	}

	/// Releases every listener, timer and cleanup of the mount cycle.
	pub fn clear(&mut self) {
		self.listeners.clear();
		self.timers.clear();
		for cleanup in self.cleanups.drain(..) {
			cleanup();
		}
	}

	/// Number of live listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	/// Number of running intervals.
	pub fn timer_count(&self) -> usize {
		self.timers.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.listeners.is_empty() && self.timers.is_empty() && self.cleanups.is_empty()
	}
}

impl<D: Dom> Drop for EventRegistry<D> {
	fn drop(&mut self) {
		self.clear();
	}
}

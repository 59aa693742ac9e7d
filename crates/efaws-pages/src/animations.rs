//! Scroll-triggered reveal of `.fade-in` elements.

use crate::dom::{Dom, DomError, EventKind, Selector, Target};
use crate::events::EventRegistry;
use std::rc::Rc;

/// Class marking elements revealed on scroll.
pub const FADE_IN_CLASS: &str = "fade-in";
/// Class added once an element has been revealed.
pub const VISIBLE_CLASS: &str = "visible";

/// Marks every `.fade-in` element inside the viewport as visible.
///
/// Returns the number of elements that became visible.
pub fn reveal_visible<D: Dom>(dom: &D) -> usize {
	let mut revealed = 0;
	for element in dom.query_all(&Selector::class(FADE_IN_CLASS)) {
		if !dom.has_class(&element, VISIBLE_CLASS) && dom.is_in_viewport(&element) {
			dom.add_class(&element, VISIBLE_CLASS);
			revealed += 1;
		}
	}
	revealed
}

/// Reveals the elements already in view and rechecks on every window scroll
/// for the rest of the mount cycle.
pub fn trigger_fade_in<D: Dom>(
	dom: &Rc<D>,
	registry: &mut EventRegistry<D>,
) -> Result<(), DomError> {
	reveal_visible(&**dom);

	let scroll_dom = dom.clone();
	registry.listen(
		dom,
		Target::Window,
		EventKind::Scroll,
		Rc::new(move |_: &D::Event| {
			reveal_visible(&*scroll_dom);
		}),
	)
}

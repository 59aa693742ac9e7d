//! Service category tabs.
//!
//! `.tab-btn` elements carry a `data-filter` category; clicking one marks it
//! `active` and shows only the `.service-card` elements whose
//! `data-category` matches. The `all` filter shows every card.

use super::{FeatureContext, FeatureError, Widget};
use crate::dom::{Dom, DomError, EventKind, Selector, Target};
use crate::warn_log;
use std::rc::Rc;

/// Filter value showing every card.
pub const SHOW_ALL: &str = "all";

/// Shows the cards matching `filter` and hides the rest.
pub fn apply_filter<D: Dom>(dom: &D, cards: &[D::Element], filter: &str) -> Result<(), DomError> {
	for card in cards {
		let visible = filter == SHOW_ALL
			|| dom.attribute(card, "data-category").as_deref() == Some(filter);
		dom.set_style(card, "display", if visible { "block" } else { "none" })?;
	}
	Ok(())
}

pub(super) fn initialize<D: Dom>(cx: &mut FeatureContext<'_, D>) -> Result<(), FeatureError> {
	let dom = cx.dom;
	let tabs = dom.query_all(&Selector::class("tab-btn"));
	if tabs.is_empty() {
		return Ok(());
	}

	let cards = Rc::new(dom.query_all(&Selector::class("service-card")));
	apply_filter(&**dom, cards.as_slice(), &cx.settings.default_service_filter)
		.map_err(FeatureError::dom(Widget::ServiceTabs))?;

	let tabs = Rc::new(tabs);
	for tab in tabs.iter() {
		let handler = {
			let dom = dom.clone();
			let tabs = tabs.clone();
			let cards = cards.clone();
			let tab = tab.clone();
			Rc::new(move |_: &D::Event| {
				for other in tabs.iter() {
					dom.remove_class(other, "active");
				}
				dom.add_class(&tab, "active");

				let filter = dom
					.attribute(&tab, "data-filter")
					.unwrap_or_else(|| SHOW_ALL.to_string());
				if let Err(err) = apply_filter(&*dom, cards.as_slice(), &filter) {
					warn_log!("Failed to filter services by '{}': {}", filter, err);
				}
			})
		};

		cx.registry
			.listen(dom, Target::Element(tab), EventKind::Click, handler)
			.map_err(FeatureError::dom(Widget::ServiceTabs))?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::events::EventRegistry;
	use crate::settings::FeatureSettings;
	use crate::testing::{MemoryDom, NodeId};
	use rstest::rstest;

	const MARKUP: &str = r#"
		<div class="services-tabs">
			<div class="tab-btn active" data-filter="ai">AI</div>
			<div class="tab-btn" data-filter="creative">Creative</div>
			<div class="tab-btn" data-filter="all">All</div>
		</div>
		<div class="service-card" data-category="ai"></div>
		<div class="service-card" data-category="ai"></div>
		<div class="service-card" data-category="creative"></div>
	"#;

	fn displays(dom: &MemoryDom) -> Vec<String> {
		dom.query_all(&Selector::class("service-card"))
			.iter()
			.map(|card| dom.style(card, "display").unwrap_or_default())
			.collect()
	}

	fn tab(dom: &MemoryDom, filter: &str) -> NodeId {
		dom.query(&Selector::attribute("data-filter", filter)).unwrap()
	}

	#[rstest]
	fn test_default_filter_applied_on_initialize() {
		let dom = Rc::new(MemoryDom::new());
		dom.add_markup(dom.body_id(), MARKUP);
		let settings = FeatureSettings::default();
		let mut registry = EventRegistry::new();

		initialize(&mut FeatureContext::new(&dom, &mut registry, &settings)).unwrap();

		assert_eq!(displays(&dom), vec!["block", "block", "none"]);
		assert_eq!(registry.listener_count(), 3);
	}

	#[rstest]
	#[case("creative", &["none", "none", "block"])]
	#[case("all", &["block", "block", "block"])]
	#[case("ai", &["block", "block", "none"])]
	fn test_click_filters_cards(#[case] filter: &str, #[case] expected: &[&str]) {
		let dom = Rc::new(MemoryDom::new());
		dom.add_markup(dom.body_id(), MARKUP);
		let settings = FeatureSettings::default();
		let mut registry = EventRegistry::new();
		initialize(&mut FeatureContext::new(&dom, &mut registry, &settings)).unwrap();

		let clicked = tab(&dom, filter);
		dom.click(clicked);

		assert_eq!(displays(&dom), expected);
		assert!(dom.has_class(&clicked, "active"));
		assert_eq!(dom.count(&Selector::class("active")), 1);
	}

	#[rstest]
	fn test_tabs_without_cards() {
		let dom = Rc::new(MemoryDom::new());
		dom.add_markup(dom.body_id(), r#"<div class="tab-btn" data-filter="ai"></div>"#);
		let settings = FeatureSettings::default();
		let mut registry = EventRegistry::new();

		initialize(&mut FeatureContext::new(&dom, &mut registry, &settings)).unwrap();
		dom.click(tab(&dom, "ai"));

		assert_eq!(registry.listener_count(), 1);
	}
}

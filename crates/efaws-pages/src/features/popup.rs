//! Service card popup.
//!
//! Clicking a `.service-card` shows a copy of it inside `#popupContent` and
//! opens `#popupOverlay`. The close button or a click on the overlay
//! backdrop closes it again.

use super::{FeatureContext, FeatureError, Widget};
use crate::dom::{Dom, EventKind, Selector, Target};
use crate::warn_log;
use std::rc::Rc;

const OPEN_CLASS: &str = "active";

pub(super) fn initialize<D: Dom>(cx: &mut FeatureContext<'_, D>) -> Result<(), FeatureError> {
	let dom = cx.dom;
	let cards = dom.query_all(&Selector::class("service-card"));
	let (Some(overlay), Some(content)) = (
		dom.query(&Selector::id("popupOverlay")),
		dom.query(&Selector::id("popupContent")),
	) else {
		return Ok(());
	};
	if cards.is_empty() {
		return Ok(());
	}

	for card in &cards {
		let handler = {
			let dom = dom.clone();
			let overlay = overlay.clone();
			let content = content.clone();
			let card = card.clone();
			Rc::new(move |_: &D::Event| {
				for previous in dom.query_within(&content, &Selector::class("service-card")) {
					dom.remove(&previous);
				}
				if let Err(err) = dom.append_clone(&content, &card) {
					warn_log!("Failed to show service details: {}", err);
					return;
				}
				dom.add_class(&overlay, OPEN_CLASS);
			})
		};
		cx.registry
			.listen(dom, Target::Element(card), EventKind::Click, handler)
			.map_err(FeatureError::dom(Widget::ServicePopup))?;
	}

	if let Some(close) = dom.query(&Selector::id("popupClose")) {
		let handler = {
			let dom = dom.clone();
			let overlay = overlay.clone();
			Rc::new(move |_: &D::Event| dom.remove_class(&overlay, OPEN_CLASS))
		};
		cx.registry
			.listen(dom, Target::Element(&close), EventKind::Click, handler)
			.map_err(FeatureError::dom(Widget::ServicePopup))?;
	}

	let handler = {
		let dom = dom.clone();
		let overlay = overlay.clone();
		Rc::new(move |event: &D::Event| {
			if dom.event_target(event).as_ref() == Some(&overlay) {
				dom.remove_class(&overlay, OPEN_CLASS);
			}
		})
	};
	cx.registry
		.listen(dom, Target::Element(&overlay), EventKind::Click, handler)
		.map_err(FeatureError::dom(Widget::ServicePopup))?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::events::EventRegistry;
	use crate::settings::FeatureSettings;
	use crate::testing::MemoryDom;
	use rstest::rstest;

	const MARKUP: &str = r#"
		<div class="services-grid">
			<div class="service-card" data-category="ai"><h3 class="service-title">Kits</h3></div>
			<div class="service-card" data-category="creative"><h3 class="service-title">Design</h3></div>
		</div>
		<div class="popup-overlay" id="popupOverlay">
			<div class="popup-content" id="popupContent">
				<span class="popup-close" id="popupClose">&times;</span>
			</div>
		</div>
	"#;

	fn setup() -> (Rc<MemoryDom>, EventRegistry<MemoryDom>) {
		let dom = Rc::new(MemoryDom::new());
		dom.add_markup(dom.body_id(), MARKUP);
		let settings = FeatureSettings::default();
		let mut registry = EventRegistry::new();
		initialize(&mut FeatureContext::new(&dom, &mut registry, &settings)).unwrap();
		(dom, registry)
	}

	fn by_id(dom: &MemoryDom, id: &str) -> crate::testing::NodeId {
		dom.query(&Selector::id(id)).unwrap()
	}

	#[rstest]
	fn test_card_click_opens_with_single_copy() {
		let (dom, _registry) = setup();
		let cards = dom.query_all(&Selector::class("service-card"));
		let content = by_id(&dom, "popupContent");

		dom.click(cards[0]);
		dom.click(cards[1]);

		assert!(dom.has_class(&by_id(&dom, "popupOverlay"), "active"));
		let copies = dom.query_within(&content, &Selector::class("service-card"));
		assert_eq!(copies.len(), 1);
		assert_eq!(dom.attribute(&copies[0], "data-category").as_deref(), Some("creative"));
	}

	#[rstest]
	fn test_close_button_closes() {
		let (dom, _registry) = setup();
		let overlay = by_id(&dom, "popupOverlay");
		dom.click(dom.query(&Selector::class("service-card")).unwrap());

		dom.click(by_id(&dom, "popupClose"));

		assert!(!dom.has_class(&overlay, "active"));
	}

	#[rstest]
	fn test_backdrop_click_closes_but_content_click_does_not() {
		let (dom, _registry) = setup();
		let overlay = by_id(&dom, "popupOverlay");
		dom.click(dom.query(&Selector::class("service-card")).unwrap());

		dom.click(by_id(&dom, "popupContent"));
		assert!(dom.has_class(&overlay, "active"));

		dom.click(overlay);
		assert!(!dom.has_class(&overlay, "active"));
	}

	#[rstest]
	fn test_missing_overlay_installs_nothing() {
		let dom = Rc::new(MemoryDom::new());
		dom.add_markup(dom.body_id(), r#"<div class="service-card"></div>"#);
		let settings = FeatureSettings::default();
		let mut registry = EventRegistry::new();

		initialize(&mut FeatureContext::new(&dom, &mut registry, &settings)).unwrap();

		assert!(registry.is_empty());
	}
}

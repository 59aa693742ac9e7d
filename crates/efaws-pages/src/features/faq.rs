//! Internship FAQ accordion. At most one `.faq-item` is open at a time.

use super::{FeatureContext, FeatureError, Widget};
use crate::dom::{Dom, EventKind, Selector, Target};
use std::rc::Rc;

pub(super) fn initialize<D: Dom>(cx: &mut FeatureContext<'_, D>) -> Result<(), FeatureError> {
	let dom = cx.dom;

	for question in dom.query_all(&Selector::class("faq-question")) {
		let Some(item) = dom.parent(&question) else {
			continue;
		};

		let handler = {
			let dom = dom.clone();
			Rc::new(move |_: &D::Event| {
				for other in dom.query_all(&Selector::class("faq-item")) {
					if other != item {
						dom.remove_class(&other, "active");
					}
				}
				dom.toggle_class(&item, "active");
			})
		};
		cx.registry
			.listen(dom, Target::Element(&question), EventKind::Click, handler)
			.map_err(FeatureError::dom(Widget::FaqAccordion))?;
	}

	Ok(())
}

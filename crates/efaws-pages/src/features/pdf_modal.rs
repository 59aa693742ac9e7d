//! AI book PDF modal.

use super::{FeatureContext, FeatureError, Widget};
use crate::dom::{Dom, EventKind, Selector, Target};
use crate::warn_log;
use std::rc::Rc;

fn show<D: Dom>(dom: &D, modal: &D::Element, visible: bool) {
	let (display, overflow) = if visible { ("flex", "hidden") } else { ("none", "auto") };
	let body = dom.body();
	let result = dom.set_style(modal, "display", display).and_then(|()| match &body {
		Some(body) => dom.set_style(body, "overflow", overflow),
		None => Ok(()),
	});
	if let Err(err) = result {
		warn_log!("Failed to toggle PDF modal: {}", err);
	}
}

pub(super) fn initialize<D: Dom>(cx: &mut FeatureContext<'_, D>) -> Result<(), FeatureError> {
	let dom = cx.dom;
	let (Some(modal), Some(open), Some(close)) = (
		dom.query(&Selector::id("pdfModal")),
		dom.query(&Selector::id("openPdfModal")),
		dom.query(&Selector::id("closePdfModal")),
	) else {
		return Ok(());
	};

	let handler = {
		let dom = dom.clone();
		let modal = modal.clone();
		Rc::new(move |_: &D::Event| show(&*dom, &modal, true))
	};
	cx.registry
		.listen(dom, Target::Element(&open), EventKind::Click, handler)
		.map_err(FeatureError::dom(Widget::PdfModal))?;

	let handler = {
		let dom = dom.clone();
		let modal = modal.clone();
		Rc::new(move |_: &D::Event| show(&*dom, &modal, false))
	};
	cx.registry
		.listen(dom, Target::Element(&close), EventKind::Click, handler)
		.map_err(FeatureError::dom(Widget::PdfModal))?;

	let handler = {
		let dom = dom.clone();
		Rc::new(move |event: &D::Event| {
			if dom.event_target(event).as_ref() == Some(&modal) {
				show(&*dom, &modal, false);
			}
		})
	};
	cx.registry
		.listen(dom, Target::Window, EventKind::Click, handler)
		.map_err(FeatureError::dom(Widget::PdfModal))?;

	Ok(())
}

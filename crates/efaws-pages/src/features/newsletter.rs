//! Newsletter phone subscription form.
//!
//! Submitting `#newsletter-form` is intercepted. The `phone` field must hold
//! exactly ten digits; a valid number is POSTed as `{"phone": ...}` to the
//! configured endpoint without blocking the page.

use super::{FeatureContext, FeatureError, Widget};
use crate::dom::{Dom, DomError, EventKind, Selector, Target};
use crate::{info_log, warn_log};
use std::rc::Rc;

/// Alert shown for a malformed phone number.
pub const INVALID_PHONE_MESSAGE: &str = "⚠️ Please enter a valid 10-digit phone number.";
/// Alert shown after a successful subscription.
pub const SUCCESS_MESSAGE: &str = "✅ Thanks for subscribing!";
/// Alert shown when the endpoint rejects the subscription.
pub const FAILURE_MESSAGE: &str = "❌ Something went wrong. Please try again.";

/// Checks for exactly ten ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
	phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

fn submit<D: Dom>(dom: &Rc<D>, form: &D::Element, endpoint: &str) {
	let phone = dom.form_value(form, "phone").unwrap_or_default();
	if !is_valid_phone(&phone) {
		dom.alert(INVALID_PHONE_MESSAGE);
		return;
	}

	let callback_dom = dom.clone();
	let form = form.clone();
	dom.post_json(
		endpoint,
		serde_json::json!({ "phone": phone }),
		Box::new(move |result: Result<(), DomError>| match result {
			Ok(()) => {
				info_log!("Newsletter subscription sent");
				callback_dom.alert(SUCCESS_MESSAGE);
				callback_dom.reset_form(&form);
			}
			Err(err) => {
				warn_log!("Newsletter subscription failed: {}", err);
				callback_dom.alert(FAILURE_MESSAGE);
			}
		}),
	);
}

pub(super) fn initialize<D: Dom>(cx: &mut FeatureContext<'_, D>) -> Result<(), FeatureError> {
	let dom = cx.dom;
	let Some(form) = dom.query(&Selector::id("newsletter-form")) else {
		return Ok(());
	};

	let handler = {
		let dom = dom.clone();
		let form = form.clone();
		let endpoint = cx.settings.newsletter_endpoint.clone();
		Rc::new(move |event: &D::Event| {
			dom.prevent_default(event);
			submit(&dom, &form, &endpoint);
		})
	};
	cx.registry
		.listen(dom, Target::Element(&form), EventKind::Submit, handler)
		.map_err(FeatureError::dom(Widget::NewsletterForm))?;

	Ok(())
}

//! Browser Host Tests
//!
//! Exercises `WebDom` and the analytics sinks against a real browser
//! document.
//!
//! **Run with**: `wasm-pack test --headless --firefox crates/efaws-pages`
//!
//! Test Categories:
//! - Category 1: Head and Attributes
//! - Category 2: Listeners and Timers
//! - Category 3: History, Forms and Requests
//! - Category 4: Analytics
//! - Category 5: Router

#![cfg(target_arch = "wasm32")]

use efaws_pages::analytics::{GlobalAnalytics, GtagAnalytics, PageViewSink};
use efaws_pages::dom::web::WebDom;
use efaws_pages::dom::{Dom, DomError, EventKind, Selector, Target};
use efaws_pages::head::{apply_metadata, metadata_for};
use efaws_pages::router::Router;
use gloo_timers::future::TimeoutFuture;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

/// Appends markup in a fresh wrapper to `<body>`; remove it when done.
fn fixture(markup: &str) -> web_sys::Element {
	let wrapper = document().create_element("div").unwrap();
	wrapper.set_inner_html(markup);
	document().body().unwrap().append_child(&wrapper).unwrap();
	wrapper
}

fn by_id(id: &str) -> web_sys::Element {
	document().get_element_by_id(id).unwrap()
}

fn click(element: &web_sys::Element) {
	element.dyn_ref::<web_sys::HtmlElement>().unwrap().click();
}

fn window_property(name: &str) -> JsValue {
	js_sys::Reflect::get(&web_sys::window().unwrap(), &JsValue::from_str(name)).unwrap()
}

fn set_window_property(name: &str, value: &JsValue) {
	js_sys::Reflect::set(&web_sys::window().unwrap(), &JsValue::from_str(name), value).unwrap();
}

fn delete_window_property(name: &str) {
	js_sys::Reflect::delete_property(&web_sys::window().unwrap().into(), &JsValue::from_str(name))
		.unwrap();
}

// ============================================================================
// Category 1: Head and Attributes
// ============================================================================

/// Tests that applying metadata twice keeps a single tag per key
#[wasm_bindgen_test]
fn test_apply_metadata_twice_keeps_single_tags() {
	let dom = WebDom::new().unwrap();

	apply_metadata(&dom, "/about").unwrap();
	apply_metadata(&dom, "/about").unwrap();

	let og_titles = document()
		.query_selector_all("meta[property=\"og:title\"]")
		.unwrap();
	assert_eq!(og_titles.length(), 1);
	assert_eq!(dom.title(), metadata_for("/about").title);
	assert_eq!(
		dom.query(&Selector::tag_attribute("link", "rel", "canonical"))
			.and_then(|link| dom.attribute(&link, "href"))
			.as_deref(),
		Some("https://efawstech.com/about")
	);
}

/// Tests inline styles and classes through the host
#[wasm_bindgen_test]
fn test_style_and_class_round_trip() {
	let wrapper = fixture(r#"<div id="styled" class="service-card"></div>"#);
	let dom = WebDom::new().unwrap();
	let card = by_id("styled");

	dom.set_style(&card, "display", "none").unwrap();
	dom.add_class(&card, "active");

	assert_eq!(dom.style(&card, "display").as_deref(), Some("none"));
	assert!(dom.has_class(&card, "active"));
	assert!(!dom.toggle_class(&card, "active"));
	assert_eq!(dom.style(&card, "overflow"), None);

	wrapper.remove();
}

// ============================================================================
// Category 2: Listeners and Timers
// ============================================================================

/// Tests that dropping a listener guard detaches the listener
#[wasm_bindgen_test]
fn test_dropped_listener_stops_receiving_events() {
	let wrapper = fixture(r#"<button id="counted">Count</button>"#);
	let dom = WebDom::new().unwrap();
	let button = by_id("counted");
	let clicks = Rc::new(Cell::new(0));

	let counter = clicks.clone();
	let guard = dom
		.listen(
			Target::Element(&button),
			EventKind::Click,
			Rc::new(move |_: &web_sys::Event| counter.set(counter.get() + 1)),
		)
		.unwrap();

	click(&button);
	assert_eq!(clicks.get(), 1);

	drop(guard);
	click(&button);
	assert_eq!(clicks.get(), 1);

	wrapper.remove();
}

/// Tests that the event target is the clicked element
#[wasm_bindgen_test]
fn test_document_listener_sees_event_target() {
	let wrapper = fixture(r#"<a id="target-link" data-route="/blog">Blog</a>"#);
	let dom = Rc::new(WebDom::new().unwrap());
	let link = by_id("target-link");
	let seen = Rc::new(Cell::new(false));

	let flag = seen.clone();
	let host = dom.clone();
	let expected = link.clone();
	let _guard = dom
		.listen(
			Target::Document,
			EventKind::Click,
			Rc::new(move |event: &web_sys::Event| {
				host.prevent_default(event);
				flag.set(host.event_target(event).as_ref() == Some(&expected));
			}),
		)
		.unwrap();

	click(&link);

	assert!(seen.get());
	wrapper.remove();
}

/// Tests that a timeout fires once its delay has passed
#[wasm_bindgen_test]
async fn test_timeout_fires_after_delay() {
	let dom = WebDom::new().unwrap();
	let fired = Rc::new(Cell::new(false));

	let flag = fired.clone();
	dom.set_timeout(Duration::from_millis(10), Box::new(move || flag.set(true)));
	assert!(!fired.get());

	TimeoutFuture::new(50).await;
	assert!(fired.get());
}

/// Tests that dropping an interval guard cancels it
#[wasm_bindgen_test]
async fn test_dropped_interval_stops_ticking() {
	let dom = WebDom::new().unwrap();
	let ticks = Rc::new(Cell::new(0));

	let counter = ticks.clone();
	let timer = dom.set_interval(
		Duration::from_millis(10),
		Rc::new(move || counter.set(counter.get() + 1)),
	);
	TimeoutFuture::new(60).await;
	assert!(ticks.get() >= 2);

	drop(timer);
	let stopped_at = ticks.get();
	TimeoutFuture::new(50).await;
	assert_eq!(ticks.get(), stopped_at);
}

// ============================================================================
// Category 3: History, Forms and Requests
// ============================================================================

/// Tests that pushing history changes the reported path
#[wasm_bindgen_test]
fn test_push_history_updates_location() {
	let dom = WebDom::new().unwrap();
	let original = dom.location_path();

	dom.push_history("/internship").unwrap();
	assert_eq!(dom.location_path(), "/internship");

	dom.push_history(&original).unwrap();
	assert_eq!(dom.location_path(), original);
}

/// Tests that a reset restores the default value of a typed control
#[wasm_bindgen_test]
fn test_form_value_and_reset() {
	let wrapper = fixture(
		r#"<form id="web-newsletter"><input id="web-phone" type="tel" name="phone"></form>"#,
	);
	let dom = WebDom::new().unwrap();
	let form = by_id("web-newsletter");
	let input: web_sys::HtmlInputElement = by_id("web-phone").dyn_into().unwrap();

	input.set_value("9876543210");
	assert_eq!(dom.form_value(&form, "phone").as_deref(), Some("9876543210"));

	dom.reset_form(&form);
	assert_eq!(dom.form_value(&form, "phone").as_deref(), Some(""));
	assert_eq!(dom.form_value(&form, "email"), None);

	wrapper.remove();
}

/// Tests that a POST to an unreachable endpoint reports a request error
#[wasm_bindgen_test]
async fn test_post_json_reports_network_failure() {
	let dom = WebDom::new().unwrap();
	let outcome: Rc<RefCell<Option<Result<(), DomError>>>> = Rc::new(RefCell::new(None));

	let slot = outcome.clone();
	dom.post_json(
		"http://127.0.0.1:9/subscribe",
		serde_json::json!({ "phone": "9876543210" }),
		Box::new(move |result: Result<(), DomError>| *slot.borrow_mut() = Some(result)),
	);
	for _ in 0..100 {
		if outcome.borrow().is_some() {
			break;
		}
		TimeoutFuture::new(20).await;
	}

	assert!(matches!(*outcome.borrow(), Some(Err(DomError::Request(_)))));
}

// ============================================================================
// Category 4: Analytics
// ============================================================================

/// Tests that page views reach `window.analyticsManager.trackPageView`
#[wasm_bindgen_test]
fn test_global_analytics_calls_manager() {
	let manager = js_sys::Object::new();
	let calls = js_sys::Array::new();
	js_sys::Reflect::set(&manager, &JsValue::from_str("calls"), &calls).unwrap();
	let track = js_sys::Function::new_with_args("path, title", "this.calls.push([path, title]);");
	js_sys::Reflect::set(&manager, &JsValue::from_str("trackPageView"), &track).unwrap();
	set_window_property("analyticsManager", &manager);

	GlobalAnalytics::new(web_sys::window().unwrap()).on_page_view("/blog", "Blog");

	assert_eq!(calls.length(), 1);
	let call: js_sys::Array = calls.get(0).dyn_into().unwrap();
	assert_eq!(call.get(0).as_string().as_deref(), Some("/blog"));
	assert_eq!(call.get(1).as_string().as_deref(), Some("Blog"));

	delete_window_property("analyticsManager");
}

/// Tests that a page without an analytics manager is tolerated
#[wasm_bindgen_test]
fn test_global_analytics_without_manager() {
	delete_window_property("analyticsManager");

	GlobalAnalytics::new(web_sys::window().unwrap()).on_page_view("/", "Home");
}

/// Tests the GA4 `config` call
#[wasm_bindgen_test]
fn test_gtag_analytics_sends_config() {
	let gtag = js_sys::Function::new_with_args(
		"command, id, params",
		"window.gtagCalls = (window.gtagCalls || []).concat([[command, id, params.page_path, params.page_title]]);",
	);
	set_window_property("gtag", &gtag);
	delete_window_property("gtagCalls");

	GtagAnalytics::new(web_sys::window().unwrap(), "G-TEST123").on_page_view("/contact", "Contact");

	let calls: js_sys::Array = window_property("gtagCalls").dyn_into().unwrap();
	assert_eq!(calls.length(), 1);
	let call: js_sys::Array = calls.get(0).dyn_into().unwrap();
	let values: Vec<Option<String>> = call.iter().map(|value| value.as_string()).collect();
	assert_eq!(
		values,
		vec![
			Some("config".to_string()),
			Some("G-TEST123".to_string()),
			Some("/contact".to_string()),
			Some("Contact".to_string()),
		]
	);

	delete_window_property("gtag");
	delete_window_property("gtagCalls");
}

// ============================================================================
// Category 5: Router
// ============================================================================

/// Tests a full navigation through the browser host
#[wasm_bindgen_test]
async fn test_router_installs_page_in_browser() {
	let wrapper = fixture(
		r#"<nav><a class="nav-link" href="/about" data-route="/about">About</a></nav>
		<div id="loading" class="loading"></div>
		<main id="main-content"></main>"#,
	);
	let dom = Rc::new(WebDom::new().unwrap());
	let original = dom.location_path();
	let router = Router::builder(dom.clone()).build().unwrap();

	router.navigate("/about").unwrap();
	assert!(router.is_loading());
	TimeoutFuture::new(400).await;

	assert_eq!(router.current_route().as_deref(), Some("/about"));
	assert!(!router.is_loading());
	assert!(
		dom.inner_html(router.mount())
			.contains("About E-Faws Tech Services Pvt Ltd")
	);
	assert_eq!(document().title(), metadata_for("/about").title);
	let link = dom
		.query(&Selector::attribute("data-route", "/about"))
		.unwrap();
	assert!(dom.has_class(&link, "active"));

	drop(router);
	dom.push_history(&original).unwrap();
	wrapper.remove();
}

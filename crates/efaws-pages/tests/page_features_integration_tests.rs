//! Page Feature Integration Tests
//!
//! Widgets wired by the router after each swap, exercised through the
//! in-memory host.
//!
//! Test Categories:
//! - Category 1: Home Widgets
//! - Category 2: Services, Blog and Internship Widgets
//! - Category 3: Fade-in
//! - Category 4: Listener Lifecycle
//! - Category 5: Host Failures

use efaws_pages::dom::{Dom, DomError, Selector};
use efaws_pages::events::EventRegistry;
use efaws_pages::features::newsletter::{FAILURE_MESSAGE, INVALID_PHONE_MESSAGE, SUCCESS_MESSAGE};
use efaws_pages::features::{FeatureContext, FeatureError, PageKind, Widget, initialize_page};
use efaws_pages::router::Router;
use efaws_pages::settings::FeatureSettings;
use efaws_pages::templates::TemplateRegistry;
use efaws_pages::testing::MemoryDom;
use rstest::rstest;
use std::rc::Rc;
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(300);

fn open(path: &str) -> (Rc<MemoryDom>, Rc<Router<MemoryDom>>) {
	let dom = MemoryDom::site_shell(path);
	let router = Router::builder(dom.clone()).build().unwrap();
	router.start().unwrap();
	dom.advance(DELAY);
	(dom, router)
}

fn go(dom: &MemoryDom, router: &Router<MemoryDom>, path: &str) {
	router.navigate(path).unwrap();
	dom.advance(DELAY);
}

fn first(dom: &MemoryDom, selector: Selector) -> efaws_pages::testing::NodeId {
	dom.query(&selector).unwrap()
}

// ============================================================================
// Category 1: Home Widgets
// ============================================================================

/// Tests that clicking a service card opens its popup
#[rstest]
fn test_home_service_card_opens_popup() {
	let (dom, _router) = open("/");
	let overlay = first(&dom, Selector::id("popupOverlay"));
	let content = first(&dom, Selector::id("popupContent"));
	let card = first(&dom, Selector::class("service-card"));

	dom.click(card);

	assert!(dom.has_class(&overlay, "active"));
	assert_eq!(
		dom.query_within(&content, &Selector::class("service-card")).len(),
		1
	);

	dom.click(first(&dom, Selector::id("popupClose")));
	assert!(!dom.has_class(&overlay, "active"));
}

/// Tests opening and closing the AI book viewer
#[rstest]
fn test_home_pdf_modal_toggles_scroll_lock() {
	let (dom, _router) = open("/");
	let modal = first(&dom, Selector::id("pdfModal"));

	dom.click(first(&dom, Selector::id("openPdfModal")));

	assert_eq!(dom.style(&modal, "display").as_deref(), Some("flex"));
	assert_eq!(dom.style(&dom.body_id(), "overflow").as_deref(), Some("hidden"));

	dom.click(first(&dom, Selector::id("closePdfModal")));

	assert_eq!(dom.style(&modal, "display").as_deref(), Some("none"));
	assert_eq!(dom.style(&dom.body_id(), "overflow").as_deref(), Some("auto"));
}

/// Tests that the home page filters service cards by the default category
#[rstest]
fn test_home_tabs_apply_default_filter() {
	let (dom, _router) = open("/");

	for card in dom.query_all(&Selector::class("service-card")) {
		let expected = if dom.attribute(&card, "data-category").as_deref() == Some("ai") {
			"block"
		} else {
			"none"
		};
		assert_eq!(dom.style(&card, "display").as_deref(), Some(expected));
	}
}

/// Tests that the logo carousel runs only while home is installed
#[rstest]
fn test_logo_autoplay_stops_when_leaving_home() {
	let (dom, router) = open("/");
	assert_eq!(dom.active_intervals(), 1);

	go(&dom, &router, "/about");
	assert_eq!(dom.active_intervals(), 0);

	go(&dom, &router, "/");
	assert_eq!(dom.active_intervals(), 1);
}

// ============================================================================
// Category 2: Services, Blog and Internship Widgets
// ============================================================================

/// Tests the category tabs on the services page
#[rstest]
fn test_services_tab_click_filters_cards() {
	let (dom, _router) = open("/services");
	let digital = dom
		.query(&Selector::attribute("data-filter", "digital"))
		.unwrap();

	dom.click(digital);

	assert!(dom.has_class(&digital, "active"));
	let active_tabs = dom
		.query_all(&Selector::class("tab-btn"))
		.into_iter()
		.filter(|tab| dom.has_class(tab, "active"))
		.count();
	assert_eq!(active_tabs, 1);
	for card in dom.query_all(&Selector::class("service-card")) {
		let shown = dom.style(&card, "display").as_deref() == Some("block");
		let digital_card = dom.attribute(&card, "data-category").as_deref() == Some("digital");
		assert_eq!(shown, digital_card);
	}
}

/// Tests a successful newsletter subscription
#[rstest]
fn test_blog_newsletter_subscribes() {
	let (dom, _router) = open("/blog");
	let form = first(&dom, Selector::id("newsletter-form"));
	let phone = first(&dom, Selector::tag_attribute("input", "name", "phone"));
	dom.set_value(phone, "9876543210");

	assert!(dom.submit(form));

	let requests = dom.requests();
	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].url, FeatureSettings::default().newsletter_endpoint);
	assert_eq!(requests[0].body, serde_json::json!({ "phone": "9876543210" }));
	assert_eq!(dom.alerts(), vec![SUCCESS_MESSAGE.to_string()]);
	assert_eq!(dom.form_value(&form, "phone").as_deref(), Some(""));
}

/// Tests that a malformed phone number is rejected locally
#[rstest]
#[case("12345")]
#[case("98765abcde")]
#[case("98765432101")]
fn test_blog_newsletter_rejects_invalid_phone(#[case] value: &str) {
	let (dom, _router) = open("/blog");
	let form = first(&dom, Selector::id("newsletter-form"));
	let phone = first(&dom, Selector::tag_attribute("input", "name", "phone"));
	dom.set_value(phone, value);

	assert!(dom.submit(form));

	assert!(dom.requests().is_empty());
	assert_eq!(dom.alerts(), vec![INVALID_PHONE_MESSAGE.to_string()]);
}

/// Tests the failure alert when the endpoint rejects the subscription
#[rstest]
fn test_blog_newsletter_reports_failure() {
	let (dom, _router) = open("/blog");
	dom.respond_to_requests_with(Err(DomError::operation("fetch", "HTTP 500")));
	let form = first(&dom, Selector::id("newsletter-form"));
	let phone = first(&dom, Selector::tag_attribute("input", "name", "phone"));
	dom.set_value(phone, "9876543210");

	dom.submit(form);

	assert_eq!(dom.alerts(), vec![FAILURE_MESSAGE.to_string()]);
	assert_eq!(dom.form_value(&form, "phone").as_deref(), Some("9876543210"));
}

/// Tests the internship FAQ accordion after navigating there
#[rstest]
fn test_internship_faq_opens_one_item() {
	let (dom, router) = open("/");
	go(&dom, &router, "/internship");

	let items = dom.query_all(&Selector::class("faq-item"));
	let questions = dom.query_all(&Selector::class("faq-question"));
	assert!(items.len() >= 2);

	dom.click(questions[0]);
	dom.click(questions[1]);

	let open_items: Vec<_> = items
		.iter()
		.filter(|item| dom.has_class(item, "active"))
		.collect();
	assert_eq!(open_items, vec![&items[1]]);
}

// ============================================================================
// Category 3: Fade-in
// ============================================================================

/// Tests that visible sections are revealed after a swap
#[rstest]
fn test_fade_in_reveals_visible_sections() {
	let (dom, _router) = open("/");

	let faded = dom.count(&Selector::class("fade-in"));
	assert!(faded > 0);
	assert_eq!(dom.count(&Selector::class("visible")), faded);
}

/// Tests that scrolling reveals sections that come into view
#[rstest]
fn test_scroll_reveals_late_sections() {
	let (dom, router) = open("/about");
	let late = dom.add(*router.mount(), "section", &[("class", "fade-in")]);
	dom.set_in_viewport(late, false);

	dom.scroll();
	assert!(!dom.has_class(&late, "visible"));

	dom.set_in_viewport(late, true);
	dom.scroll();
	assert!(dom.has_class(&late, "visible"));
}

// ============================================================================
// Category 4: Listener Lifecycle
// ============================================================================

/// Tests that revisiting pages does not pile up listeners
#[rstest]
fn test_listeners_do_not_accumulate() {
	let (dom, router) = open("/internship");
	let page_listeners = router.page_listener_count();
	let total_listeners = dom.listener_count();

	for _ in 0..5 {
		go(&dom, &router, "/");
		go(&dom, &router, "/internship");
	}

	assert_eq!(router.page_listener_count(), page_listeners);
	assert_eq!(dom.listener_count(), total_listeners);
}

/// Tests that clicking a FAQ question after leaving the page does nothing
#[rstest]
fn test_stale_page_elements_are_inert() {
	let (dom, router) = open("/internship");
	let question = first(&dom, Selector::class("faq-question"));
	let item = dom.parent(&question).unwrap();

	go(&dom, &router, "/contact");
	dom.click(question);

	assert!(!dom.has_class(&item, "active"));
}

/// Tests that widgets do nothing on a document without their markup
#[rstest]
fn test_widgets_without_markup_install_nothing() {
	let dom = Rc::new(MemoryDom::new());
	let settings = FeatureSettings::default();
	let mut registry = EventRegistry::new();

	for widget in Widget::ALL {
		let mut cx = FeatureContext::new(&dom, &mut registry, &settings);
		assert!(widget.initialize(&mut cx).is_ok(), "{} failed", widget);
	}

	assert!(registry.is_empty());
	assert_eq!(dom.listener_count(), 0);
}

// ============================================================================
// Category 5: Host Failures
// ============================================================================

/// Tests that one failing home widget does not keep the others from wiring up
#[rstest]
fn test_failing_widget_does_not_block_the_rest() {
	let dom = Rc::new(MemoryDom::new());
	let home = TemplateRegistry::site_default().get("home").unwrap();
	dom.add_markup(dom.body_id(), &home);
	dom.fail_operation("style.setProperty");
	let settings = FeatureSettings::default();
	let mut registry = EventRegistry::new();

	let failures = {
		let mut cx = FeatureContext::new(&dom, &mut registry, &settings);
		initialize_page(PageKind::Home, &mut cx)
	};

	assert_eq!(failures.len(), 1);
	assert!(matches!(
		failures[0],
		FeatureError::Dom {
			widget: Widget::ServiceTabs,
			..
		}
	));
	assert_eq!(dom.active_intervals(), 1);

	let overlay = first(&dom, Selector::id("popupOverlay"));
	dom.click(first(&dom, Selector::class("service-card")));
	assert!(dom.has_class(&overlay, "active"));
}

/// Tests that every widget reports a rejected listener instead of panicking
#[rstest]
#[case(PageKind::Home, 4)]
#[case(PageKind::Blog, 1)]
#[case(PageKind::Internship, 1)]
fn test_rejected_listeners_are_reported_per_widget(#[case] page: PageKind, #[case] expected: usize) {
	let dom = Rc::new(MemoryDom::new());
	let markup = TemplateRegistry::site_default()
		.get(page.template_name())
		.unwrap();
	dom.add_markup(dom.body_id(), &markup);
	dom.fail_operation("addEventListener");
	let settings = FeatureSettings::default();
	let mut registry = EventRegistry::new();

	let failures = {
		let mut cx = FeatureContext::new(&dom, &mut registry, &settings);
		initialize_page(page, &mut cx)
	};

	assert_eq!(failures.len(), expected);
	assert_eq!(dom.listener_count(), 0);
}

/// Tests that a page still installs when a widget on it cannot be set up
#[rstest]
fn test_page_installs_when_widget_setup_fails() {
	let (dom, router) = open("/");
	dom.fail_operation("style.setProperty");

	go(&dom, &router, "/services");

	assert_eq!(router.current_route().as_deref(), Some("/services"));
	assert!(!router.is_loading());
	let digital = dom
		.query(&Selector::attribute("data-filter", "digital"))
		.unwrap();
	dom.click(digital);
	assert!(dom.has_class(&digital, "active"));
}

//! Partner logo slider.
//!
//! The `.logo-track` is shifted by whole logo widths. Arrow buttons step
//! backwards and forwards with wrap-around, and the track auto-advances on
//! a fixed period that pauses while the pointer is over it.

use super::{FeatureContext, FeatureError, Widget};
use crate::dom::{Dom, EventKind, Selector, Target};
use crate::warn_log;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Slider position over a track of logos.
pub struct LogoSlider<D: Dom> {
	dom: Rc<D>,
	track: D::Element,
	first_logo: D::Element,
	total: usize,
	index: Cell<usize>,
}

impl<D: Dom> LogoSlider<D> {
	/// Binds to the first `.logo-track` holding at least one `img`.
	pub fn bind(dom: Rc<D>) -> Option<Self> {
		let track = dom.query(&Selector::class("logo-track"))?;
		let logos = dom.query_within(&track, &Selector::tag("img"));
		let first_logo = logos.first()?.clone();

		Some(Self {
			dom,
			track,
			first_logo,
			total: logos.len(),
			index: Cell::new(0),
		})
	}

	/// Current logo index.
	pub fn index(&self) -> usize {
		self.index.get()
	}

	/// Number of logos.
	pub fn len(&self) -> usize {
		self.total
	}

	/// Returns true if the track holds no logos.
	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// Advances by one logo.
	pub fn next(&self) {
		self.index.set((self.index.get() + 1) % self.total);
		self.update();
	}

	/// Steps back by one logo.
	pub fn prev(&self) {
		self.index.set((self.index.get() + self.total - 1) % self.total);
		self.update();
	}

	fn update(&self) {
		let offset = self.index.get() as f64 * self.dom.client_width(&self.first_logo);
		let transform = format!("translateX(-{}px)", offset);
		if let Err(err) = self.dom.set_style(&self.track, "transform", &transform) {
			warn_log!("Failed to move logo track: {}", err);
		}
	}
}

/// Auto-advance timer that can be paused and resumed.
struct AutoSlide<D: Dom> {
	dom: Rc<D>,
	slider: Rc<LogoSlider<D>>,
	period: Duration,
	timer: RefCell<Option<D::Timer>>,
}

impl<D: Dom> AutoSlide<D> {
	fn start(&self) {
		let mut timer = self.timer.borrow_mut();
		if timer.is_none() {
			let slider = self.slider.clone();
			*timer = Some(self.dom.set_interval(self.period, Rc::new(move || slider.next())));
		}
	}

	fn pause(&self) {
		self.timer.borrow_mut().take();
	}
}

pub(super) fn initialize<D: Dom>(cx: &mut FeatureContext<'_, D>) -> Result<(), FeatureError> {
	let dom = cx.dom;
	let Some(slider) = LogoSlider::bind(dom.clone()) else {
		return Ok(());
	};
	let slider = Rc::new(slider);

	for button in dom.query_all(&Selector::class("arrow-btn")) {
		let forward = if dom.has_class(&button, "right") {
			true
		} else if dom.has_class(&button, "left") {
			false
		} else {
			continue;
		};

		let slider = slider.clone();
		cx.registry
			.listen(
				dom,
				Target::Element(&button),
				EventKind::Click,
				Rc::new(move |_: &D::Event| {
					if forward {
						slider.next();
					} else {
						slider.prev();
					}
				}),
			)
			.map_err(FeatureError::dom(Widget::LogoSlider))?;
	}

	let auto = Rc::new(AutoSlide {
		dom: dom.clone(),
		slider: slider.clone(),
		period: cx.settings.logo_slide_interval(),
		timer: RefCell::new(None),
	});
	auto.start();

	let pause = auto.clone();
	cx.registry
		.listen(
			dom,
			Target::Element(&slider.track),
			EventKind::MouseEnter,
			Rc::new(move |_: &D::Event| pause.pause()),
		)
		.map_err(FeatureError::dom(Widget::LogoSlider))?;

	let resume = auto.clone();
	cx.registry
		.listen(
			dom,
			Target::Element(&slider.track),
			EventKind::MouseLeave,
			Rc::new(move |_: &D::Event| resume.start()),
		)
		.map_err(FeatureError::dom(Widget::LogoSlider))?;

	cx.registry.on_clear(move || auto.pause());

	Ok(())
}

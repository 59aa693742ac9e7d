//! # E-Faws Web
//!
//! Browser client of the E-Faws Tech Services site. Loading the WASM module
//! starts the router over the served HTML shell; everything else lives in
//! [`efaws_pages`], re-exported here.
//!
//! ## Feature Flags
//!
//! - `console_error_panic_hook` - readable panic messages in the browser console
//! - `debug-hooks` - `debug_log!` output in debug builds

pub use efaws_pages::*;

#[cfg(target_arch = "wasm32")]
mod entry {
	use efaws_pages::launcher::ClientLauncher;
	use wasm_bindgen::prelude::*;

	/// WASM entry point
	///
	/// Called when the module is loaded. Builds the router over the current
	/// document and loads the page at the current URL.
	#[allow(clippy::main_recursion)]
	#[wasm_bindgen(start)]
	pub fn main() -> Result<(), JsValue> {
		let router = ClientLauncher::new().launch()?;
		// Listeners hold weak references; the router lives as long as the page
		std::mem::forget(router);
		Ok(())
	}
}

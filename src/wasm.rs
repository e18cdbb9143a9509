//! JavaScript bindings for the extension's content script.

use crate::{controller::BionicReading, settings::BionicSettings};
use wasm_bindgen::prelude::*;

/// Installs the panic hook, if enabled via the `panic-hook` feature.
#[wasm_bindgen(start)]
pub fn start() {
	#[cfg(feature = "panic-hook")]
	console_error_panic_hook::set_once();
}

/// A [`BionicReading`] controller bound to the current window's document.
#[wasm_bindgen]
#[derive(Debug)]
pub struct BionicReadingHandle {
	controller: BionicReading,
}

#[wasm_bindgen]
impl BionicReadingHandle {
	/// # Errors
	///
	/// Iff there is no `window.document`.
	#[wasm_bindgen(constructor)]
	pub fn new() -> Result<BionicReadingHandle, JsValue> {
		let document = web_sys::window()
			.and_then(|window| window.document())
			.ok_or_else(|| JsValue::from_str("lexilens-bionic: No document found."))?;
		Ok(Self {
			controller: BionicReading::new(document),
		})
	}

	pub fn enable(&mut self, bold_percentage: u32) {
		self.controller.enable(&settings(true, bold_percentage));
	}

	pub fn update(&mut self, bold_percentage: u32) {
		self.controller.update(&settings(true, bold_percentage));
	}

	pub fn disable(&mut self) {
		self.controller.disable();
	}

	pub fn apply(&mut self, enabled: bool, bold_percentage: u32) {
		self.controller.apply(&settings(enabled, bold_percentage));
	}

	#[wasm_bindgen(js_name = isActive)]
	#[must_use]
	pub fn is_active(&self) -> bool {
		self.controller.is_active()
	}
}

/// JS numbers above 255 would wrap if narrowed directly.
fn settings(enabled: bool, bold_percentage: u32) -> BionicSettings {
	#[allow(clippy::cast_possible_truncation)]
	BionicSettings::new(enabled, bold_percentage.min(100) as u8)
}

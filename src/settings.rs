/// Bionic Reading configuration, as handed down by the extension's settings layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BionicSettings {
	enabled: bool,
	bold_percentage: u8,
}
impl Default for BionicSettings {
	fn default() -> Self {
		Self::new(false, Self::DEFAULT_BOLD_PERCENTAGE)
	}
}
impl BionicSettings {
	pub const DEFAULT_BOLD_PERCENTAGE: u8 = 50;

	/// `bold_percentage` is clamped to 100.
	#[must_use]
	pub fn new(enabled: bool, bold_percentage: u8) -> Self {
		Self {
			enabled,
			bold_percentage: bold_percentage.min(100),
		}
	}

	#[must_use]
	pub fn enabled(self) -> bool {
		self.enabled
	}

	#[must_use]
	pub fn bold_percentage(self) -> u8 {
		self.bold_percentage
	}

	#[must_use]
	pub fn with_enabled(self, enabled: bool) -> Self {
		Self { enabled, ..self }
	}

	#[must_use]
	pub fn with_bold_percentage(self, bold_percentage: u8) -> Self {
		Self::new(self.enabled, bold_percentage)
	}
}

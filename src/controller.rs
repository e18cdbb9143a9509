//! The per-document Bionic Reading lifecycle.

use crate::{
	settings::BionicSettings,
	transform::{restore, transform},
	watch::{MutationWatch, WatchStats},
};
use tracing::{error, info, instrument, trace, warn};
use web_sys::Document;

/// Owns the Bionic Reading state of one document.
///
/// At most one [`MutationWatch`] exists per controller, and only while it is active.
/// Create one controller per page context.
///
/// # Lifecycle
///
/// - [`enable`](`BionicReading::enable`) transforms the document body and starts watching it.
/// - [`disable`](`BionicReading::disable`) stops watching and restores every transformed element.
/// - [`update`](`BionicReading::update`) re-applies with new settings if active.
#[derive(Debug)]
pub struct BionicReading {
	document: Document,
	active: Option<Active>,
}

#[derive(Debug)]
struct Active {
	bold_percentage: u8,
	/// [`None`] if the watch couldn't be started; the initial transformation still applies.
	watch: Option<MutationWatch>,
}

impl BionicReading {
	#[must_use]
	pub fn new(document: Document) -> Self {
		Self { document, active: None }
	}

	#[must_use]
	pub fn is_active(&self) -> bool {
		self.active.is_some()
	}

	/// The bold percentage currently applied, if active.
	#[must_use]
	pub fn bold_percentage(&self) -> Option<u8> {
		self.active.as_ref().map(|active| active.bold_percentage)
	}

	/// Whether inserted content is waiting for the debounce period to pass.
	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.active.as_ref().and_then(|active| active.watch.as_ref()).map_or(false, MutationWatch::is_pending)
	}

	#[must_use]
	pub fn watch_stats(&self) -> Option<WatchStats> {
		self.active.as_ref()?.watch.as_ref().map(MutationWatch::stats)
	}

	/// Does nothing if already active.
	///
	/// Only `settings.bold_percentage()` is used here; see [`apply`](`BionicReading::apply`) for the toggle.
	#[instrument(skip(self))]
	pub fn enable(&mut self, settings: &BionicSettings) {
		if self.active.is_some() {
			return trace!("Already active.");
		}

		let body = match self.document.body() {
			Some(body) => body,
			None => return warn!("Document has no body; Bionic Reading stays inactive."),
		};

		let bold_percentage = settings.bold_percentage();
		let transformed = transform(body.as_ref(), bold_percentage);

		let watch = match MutationWatch::start(body.as_ref(), bold_percentage) {
			Ok(watch) => Some(watch),
			Err(error) => {
				error!("Failed to start mutation watch; inserted content won't be transformed: {:?}", error);
				None
			}
		};

		self.active = Some(Active { bold_percentage, watch });
		info!("Enabled Bionic Reading ({} text node(s) transformed).", transformed);
	}

	/// Does nothing if already inactive.
	#[instrument(skip(self))]
	pub fn disable(&mut self) {
		let active = match self.active.take() {
			Some(active) => active,
			None => return trace!("Already inactive."),
		};

		// Disconnect before restoring, so the restoration isn't observed.
		drop(active.watch);

		let restored = restore(&self.document);
		info!("Disabled Bionic Reading ({} element(s) restored).", restored);
	}

	/// Re-applies with new `settings`, but only if active.
	#[instrument(skip(self))]
	pub fn update(&mut self, settings: &BionicSettings) {
		if self.active.is_none() {
			return trace!("Inactive; not updating.");
		}
		self.disable();
		self.enable(settings);
	}

	/// Brings the controller in line with `settings`, for use as settings change listener.
	///
	/// Re-transforms only if the bold percentage of an active controller changed.
	#[instrument(skip(self))]
	pub fn apply(&mut self, settings: &BionicSettings) {
		match (settings.enabled(), self.bold_percentage()) {
			(false, _) => self.disable(),
			(true, None) => self.enable(settings),
			(true, Some(current)) if current != settings.bold_percentage() => self.update(settings),
			(true, Some(_)) => trace!("Settings unchanged."),
		}
	}
}

//! Keeping dynamically inserted content transformed.

use crate::{
	debounce::{Debouncer, Ticket},
	filter,
	transform::transform,
};
use core::cell::RefCell;
use gloo_timers::callback::Timeout;
use js_sys::Array;
use std::rc::{Rc, Weak};
use tracing::{debug, error, info, instrument, trace, trace_span};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, MutationObserver, MutationObserverInit, MutationRecord};

/// Quiet period after the last relevant insertion before a processing pass runs.
pub const DEBOUNCE_MILLIS: u32 = 100;

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
	/// Observer callbacks that contained at least one eligible added element.
	pub relevant_batches: usize,
	/// Processing passes that ran.
	pub passes: usize,
	/// Text nodes transformed by those passes.
	pub transformed: usize,
}

/// Watches a subtree for inserted elements and transforms them after [`DEBOUNCE_MILLIS`].
///
/// The observer is disconnected while a pass runs, so the pass's own writes are never observed.
///
/// Dropping the watch disconnects it and cancels any pending pass.
#[derive(Debug)]
pub struct MutationWatch {
	shared: Rc<RefCell<Shared>>,
	_callback: Closure<dyn FnMut(Array, MutationObserver)>,
}

#[derive(Debug)]
struct Shared {
	debouncer: Debouncer<Element>,
	timeout: Option<Timeout>,
	observer: Option<MutationObserver>,
	target: web_sys::Node,
	bold_percentage: u8,
	stats: WatchStats,
}

impl MutationWatch {
	/// Starts observing `target` (usually the document body) for inserted elements.
	///
	/// # Errors
	///
	/// Iff the observer can't be created or attached.
	#[instrument(skip(target))]
	pub fn start(target: &web_sys::Node, bold_percentage: u8) -> Result<Self, JsValue> {
		let shared = Rc::new(RefCell::new(Shared {
			debouncer: Debouncer::new(),
			timeout: None,
			observer: None,
			target: target.clone(),
			bold_percentage,
			stats: WatchStats::default(),
		}));

		let weak = Rc::downgrade(&shared);
		let callback = Closure::wrap(Box::new(move |records: Array, _observer: MutationObserver| {
			let span = trace_span!("Mutation callback", records = records.length());
			let _enter = span.enter();
			if let Some(shared) = weak.upgrade() {
				on_mutations(&shared, &records);
			}
		}) as Box<dyn FnMut(Array, MutationObserver)>);

		let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
		observe(&observer, target)?;
		shared.borrow_mut().observer = Some(observer);

		info!("Started mutation watch.");
		Ok(Self { shared, _callback: callback })
	}

	#[must_use]
	pub fn stats(&self) -> WatchStats {
		self.shared.borrow().stats
	}

	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.shared.borrow().timeout.is_some()
	}
}

impl Drop for MutationWatch {
	fn drop(&mut self) {
		let mut shared = self.shared.borrow_mut();
		if let Some(observer) = shared.observer.take() {
			observer.disconnect();
		}
		shared.debouncer.cancel();
		// Dropping a `Timeout` clears it.
		shared.timeout = None;
		info!("Stopped mutation watch.");
	}
}

fn observe(observer: &MutationObserver, target: &web_sys::Node) -> Result<(), JsValue> {
	let options = MutationObserverInit::new();
	options.set_child_list(true);
	options.set_subtree(true);
	observer.observe_with_options(target, &options)
}

fn added_elements(records: &Array) -> Vec<Element> {
	let mut added = Vec::new();
	for record in records.iter() {
		let record: MutationRecord = record.unchecked_into();
		let added_nodes = record.added_nodes();
		for i in 0..added_nodes.length() {
			let element = match added_nodes.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
				Some(element) => element,
				None => continue,
			};
			match filter::rejection(&element) {
				None => added.push(element),
				Some(rejection) => trace!(?rejection, "Ignoring added <{}>.", element.tag_name()),
			}
		}
	}
	added
}

fn on_mutations(shared: &Rc<RefCell<Shared>>, records: &Array) {
	let added = added_elements(records);
	if added.is_empty() {
		return;
	}
	trace!("Collected {} added element(s).", added.len());

	let mut state = shared.borrow_mut();
	state.stats.relevant_batches += 1;
	if let Some(ticket) = state.debouncer.notify(added) {
		schedule(shared, &mut state, ticket);
	}
}

/// (Re)starts the debounce timer. Replacing the previous [`Timeout`] cancels it.
fn schedule(shared: &Rc<RefCell<Shared>>, state: &mut Shared, ticket: Ticket) {
	let weak = Rc::downgrade(shared);
	state.timeout = Some(Timeout::new(DEBOUNCE_MILLIS, move || {
		if let Some(shared) = weak.upgrade() {
			run(&shared, ticket);
		}
	}));
}

fn run(shared: &Rc<RefCell<Shared>>, ticket: Ticket) {
	let span = trace_span!("Processing pass");
	let _enter = span.enter();

	let (batch, observer, target, bold_percentage) = {
		let mut state = shared.borrow_mut();
		let batch = match state.debouncer.fire(ticket) {
			Some(batch) => batch,
			None => return trace!("Ignoring superseded timer."),
		};
		state.timeout = None;
		(batch, state.observer.clone(), state.target.clone(), state.bold_percentage)
	};

	if let Some(observer) = &observer {
		observer.disconnect();
	}
	let _reconnect = Reconnect {
		shared,
		observer: observer.as_ref(),
		target: &target,
	};

	let mut transformed = 0;
	for element in &batch {
		if !element.is_connected() {
			trace!("Skipping element removed before processing.");
			continue;
		}
		// Elements inside an earlier one of the same batch are already done.
		if let Some(rejection) = filter::rejection(element) {
			trace!(?rejection, "Skipping <{}>.", element.tag_name());
			continue;
		}
		transformed += transform(element.as_ref(), bold_percentage);
	}
	debug!("Processing pass over {} element(s) transformed {} text node(s).", batch.len(), transformed);

	let mut state = shared.borrow_mut();
	state.stats.passes += 1;
	state.stats.transformed += transformed;
}

/// Reattaches the observer and closes the debouncer's run on every exit path.
struct Reconnect<'a> {
	shared: &'a Rc<RefCell<Shared>>,
	observer: Option<&'a MutationObserver>,
	target: &'a web_sys::Node,
}
impl Drop for Reconnect<'_> {
	fn drop(&mut self) {
		let mut state = self.shared.borrow_mut();

		// The watch may have been stopped during the pass.
		if state.observer.is_some() {
			if let Some(observer) = self.observer {
				if let Err(error) = observe(observer, self.target) {
					error!("Failed to reconnect mutation observer; inserted content will no longer be transformed: {:?}", error);
				}
			}
		}

		if let Some(next) = state.debouncer.finish() {
			schedule(self.shared, &mut state, next);
		}
	}
}

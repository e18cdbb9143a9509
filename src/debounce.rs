//! Trailing-edge debouncing of change notifications, independent of any timer implementation.
//!
//! The host feeds batches into [`Debouncer::notify`] and, whenever that returns a [`Ticket`],
//! (re)starts its single timer with that ticket, cancelling any earlier one.
//! When the timer fires, [`Debouncer::fire`] hands out everything collected so far,
//! but only for the most recent ticket; stale timers that escaped cancellation get nothing.
//! After processing, the host calls [`Debouncer::finish`].
//!
//! ```text
//! Idle ──notify──▶ Scheduled ──fire──▶ Running ──finish──▶ Idle
//!                  ▲     │notify                │ (notified while running)
//!                  └─────┘                      ▼
//!                                           Scheduled
//! ```

use core::mem;

/// Identifies one scheduling of the debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
	Idle,
	Scheduled(Ticket),
	Running { next: Option<Ticket> },
}

#[derive(Debug)]
pub struct Debouncer<T> {
	pending: Vec<T>,
	state: State,
	generation: u64,
}
impl<T> Default for Debouncer<T> {
	fn default() -> Self {
		Self::new()
	}
}
impl<T> Debouncer<T> {
	#[must_use]
	pub fn new() -> Self {
		Self {
			pending: Vec::new(),
			state: State::Idle,
			generation: 0,
		}
	}

	#[must_use]
	pub fn state(&self) -> State {
		self.state
	}

	#[must_use]
	pub fn pending_len(&self) -> usize {
		self.pending.len()
	}

	/// Queues `items`.
	///
	/// Returns the ticket to (re)start the timer with, or [`None`] if `items` was empty,
	/// in which case any already scheduled timer stays as it is.
	pub fn notify(&mut self, items: impl IntoIterator<Item = T>) -> Option<Ticket> {
		let before = self.pending.len();
		self.pending.extend(items);
		if self.pending.len() == before {
			return None;
		}

		self.generation += 1;
		let ticket = Ticket(self.generation);
		self.state = match self.state {
			State::Idle | State::Scheduled(_) => State::Scheduled(ticket),
			State::Running { .. } => State::Running { next: Some(ticket) },
		};
		Some(ticket)
	}

	/// Takes the collected batch if `ticket` is the current one.
	#[must_use]
	pub fn fire(&mut self, ticket: Ticket) -> Option<Vec<T>> {
		match self.state {
			State::Scheduled(current) if current == ticket => {
				self.state = State::Running { next: None };
				Some(mem::take(&mut self.pending))
			}
			_ => None,
		}
	}

	/// Ends a run started by [`fire`](`Debouncer::fire`).
	///
	/// Returns the ticket the host must schedule if more items arrived in the meantime.
	pub fn finish(&mut self) -> Option<Ticket> {
		match self.state {
			State::Running { next: Some(next) } => {
				self.state = State::Scheduled(next);
				Some(next)
			}
			State::Running { next: None } => {
				self.state = State::Idle;
				None
			}
			State::Idle | State::Scheduled(_) => None,
		}
	}

	/// Drops everything pending and returns to [`State::Idle`].
	pub fn cancel(&mut self) {
		self.pending.clear();
		self.state = State::Idle;
	}
}

//! Bookkeeping for bursts still on screen.
//!
//! Each burst leaves spark elements and timers behind. [`Disposer`] holds
//! them until the sparks are gone, and on unmount cancels whatever timers
//! are left and detaches the sparks itself.

/// A spark element in the document.
pub trait SparkElement {
	/// Still attached to the document.
	fn is_attached(&self) -> bool;
	fn detach(&self);
}

/// A scheduled callback that has not necessarily fired yet.
pub trait PendingTimer {
	/// Cancel the callback if it has not run. No-op otherwise.
	fn cancel(self);
}

/// Elements and timers created by one burst.
pub struct PendingBurst<E, T> {
	pub elements: Vec<E>,
	pub timers: Vec<T>,
}

impl<E, T> Default for PendingBurst<E, T> {
	fn default() -> Self {
		Self {
			elements: Vec::new(),
			timers: Vec::new(),
		}
	}
}

pub struct Disposer<E, T> {
	bursts: Vec<PendingBurst<E, T>>,
}

impl<E, T> Default for Disposer<E, T> {
	fn default() -> Self {
		Self { bursts: Vec::new() }
	}
}

impl<E: SparkElement, T: PendingTimer> Disposer<E, T> {
	/// Start tracking `burst`, forgetting bursts whose sparks are all gone.
	pub fn track(&mut self, burst: PendingBurst<E, T>) {
		self.bursts
			.retain(|b| b.elements.iter().any(SparkElement::is_attached));
		self.bursts.push(burst);
	}

	/// Number of bursts still tracked.
	pub fn pending(&self) -> usize {
		self.bursts.len()
	}

	/// Cancel every pending timer and detach every spark.
	pub fn flush(&mut self) {
		for burst in self.bursts.drain(..) {
			for timer in burst.timers {
				timer.cancel();
			}
			for el in &burst.elements {
				el.detach();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	#[derive(Clone)]
	struct FakeSpark(Rc<Cell<bool>>);

	impl FakeSpark {
		fn attached() -> Self {
			Self(Rc::new(Cell::new(true)))
		}
	}

	impl SparkElement for FakeSpark {
		fn is_attached(&self) -> bool {
			self.0.get()
		}

		fn detach(&self) {
			self.0.set(false);
		}
	}

	struct FakeTimer(Rc<Cell<usize>>);

	impl PendingTimer for FakeTimer {
		fn cancel(self) {
			self.0.set(self.0.get() + 1);
		}
	}

	fn burst(
		sparks: &[FakeSpark],
		cancelled: &Rc<Cell<usize>>,
	) -> PendingBurst<FakeSpark, FakeTimer> {
		PendingBurst {
			elements: sparks.to_vec(),
			timers: (0..sparks.len() * 2)
				.map(|_| FakeTimer(cancelled.clone()))
				.collect(),
		}
	}

	#[test]
	fn flush_cancels_timers_and_detaches_sparks() {
		let cancelled = Rc::new(Cell::new(0));
		let sparks: Vec<FakeSpark> = (0..3).map(|_| FakeSpark::attached()).collect();
		let mut disposer = Disposer::default();
		disposer.track(burst(&sparks[..2], &cancelled));
		disposer.track(burst(&sparks[2..], &cancelled));
		assert_eq!(disposer.pending(), 2);

		disposer.flush();
		assert_eq!(cancelled.get(), 6);
		assert!(sparks.iter().all(|s| !s.is_attached()));
		assert_eq!(disposer.pending(), 0);

		disposer.flush();
		assert_eq!(cancelled.get(), 6);
	}

	#[test]
	fn finished_bursts_are_forgotten_on_next_track() {
		let cancelled = Rc::new(Cell::new(0));
		let first = [FakeSpark::attached(), FakeSpark::attached()];
		let mut disposer = Disposer::default();
		disposer.track(burst(&first, &cancelled));

		// One spark still flying keeps the burst alive.
		first[0].detach();
		disposer.track(burst(&[FakeSpark::attached()], &cancelled));
		assert_eq!(disposer.pending(), 2);

		first[1].detach();
		disposer.track(burst(&[FakeSpark::attached()], &cancelled));
		assert_eq!(disposer.pending(), 2);
		assert_eq!(cancelled.get(), 0);
	}
}

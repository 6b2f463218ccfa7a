//! One-shot undo tokens returned by registration APIs.

use std::convert::Infallible;
use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::source::Source;

type OnDestroy<E> = Box<dyn FnOnce() -> Result<(), E> + Send>;

/// Token that reverses a registration when [`destroy`](Self::destroy) is called.
///
/// The cleanup action runs at most once. It is taken out under a lock before it
/// runs, so concurrent or repeated `destroy` calls never invoke it twice and a
/// failing action is not retried.
///
/// Dropping the handle leaves the registration in place; use
/// [`into_guard`](Self::into_guard) for scope-bound registrations.
pub struct RegistrationHandle<E = Infallible> {
	on_destroy: Mutex<Option<OnDestroy<E>>>,
	source: Source,
}

impl RegistrationHandle {
	/// Creates a handle around an infallible cleanup action.
	#[track_caller]
	pub fn new(on_destroy: impl FnOnce() + Send + 'static) -> Self {
		Self::fallible(move || {
			on_destroy();
			Ok(())
		})
	}
}

impl<E> RegistrationHandle<E> {
	/// Creates a handle around a cleanup action that may fail.
	#[track_caller]
	pub fn fallible(on_destroy: impl FnOnce() -> Result<(), E> + Send + 'static) -> Self {
		Self {
			on_destroy: Mutex::new(Some(Box::new(on_destroy))),
			source: Source::caller(),
		}
	}

	/// Creates a handle with nothing to undo.
	#[track_caller]
	pub fn noop() -> Self {
		Self {
			on_destroy: Mutex::new(None),
			source: Source::caller(),
		}
	}

	/// Replaces the recorded provenance, e.g. with one from
	/// [`describe_caller`](crate::describe_caller).
	pub fn with_source(mut self, source: Source) -> Self {
		self.source = source;
		self
	}

	/// Where the handle was created.
	pub fn source(&self) -> &Source {
		&self.source
	}

	/// Whether the cleanup action has been taken, or there never was one.
	pub fn is_destroyed(&self) -> bool {
		self.on_destroy.lock().is_none()
	}

	/// Runs the cleanup action if it has not run yet.
	///
	/// # Errors
	///
	/// Returns the action's own error on the first call. The handle is inert
	/// afterwards either way, and later calls return `Ok(())`.
	pub fn destroy(&self) -> Result<(), E> {
		let on_destroy = self.on_destroy.lock().take();
		match on_destroy {
			Some(on_destroy) => {
				debug!(source = %self.source, "destroying registration");
				on_destroy()
			}
			None => {
				trace!(source = %self.source, "registration already destroyed");
				Ok(())
			}
		}
	}

	/// Converts the handle into a guard that destroys it on drop.
	pub fn into_guard(self) -> RegistrationGuard<E>
	where
		E: fmt::Display,
	{
		RegistrationGuard { handle: self }
	}
}

impl<E> fmt::Debug for RegistrationHandle<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RegistrationHandle")
			.field("source", &self.source)
			.field("destroyed", &self.is_destroyed())
			.finish()
	}
}

/// RAII wrapper that destroys its [`RegistrationHandle`] when dropped.
///
/// A cleanup failure during drop cannot be returned, so it is logged.
#[must_use = "dropping the guard destroys the registration immediately"]
pub struct RegistrationGuard<E: fmt::Display = Infallible> {
	handle: RegistrationHandle<E>,
}

impl<E: fmt::Display> RegistrationGuard<E> {
	/// The wrapped handle.
	pub fn handle(&self) -> &RegistrationHandle<E> {
		&self.handle
	}

	/// Destroys the registration now, surfacing any cleanup error.
	pub fn destroy(self) -> Result<(), E> {
		self.handle.destroy()
	}

	/// Releases the handle without destroying it.
	pub fn disarm(mut self) -> RegistrationHandle<E> {
		let inert = RegistrationHandle {
			on_destroy: Mutex::new(None),
			source: self.handle.source.clone(),
		};
		std::mem::replace(&mut self.handle, inert)
	}
}

impl<E: fmt::Display> fmt::Debug for RegistrationGuard<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("RegistrationGuard").field(&self.handle).finish()
	}
}

impl<E: fmt::Display> Drop for RegistrationGuard<E> {
	fn drop(&mut self) {
		if let Err(error) = self.handle.destroy() {
			warn!(source = %self.handle.source, %error, "registration cleanup failed on drop");
		}
	}
}

//! Registered functions paired with their provenance.

use std::fmt;
use std::sync::Arc;

use crate::source::Source;

/// Boxed function erased to one call signature.
pub type DynFn<A, R> = Box<dyn Fn(A) -> R + Send + Sync>;

/// Shared type-erased kernel, for registries holding many functions of one
/// signature. Cloning bumps a reference count.
pub type DynKernel<A, R> = Arc<Kernel<DynFn<A, R>>>;

/// A function together with the location it was registered from.
///
/// Arguments are passed as a single value; use a tuple for several.
#[derive(Clone)]
pub struct Kernel<F> {
	function: F,
	source: Source,
}

impl<F> Kernel<F> {
	/// Pairs `function` with the location it was registered from.
	pub fn new(function: F, source: Source) -> Self {
		Self { function, source }
	}

	/// Creates a kernel whose source is the caller's location.
	#[track_caller]
	pub fn here(function: F) -> Self {
		Self::new(function, Source::caller())
	}

	/// Where the function was registered. Fixed at construction.
	pub fn source(&self) -> &Source {
		&self.source
	}

	/// The wrapped function.
	pub fn function(&self) -> &F {
		&self.function
	}

	/// Calls the wrapped function, returning its result untouched.
	pub fn call<A, R>(&self, args: A) -> R
	where
		F: Fn(A) -> R,
	{
		(self.function)(args)
	}

	/// Splits the kernel back into its function and source.
	pub fn into_parts(self) -> (F, Source) {
		(self.function, self.source)
	}

	/// Erases the function type and shares the kernel behind an [`Arc`].
	pub fn boxed<A, R>(self) -> DynKernel<A, R>
	where
		F: Fn(A) -> R + Send + Sync + 'static,
	{
		let function: DynFn<A, R> = Box::new(self.function);
		Arc::new(Kernel::new(function, self.source))
	}
}

impl<F> fmt::Debug for Kernel<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Kernel")
			.field("source", &self.source)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests;

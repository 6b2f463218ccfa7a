/// Errors raised while validating registration inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// A qualified name did not contain exactly one `::` separator.
	#[error(
		"expected `name` to be of the form \"namespace::name\", but got {name}; \
		 operator names consist of a namespace and a name, e.g. aten::sin"
	)]
	InvalidFormat { name: String },

	/// A caller location was requested deeper than the tracked call stack.
	#[error("cannot skip {requested} frames: only {depth} tracked frames are active")]
	OutOfRange { requested: usize, depth: usize },
}

/// Result alias defaulting to the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

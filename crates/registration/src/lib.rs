//! Support primitives for operator registration.
//!
//! A registry built on this crate keeps each registered function as a
//! [`Kernel`] stamped with its [`Source`], validates keys with
//! [`parse_namespace`], and hands registrants a [`RegistrationHandle`] that
//! undoes the registration exactly once.

/// Error types shared by the parsers and the frame tracker.
pub mod error;
/// One-shot undo tokens and their RAII guard.
pub mod handle;
/// Functions paired with provenance.
pub mod kernel;
/// `namespace::name` parsing.
pub mod name;
/// Call-site provenance and tracked call frames.
pub mod source;

pub use error::{Error, Result};
pub use handle::{RegistrationGuard, RegistrationHandle};
pub use kernel::{DynFn, DynKernel, Kernel};
pub use name::{QualifiedName, SEPARATOR, parse_namespace};
pub use source::{CallFrame, Source, describe_caller, frame_depth};

// Only the serde round-trip tests use it.
#[cfg(all(test, not(feature = "serde")))]
use serde_json as _;

//! Provenance strings for registrations.
//!
//! A [`Source`] names the `<file>:<line>` a registration came from. The cheap
//! path is [`Source::caller`], which reads the location threaded through
//! `#[track_caller]`. When the interesting location sits several calls up,
//! each intermediate function opens a [`CallFrame`] and [`describe_caller`]
//! walks those frames by depth.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::panic::Location;

use tracing::trace;

use crate::error::{Error, Result};

thread_local! {
	static FRAMES: RefCell<FrameStack> = const {
		RefCell::new(FrameStack {
			next_id: 0,
			frames: Vec::new(),
		})
	};
}

/// Open frames on one thread, outermost first.
struct FrameStack {
	next_id: u64,
	frames: Vec<(u64, &'static Location<'static>)>,
}

impl FrameStack {
	fn push(&mut self, location: &'static Location<'static>) -> (u64, usize) {
		let id = self.next_id;
		self.next_id += 1;
		self.frames.push((id, location));
		(id, self.frames.len())
	}

	/// Removes the frame with `id`, wherever it sits.
	fn remove(&mut self, id: u64) -> bool {
		match self.frames.iter().rposition(|&(frame, _)| frame == id) {
			Some(index) => {
				self.frames.remove(index);
				true
			}
			None => false,
		}
	}

	fn location(&self, id: u64) -> Option<&'static Location<'static>> {
		self.frames.iter().rev().find(|&&(frame, _)| frame == id).map(|&(_, location)| location)
	}
}

/// A call site rendered as `<file-path>:<line-number>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Source {
	file: Cow<'static, str>,
	line: u32,
}

impl Source {
	/// Creates a source from an explicit file path and line.
	pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
		Self {
			file: file.into(),
			line,
		}
	}

	/// Returns the location this function was called from.
	///
	/// Inside a `#[track_caller]` function this resolves to that function's
	/// caller instead.
	#[track_caller]
	pub fn caller() -> Self {
		Location::caller().into()
	}

	/// File path part.
	pub fn file(&self) -> &str {
		&self.file
	}

	/// Line number part.
	pub fn line(&self) -> u32 {
		self.line
	}
}

impl From<&'static Location<'static>> for Source {
	fn from(location: &'static Location<'static>) -> Self {
		Self {
			file: Cow::Borrowed(location.file()),
			line: location.line(),
		}
	}
}

impl fmt::Display for Source {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.file, self.line)
	}
}

/// Guard marking a tracked frame on the current thread's call stack.
///
/// Open it first thing in a `#[track_caller]` function; the recorded location
/// is that function's call site. The frame is removed when the guard drops,
/// in whatever order guards are dropped.
#[must_use = "the frame is popped as soon as the guard is dropped"]
pub struct CallFrame {
	id: u64,
	depth: usize,
	// Frames live in a thread-local stack.
	_not_send: PhantomData<*const ()>,
}

impl CallFrame {
	/// Pushes the caller's location as a new innermost frame.
	#[track_caller]
	pub fn enter() -> Self {
		let location = Location::caller();
		let (id, depth) = FRAMES.with_borrow_mut(|stack| stack.push(location));
		trace!(file = location.file(), line = location.line(), depth, "entered call frame");
		Self {
			id,
			depth,
			_not_send: PhantomData,
		}
	}

	/// Location recorded for this frame.
	pub fn source(&self) -> Source {
		FRAMES
			.with_borrow(|stack| stack.location(self.id))
			.map_or_else(|| Source::new("<unknown>", 0), Source::from)
	}

	/// Stack depth when this frame was entered, starting at 1 for the
	/// outermost one.
	pub fn depth(&self) -> usize {
		self.depth
	}
}

impl Drop for CallFrame {
	fn drop(&mut self) {
		// Access only fails once the thread-local is torn down, and then
		// there is no stack left to clean.
		let removed = FRAMES
			.try_with(|stack| stack.borrow_mut().remove(self.id))
			.unwrap_or(false);
		trace!(depth = self.depth, removed, "left call frame");
	}
}

/// Number of [`CallFrame`]s open on the current thread.
pub fn frame_depth() -> usize {
	FRAMES.with_borrow(|stack| stack.frames.len())
}

/// Describes the call site `skip_frames` levels above the current function.
///
/// `0` is the location of this call, `1` the call site of the innermost
/// tracked function, `2` that function's caller, and so on.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] when `skip_frames` exceeds [`frame_depth`].
#[track_caller]
pub fn describe_caller(skip_frames: usize) -> Result<Source> {
	if skip_frames == 0 {
		return Ok(Source::caller());
	}

	FRAMES.with_borrow(|stack| {
		let depth = stack.frames.len();
		depth
			.checked_sub(skip_frames)
			.map(|index| Source::from(stack.frames[index].1))
			.ok_or(Error::OutOfRange {
				requested: skip_frames,
				depth,
			})
	})
}

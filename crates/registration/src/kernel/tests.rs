use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn call_forwards_arguments_and_result() {
	let add = Kernel::new(|(a, b): (i32, i32)| a + b, Source::new("x.py", 10));
	assert_eq!(add.call((1, 2)), 3);
	assert_eq!(add.source().to_string(), "x.py:10");
}

#[test]
fn call_leaves_source_untouched() {
	let kernel = Kernel::new(|x: u8| x, Source::new("x.py", 10));
	for n in 0..4 {
		kernel.call(n);
	}
	assert_eq!(kernel.source(), &Source::new("x.py", 10));
}

#[test]
fn failures_propagate_unchanged() {
	let parse = Kernel::new(|s: &str| s.parse::<u32>(), Source::new("x.py", 1));
	let expected = "nope".parse::<u32>();
	assert_eq!(parse.call("nope"), expected);
	assert_eq!(parse.call("42"), Ok(42));
}

#[test]
fn panics_propagate() {
	let kernel = Kernel::new(|()| -> u32 { panic!("kernel failed") }, Source::new("x.py", 1));
	let result = std::panic::catch_unwind(|| kernel.call(()));
	assert!(result.is_err());
}

#[test]
fn here_records_caller() {
	let (line, kernel) = (line!(), Kernel::here(|()| ()));
	assert_eq!(kernel.source(), &Source::new(file!(), line));
}

#[test]
fn boxed_kernels_share_a_type() {
	let kernels: Vec<DynKernel<(i64, i64), i64>> = vec![
		Kernel::new(|(a, b): (i64, i64)| a + b, Source::new("ops.rs", 1)).boxed(),
		Kernel::new(|(a, b): (i64, i64)| a * b, Source::new("ops.rs", 2)).boxed(),
	];
	let results: Vec<_> = kernels.iter().map(|k| k.call((3, 4))).collect();
	assert_eq!(results, vec![7, 12]);
	assert_eq!(kernels[1].source().line(), 2);
}

#[test]
fn dyn_kernel_calls_through_the_erased_function() {
	let kernel: DynKernel<&str, Result<u32, std::num::ParseIntError>> =
		Kernel::new(|s: &str| s.parse::<u32>(), Source::new("parse.rs", 9)).boxed();

	assert_eq!(kernel.call("17"), Ok(17));
	assert!(kernel.call("x").is_err());
	assert_eq!(kernel.source().to_string(), "parse.rs:9");
}

#[test]
fn dyn_kernel_clones_share_one_function() {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let kernel = Kernel::new(
		move |x: u32| {
			counter.fetch_add(1, Ordering::SeqCst);
			x + 1
		},
		Source::new("inc.rs", 2),
	)
	.boxed();
	let clone = Arc::clone(&kernel);

	assert_eq!((kernel.call(1), clone.call(2)), (2, 3));
	assert_eq!(calls.load(Ordering::SeqCst), 2);
	assert!(Arc::ptr_eq(&kernel, &clone));
}

#[test]
fn into_parts_returns_both_halves() {
	let (function, source) = Kernel::new(|x: i32| -x, Source::new("neg.rs", 5)).into_parts();
	assert_eq!(function(3), -3);
	assert_eq!(source.to_string(), "neg.rs:5");
}

#[test]
fn debug_omits_function() {
	let kernel = Kernel::new(|()| (), Source::new("x.py", 10));
	let rendered = format!("{kernel:?}");
	assert!(rendered.starts_with("Kernel { source: "), "{rendered}");
	assert!(rendered.ends_with(".. }"), "{rendered}");
}

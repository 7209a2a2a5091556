//! Smoke tests for the internal plumbing. The exhaustive per-family
//! scenario vectors live in `tests/scenarios.rs`, where they can exercise
//! the crate exactly as an external caller would.

use crate::std_support::StringSink;
use crate::{args, format};

fn run(template: &str, argv: &[crate::Arg]) -> (alloc_str::Str, i32) {
    let mut sink = StringSink::new();
    let mut list = crate::ArgList::new(argv);
    let n = format(&mut sink, template.as_bytes(), &mut list);
    (alloc_str::Str(sink.0), n)
}

mod alloc_str {
    extern crate std;
    pub(crate) struct Str(pub(crate) std::string::String);
    impl PartialEq<&str> for Str {
        fn eq(&self, other: &&str) -> bool {
            self.0 == *other
        }
    }
    impl core::fmt::Debug for Str {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            core::fmt::Debug::fmt(&self.0, f)
        }
    }
}

#[test]
fn plain_literal() {
    let (out, n) = run("hello, world", args!());
    assert_eq!(out, "hello, world");
    assert_eq!(n, 12);
}

#[test]
fn decimal_and_width() {
    let (out, _) = run("[%5d]", args!(42i32));
    assert_eq!(out, "[   42]");
}

#[test]
fn left_align_and_sign() {
    let (out, _) = run("[%-+5d]", args!(3i32));
    assert_eq!(out, "[+3   ]");
}

#[test]
fn zero_padding_with_sign() {
    let (out, _) = run("%06d", args!(-42i32));
    assert_eq!(out, "-00042");
}

#[test]
fn hex_alternate_form() {
    let (out, _) = run("%#x", args!(255u32));
    assert_eq!(out, "0xff");
}

#[test]
fn string_precision_truncates() {
    let (out, _) = run("%.3s", args!("hello"));
    assert_eq!(out, "hel");
}

#[test]
fn percent_literal() {
    let (out, _) = run("100%%", args!());
    assert_eq!(out, "100%");
}

#[test]
fn char_conversion() {
    let (out, _) = run("[%c]", args!('Q'));
    assert_eq!(out, "[Q]");
}

#[test]
fn float_fixed_default_precision() {
    let (out, _) = run("%f", args!(3.5f64));
    assert_eq!(out, "3.500000");
}

#[test]
fn float_rounds_up_at_zero_precision() {
    let (out, _) = run("%.0f", args!(0.6f64));
    assert_eq!(out, "1");
}

#[test]
fn scientific_notation() {
    let (out, _) = run("%.2e", args!(12345.0f64));
    assert_eq!(out, "1.23e+04");
}

#[test]
fn null_string_renders_placeholder() {
    let mut sink = StringSink::new();
    let argv = &[crate::Arg::Str(None)];
    let mut list = crate::ArgList::new(argv);
    let n = format(&mut sink, b"%s", &mut list);
    assert!(n > 0);
    assert_eq!(sink.0, "(null)");
}

#[test]
fn bad_conversion_reports_bad_format() {
    let mut sink = StringSink::new();
    let mut list = crate::ArgList::new(&[]);
    let n = format(&mut sink, b"%q", &mut list);
    assert_eq!(n, crate::BAD_FORMAT);
}

//! A reentrant, allocation-free `printf`-style text formatting engine.
//!
//! Built for targets where `core::fmt` is too heavy or too indirect: no
//! heap, no locks, no hidden state between calls. Every call to [`format`]
//! is independent — the whole of its working state is a stack frame and
//! whatever [`Sink`] the caller hands it.
//!
//! Three build-time tiers trade code size for capability (pick exactly one
//! via Cargo feature):
//!
//! - `tier-micro`: `d u x X b c s p %` and the `space + - 0` flags only;
//!   width/precision capped at 80; unqualified integers default to 16 bits.
//! - `tier-tiny`: the micro set, plus `#`, format continuation, and template
//!   continuation — still no grouping, no floating point.
//! - `tier-full` (default): the full C99 set (`d i o u x X c s p n e E f F g
//!   G`) plus `b C I U k`, grouping (`[...]`), arbitrary-base integers
//!   (`:N`), centering (`^`), SI/engineering notation (`!`), fixed-point
//!   `%k`, length qualifiers (`h hh l ll j z t L`), and alternate-memory
//!   (ROM) pointers.
//!
//! No transcendental math and no `libm`: the one place this engine needs
//! binary-to-decimal conversion ([`radix`]), it gets there with integer
//! arithmetic alone — this crate has no floating-point dependency beyond
//! the `+ - * /` already built into `f64` itself. Floating-point conversions
//! are themselves full-tier-only, so [`radix`] and [`float_conv`] compile out
//! entirely below that tier.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(all(feature = "tier-micro", feature = "tier-tiny"))]
compile_error!("printf-core: enable exactly one of tier-micro, tier-tiny, tier-full");
#[cfg(all(feature = "tier-micro", feature = "tier-full"))]
compile_error!("printf-core: enable exactly one of tier-micro, tier-tiny, tier-full");
#[cfg(all(feature = "tier-tiny", feature = "tier-full"))]
compile_error!("printf-core: enable exactly one of tier-micro, tier-tiny, tier-full");
#[cfg(not(any(feature = "tier-micro", feature = "tier-tiny", feature = "tier-full")))]
compile_error!("printf-core: enable one of tier-micro, tier-tiny, tier-full");

mod args;
mod compose;
mod error;
#[cfg(feature = "tier-full")]
mod fixed_point;
mod flags;
#[cfg(feature = "tier-full")]
mod float_conv;
mod int_conv;
mod parser;
#[cfg(feature = "tier-full")]
mod radix;
mod sink;
mod spec;
mod str_conv;

#[cfg(feature = "std")]
pub mod std_support;

#[cfg(test)]
mod tests;

pub use args::{Arg, ArgList, ByteSource, Bytes, ToArg};
pub use error::{FormatError, BAD_FORMAT};
pub use sink::{FmtSink, Sink};

/// Run `template` against `args`, streaming formatted output to `sink`.
///
/// Returns the number of bytes the call emitted (spec §6: the `printf`
/// convention), or [`BAD_FORMAT`] if the template was malformed, an
/// argument's type didn't match its conversion, or `sink` refused output
/// partway through — in every failure case, whatever had already reached
/// `sink` stays there; there is no rollback.
pub fn format(sink: &mut impl Sink, template: &[u8], args: &mut ArgList) -> i32 {
    match parser::run(sink, template, args) {
        Ok(n) => n,
        Err(_) => BAD_FORMAT,
    }
}

/// Run `template` against `args`, writing through any [`core::fmt::Write`]
/// implementation (e.g. a `core::fmt::Formatter` from inside a `Display`
/// impl) instead of a dedicated [`Sink`].
pub fn format_to_fmt(w: &mut impl core::fmt::Write, template: &[u8], args: &mut ArgList) -> i32 {
    let mut sink = FmtSink(w);
    format(&mut sink, template, args)
}

/// Build an `&[Arg]` from a list of expressions via [`ToArg`], the same
/// shorthand the teacher crate's own `sprintf!` offers over its `ArgList`.
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        &[$($crate::ToArg::to_arg($arg)),*]
    };
}

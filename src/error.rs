//! Error sentinel and tier-dependent limits.
//!
//! Follows the plain-enum, no-`std::error::Error`-impl idiom `pw_status::Error`
//! uses in the pigweed pack: a `Copy` enum over `core::result::Result`, nothing
//! allocated, nothing that needs `std`.

/// The single value [`crate::format`] returns to the caller on any failure.
pub const BAD_FORMAT: i32 = -1;

/// Maximum field width, in bytes, for the active tier.
#[cfg(feature = "tier-full")]
pub const MAXWIDTH: u32 = 500;
#[cfg(not(feature = "tier-full"))]
pub const MAXWIDTH: u32 = 80;

/// Maximum precision, in digits, for the active tier.
#[cfg(feature = "tier-full")]
pub const MAXPREC: u32 = 500;
#[cfg(not(feature = "tier-full"))]
pub const MAXPREC: u32 = 80;

/// Maximum numeric base accepted by the `:` base modifier.
pub const MAXBASE: u32 = 36;

/// Typed failure reasons. All of them collapse to [`BAD_FORMAT`] at the public
/// API boundary (spec §7): nothing past that boundary is allowed to inspect
/// the variant and keep going.
#[non_exhaustive]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FormatError {
    /// The template pointer/slice was empty where a template was required.
    NullTemplate,
    /// A parsed width exceeded [`MAXWIDTH`].
    WidthOutOfRange,
    /// A parsed precision exceeded [`MAXPREC`].
    PrecisionOutOfRange,
    /// A parsed base was outside `2..=36`, or `*` produced `0` or `1`.
    BaseOutOfRange,
    /// A `[...]` grouping modifier had no closing `]` before the template ended.
    UnterminatedGrouping,
    /// `%C` was immediately followed by the template terminator.
    EmptyRepeatChar,
    /// The `L` length qualifier was applied to a floating-point conversion.
    LengthQualifierOnFloat,
    /// The conversion letter wasn't one this tier recognizes.
    UnknownConversion,
    /// A chain of format-continuations (spec §4.1 step 10, §6) nested deeper
    /// than this crate's bound on recursive `scan` calls. Not named in spec
    /// §7's failure list because the source's `goto`-based restart has no
    /// such limit; a safe recursive implementation needs one to keep a
    /// malicious or buggy chain of continuations from overflowing the stack.
    TooManyContinuations,
    /// The sink refused a write.
    SinkFailure,
}

pub type Result<T> = core::result::Result<T, FormatError>;

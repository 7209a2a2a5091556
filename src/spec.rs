//! [`FormatSpec`]: the per-conversion working record (spec §3).

use crate::flags::Flags;

/// Length (`h`/`hh`/`l`/`ll`/`j`/`z`/`t`/`L`) qualifier.
///
/// Design note (spec §9): the source ORs the low bit of the qualifier letter
/// onto a sentinel to fold `h`/`hh` and `l`/`ll` together, relying on those
/// letters having even ASCII codes. That trick buys nothing in a target
/// language with real enums, so `Hh` and `Ll` are distinct variants here.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum LengthQualifier {
    None,
    H,
    Hh,
    L,
    Ll,
    J,
    Z,
    T,
    /// `L`, valid only on floating-point conversions in real C; spec.md makes
    /// it an error everywhere (§6: "`L` qualifier on FP" is a failure case).
    BigL,
}

impl Default for LengthQualifier {
    fn default() -> Self {
        LengthQualifier::None
    }
}

impl LengthQualifier {
    /// Truncate a 64-bit signed value to the width this qualifier selects,
    /// matching spec §4.2 step 1 ("read the signed argument of the
    /// qualifier-selected width"). An absent qualifier (`None`) falls back to
    /// the tier's default `int` width — 16-bit on micro (spec §2: "16-bit
    /// values"), 32-bit on tiny/full.
    pub(crate) fn truncate_signed(self, v: i64) -> i64 {
        match self {
            LengthQualifier::H => v as i16 as i64,
            LengthQualifier::Hh => v as i8 as i64,
            LengthQualifier::None => default_int_width_signed(v),
            LengthQualifier::L | LengthQualifier::Ll | LengthQualifier::J | LengthQualifier::Z | LengthQualifier::T => v,
            LengthQualifier::BigL => v,
        }
    }

    pub(crate) fn truncate_unsigned(self, v: u64) -> u64 {
        match self {
            LengthQualifier::H => v as u16 as u64,
            LengthQualifier::Hh => v as u8 as u64,
            LengthQualifier::None => default_int_width_unsigned(v),
            LengthQualifier::L | LengthQualifier::Ll | LengthQualifier::J | LengthQualifier::Z | LengthQualifier::T => v,
            LengthQualifier::BigL => v,
        }
    }
}

#[cfg(feature = "tier-micro")]
fn default_int_width_signed(v: i64) -> i64 {
    v as i16 as i64
}
#[cfg(not(feature = "tier-micro"))]
fn default_int_width_signed(v: i64) -> i64 {
    v as i32 as i64
}

#[cfg(feature = "tier-micro")]
fn default_int_width_unsigned(v: u64) -> u64 {
    v as u16 as u64
}
#[cfg(not(feature = "tier-micro"))]
fn default_int_width_unsigned(v: u64) -> u64 {
    v as u32 as u64
}

/// A right-to-left grouping pattern: `(separator, run_length)` pairs parsed
/// out of a template's `[...]` modifier, plus the `*`/`-` special forms
/// (spec §3's `GroupingPattern`, §4.2 step 4).
///
/// Parsing is intentionally lazy: the parser only records the raw byte span
/// between `[` and `]`; [`crate::int_conv`] walks it right-to-left while it
/// inserts separators, since that's the only consumer and the only place a
/// `*` run-length needs to pull from the argument cursor.
#[derive(Clone, Copy)]
pub(crate) struct RawGrouping<'a> {
    pub(crate) body: &'a [u8],
}

/// Per-conversion working record (spec §3 `FormatSpec`).
#[derive(Default)]
pub(crate) struct FormatSpec<'a> {
    pub(crate) flags: Flags,
    pub(crate) width: u32,
    /// `-1` means "absent"; encoded as `None` here instead of a sentinel int.
    pub(crate) precision: Option<u32>,
    /// `0` means "default for this specifier".
    pub(crate) base: u32,
    pub(crate) length: LengthQualifier,
    pub(crate) grouping: Option<RawGrouping<'a>>,
    /// `%C`'s repeat character, taken inline from the template rather than
    /// the argument list (spec §3, §4.1 step 11).
    pub(crate) rep_char: Option<u8>,
    /// `%k`'s `{w_int.w_frac}`, default `(16, 16)`.
    pub(crate) fixed_point_widths: (u32, u32),
}

//! Output composer and padding calculator (spec §4.4, §4.8).

use crate::error::Result;
use crate::flags::Flags;
use crate::sink::{emit, emit_pad, Sink};

/// Left/right space counts for a field of the given rendered `length` and
/// `width`, per spec §4.4.
pub(crate) struct Padding {
    pub(crate) left: u32,
    pub(crate) right: u32,
}

/// Compute left/right padding for a rendered chunk of `length` bytes in a
/// field of `width`, honoring `MINUS` and `CARET`.
///
/// The `CARET`-with-odd-deficit tie-break matches spec §8's testable
/// property exactly ("left = ceil(deficit/2) if not MINUS... else floor"),
/// which is the literal arithmetic result of §4.4's formula
/// `left = (deficit + (1 if not MINUS else 0)) / 2`. §4.4's prose gloss on
/// that formula ("places the odd remainder on the right unless MINUS...")
/// reads backwards from the formula it's describing; the formula and the
/// §8 property agree with each other, so they're what's implemented —
/// recorded as a resolved documentation inconsistency in DESIGN.md rather
/// than guessed at twice.
pub(crate) fn compute_padding(length: u32, width: u32, flags: Flags) -> Padding {
    let deficit = width.saturating_sub(length);
    if flags.contains(Flags::CARET) {
        let minus = flags.contains(Flags::MINUS);
        let left = if minus { deficit / 2 } else { (deficit + 1) / 2 };
        Padding { left, right: deficit - left }
    } else if flags.contains(Flags::MINUS) {
        Padding { left: 0, right: deficit }
    } else {
        Padding { left: deficit, right: 0 }
    }
}

/// The seven logical output sections (spec §4 component 3), emitted in
/// fixed order by [`compose`]. Every converter builds one (or, for the
/// floating-point layouts, several in sequence — spec §4.8: "up to four
/// composer calls").
#[derive(Default)]
pub(crate) struct Sections<'a> {
    pub(crate) left_space: u32,
    pub(crate) prefix: &'a [u8],
    pub(crate) zero_pad: u32,
    pub(crate) body: &'a [u8],
    /// Zero padding after the body but before any trailing digits — used by
    /// the `f`/`F` layout's `pz3`/`pz4` (spec §4.6).
    pub(crate) right_zero_pad: u32,
    pub(crate) trailing: &'a [u8],
    pub(crate) right_space: u32,
}

/// Emit all seven sections in order, returning the total bytes requested of
/// the sink or [`FormatError::SinkFailure`](crate::error::FormatError::SinkFailure)
/// on the first refusal (spec §4.8's error policy: no partial rollback, but
/// also no further output once the sink refuses).
pub(crate) fn compose(sink: &mut impl Sink, s: &Sections, count: &mut i32) -> Result<()> {
    emit_pad(sink, b' ', s.left_space, count)?;
    emit(sink, s.prefix, count)?;
    emit_pad(sink, b'0', s.zero_pad, count)?;
    emit(sink, s.body, count)?;
    emit_pad(sink, b'0', s.right_zero_pad, count)?;
    emit(sink, s.trailing, count)?;
    emit_pad(sink, b' ', s.right_space, count)?;
    Ok(())
}

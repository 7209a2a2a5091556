//! Integer converter: `d i I b o u U x X` (spec §4.2).

use crate::args::ArgList;
use crate::compose::{compose, compute_padding, Sections};
use crate::error::Result;
use crate::flags::Flags;
use crate::sink::Sink;
use crate::spec::{FormatSpec, RawGrouping};

/// Scratch buffer size. Spec §5's "≥ 130 bytes for the full tier, 16 bytes
/// for micro/tiny" is a floor, not a cap: precision can zero-extend the
/// digit run out to `MAXPREC` (spec §3/§6), and that extension has to fit
/// in this buffer alongside 64-bit binary's 64 digits, grouping separators
/// (roughly one per digit in the worst case of `[x1]`), and a 2-byte prefix
/// and sign — so this is sized off `MAXPREC` directly rather than off the
/// widest *unpadded* representation.
#[cfg(feature = "tier-full")]
pub(crate) const INT_BUF_LEN: usize = crate::error::MAXPREC as usize * 2 + 32;
#[cfg(not(feature = "tier-full"))]
pub(crate) const INT_BUF_LEN: usize = crate::error::MAXPREC as usize + 32;

/// Which letter requested this conversion; determines default base, prefix
/// spelling, and signedness.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntKind {
    Decimal,
    Unsigned,
    Octal,
    Hex,
    HexUpper,
    Binary,
}

fn digit_char(d: u32, uppercase: bool) -> u8 {
    if d < 10 {
        b'0' + d as u8
    } else if uppercase {
        b'A' + (d - 10) as u8
    } else {
        b'a' + (d - 10) as u8
    }
}

/// Write `value` in `base` right-to-left into the tail of `buf`. Returns the
/// start index; `buf[start..]` are the digits, most-significant first.
fn write_digits(buf: &mut [u8], mut value: u64, base: u32, uppercase: bool) -> usize {
    let mut i = buf.len();
    if value == 0 {
        i -= 1;
        buf[i] = b'0';
        return i;
    }
    while value > 0 {
        let d = (value % base as u64) as u32;
        i -= 1;
        buf[i] = digit_char(d, uppercase);
        value /= base as u64;
    }
    i
}

#[cfg(feature = "tier-full")]
mod grouping {
    use super::*;

    const MAX_ENTRIES: usize = 8;

    #[derive(Clone, Copy)]
    enum RunLen {
        Fixed(u32),
        Star,
    }

    #[derive(Clone, Copy)]
    struct GroupEntry {
        sep: u8,
        run: RunLen,
        stop_after: bool,
    }

    /// Parse a `[...]` body into up to `MAX_ENTRIES` `(sep, run)` pairs, per
    /// the `grouping := '[' (group-spec)* ']'` grammar (spec §6). Malformed
    /// trailing fragments (a separator with no digit/`*` run) are dropped
    /// silently, matching the "irrelevant fields are silently ignored"
    /// policy (spec §4.1) rather than failing the whole format — only an
    /// unterminated `[` (already rejected by the parser before this runs) is
    /// a hard error.
    fn parse_entries(body: &[u8]) -> ([GroupEntry; MAX_ENTRIES], usize) {
        let mut entries = [GroupEntry { sep: b',', run: RunLen::Fixed(3), stop_after: false }; MAX_ENTRIES];
        let mut count = 0;
        let mut i = 0;
        while i < body.len() && count < MAX_ENTRIES {
            let mut stop_after = false;
            if body[i] == b'-' {
                stop_after = true;
                i += 1;
                if i >= body.len() {
                    break;
                }
            }
            let sep = body[i];
            i += 1;
            if i >= body.len() {
                break;
            }
            let run = if body[i] == b'*' {
                i += 1;
                RunLen::Star
            } else {
                let mut n: u32 = 0;
                let start = i;
                while i < body.len() && body[i].is_ascii_digit() {
                    n = n.saturating_mul(10).saturating_add((body[i] - b'0') as u32);
                    i += 1;
                }
                if i == start {
                    break;
                }
                RunLen::Fixed(n.max(1))
            };
            entries[count] = GroupEntry { sep, run, stop_after };
            count += 1;
        }
        (entries, count)
    }

    fn resolve_run(run: RunLen, args: &mut ArgList) -> usize {
        match run {
            RunLen::Fixed(n) => n.max(1) as usize,
            RunLen::Star => {
                let v = args.next_star();
                (if v <= 0 { 1 } else { v as usize }).max(1)
            }
        }
    }

    /// Insert separators into `digits`, writing the grouped result
    /// right-aligned into `out`. Returns the start index of the grouped
    /// content within `out`.
    ///
    /// Application order is right-to-left through the *parsed* entry list
    /// (last-declared entry nearest the units digit), mirroring
    /// `printf-compat`'s own `Locale::digit_group_iter` (`locale.rs`): once
    /// the declared entries are exhausted, the *first*-declared entry keeps
    /// repeating forever, unless it carries a leading `-`, in which case the
    /// remaining digits are emitted as one final, unseparated run — the
    /// same "`group_repeat: false` → infinite run" behavior that iterator
    /// implements for a fixed locale grouping table.
    pub(crate) fn apply(grouping: RawGrouping, digits: &[u8], args: &mut ArgList, out: &mut [u8]) -> usize {
        let (entries, count) = parse_entries(grouping.body);
        if count == 0 {
            let start = out.len() - digits.len();
            out[start..].copy_from_slice(digits);
            return start;
        }
        let mut out_idx = out.len();
        let mut pos = digits.len();
        let mut idx: isize = count as isize - 1;
        let mut stopped = false;
        loop {
            if pos == 0 {
                break;
            }
            if stopped {
                out_idx -= pos;
                out[out_idx..out_idx + pos].copy_from_slice(&digits[..pos]);
                pos = 0;
                break;
            }
            let e = entries[idx.max(0) as usize];
            let run = resolve_run(e.run, args);
            let take = run.min(pos);
            pos -= take;
            out_idx -= take;
            out[out_idx..out_idx + take].copy_from_slice(&digits[pos..pos + take]);
            if pos == 0 {
                break;
            }
            out_idx -= 1;
            out[out_idx] = e.sep;
            if idx > 0 {
                idx -= 1;
            } else if e.stop_after {
                stopped = true;
            }
        }
        out_idx
    }
}

fn default_base(kind: IntKind) -> u32 {
    match kind {
        IntKind::Decimal | IntKind::Unsigned => 10,
        IntKind::Octal => 8,
        IntKind::Hex | IntKind::HexUpper => 16,
        IntKind::Binary => 2,
    }
}

/// Format and emit one integer conversion.
pub(crate) fn convert(
    sink: &mut impl Sink,
    spec: &FormatSpec,
    kind: IntKind,
    raw: i64,
    unsigned_raw: u64,
    args: &mut ArgList,
    count: &mut i32,
) -> Result<()> {
    let is_signed = matches!(kind, IntKind::Decimal);

    // Step 1: sign acquisition.
    let (negative, magnitude) = if is_signed {
        let v = spec.length.truncate_signed(raw);
        if v < 0 {
            // avoid overflow on i64::MIN by widening through u64 two's complement.
            (true, (v as i64).unsigned_abs())
        } else {
            (false, v as u64)
        }
    } else {
        (false, spec.length.truncate_unsigned(unsigned_raw))
    };

    let mut flags = spec.flags;
    let sign_byte: Option<u8> = if negative {
        Some(b'-')
    } else if is_signed && flags.contains(Flags::PLUS) {
        Some(b'+')
    } else if is_signed && flags.contains(Flags::SPACE) {
        Some(b' ')
    } else {
        None
    };
    // "A nonempty sign prefix also implicitly sets HASH" (spec §4.2 step 1):
    // folds sign and alternate-form prefixes into one generic prefix section
    // for zero-padding purposes.
    if sign_byte.is_some() {
        flags.insert(Flags::HASH);
    }

    // Base override (`:N`) only applies to the plain/extended decimal
    // conversions (`%i %I %u %U`, spec §3); `%o %x %X %b` always use their
    // fixed base regardless of a trailing `:N`.
    let base = if matches!(kind, IntKind::Decimal | IntKind::Unsigned) && spec.base != 0 {
        spec.base
    } else {
        default_base(kind)
    };
    // BANG forces lowercase digits/prefix even on the uppercase-hex letter
    // (spec §6) — this is how `%p`'s internal `#!N.NX` rewrite gets its
    // lowercase `0x1234abcd` rendering out of an otherwise-uppercase request.
    let uppercase = matches!(kind, IntKind::HexUpper) && !flags.contains(Flags::BANG);

    let mut digit_buf = [0u8; INT_BUF_LEN];
    let digits_start = write_digits(&mut digit_buf, magnitude, base, uppercase);
    let mut digits: &[u8] = &digit_buf[digits_start..];

    // Precision: minimum digit count; disables ZERO; precision 0 + value 0 -> no digits.
    if let Some(prec) = spec.precision {
        flags.remove(Flags::ZERO);
        if prec == 0 && magnitude == 0 {
            digits = &[];
        } else if (prec as usize) > digits.len() {
            // `digits` borrows `digit_buf`, so the padded run has to live in
            // a second, separate buffer. `prec` is already bounded by
            // `MAXPREC` in the parser, and `INT_BUF_LEN` is sized off the
            // same constant, so this `.min` never actually binds — it's a
            // defensive backstop, not the thing keeping `want` in range.
            let want = (prec as usize).min(INT_BUF_LEN - 4);
            let pad_start = INT_BUF_LEN - want;
            let mut padded = [b'0'; INT_BUF_LEN];
            let zeros = want - digits.len();
            padded[pad_start + zeros..pad_start + want].copy_from_slice(digits);
            return convert_with_digits(sink, spec, kind, &padded[pad_start..pad_start + want], sign_byte, flags, base, uppercase, magnitude, args, count);
        }
    }

    convert_with_digits(sink, spec, kind, digits, sign_byte, flags, base, uppercase, magnitude, args, count)
}

#[allow(clippy::too_many_arguments)]
fn convert_with_digits(
    sink: &mut impl Sink,
    spec: &FormatSpec,
    kind: IntKind,
    digits: &[u8],
    sign_byte: Option<u8>,
    flags: Flags,
    _base: u32,
    _uppercase: bool,
    magnitude: u64,
    #[allow(unused_variables)] args: &mut ArgList,
    count: &mut i32,
) -> Result<()> {
    // Step 2: alternate-form prefix.
    let mut prefix_buf = [0u8; 3];
    let mut prefix_len = 0usize;
    if let Some(s) = sign_byte {
        prefix_buf[0] = s;
        prefix_len = 1;
    }
    if flags.contains(Flags::HASH) && !digits.is_empty() {
        match kind {
            IntKind::Octal => {
                if magnitude != 0 && !(digits[0] == b'0' && digits.len() == 1 && prefix_len == 1) {
                    // classic C rule: only if the digits don't already start with 0.
                    if digits.first() != Some(&b'0') {
                        prefix_buf[prefix_len] = b'0';
                        prefix_len += 1;
                    }
                }
            }
            IntKind::Hex => {
                if magnitude != 0 || flags.contains(Flags::BANG) {
                    prefix_buf[prefix_len] = b'0';
                    prefix_buf[prefix_len + 1] = b'x';
                    prefix_len += 2;
                }
            }
            IntKind::HexUpper => {
                if magnitude != 0 || flags.contains(Flags::BANG) {
                    prefix_buf[prefix_len] = b'0';
                    prefix_buf[prefix_len + 1] = if flags.contains(Flags::BANG) { b'x' } else { b'X' };
                    prefix_len += 2;
                }
            }
            IntKind::Binary => {
                if magnitude != 0 || flags.contains(Flags::BANG) {
                    prefix_buf[prefix_len] = b'0';
                    prefix_buf[prefix_len + 1] = b'b';
                    prefix_len += 2;
                }
            }
            IntKind::Decimal | IntKind::Unsigned => {}
        }
    }
    let prefix = &prefix_buf[..prefix_len];

    #[cfg(feature = "tier-full")]
    let mut group_buf = [0u8; INT_BUF_LEN * 2];
    #[cfg(feature = "tier-full")]
    let grouped: &[u8] = if let Some(g) = spec.grouping {
        let start = grouping::apply(g, digits, args, &mut group_buf);
        &group_buf[start..]
    } else {
        digits
    };
    #[cfg(not(feature = "tier-full"))]
    let grouped: &[u8] = digits;

    let total_len = (prefix.len() + grouped.len()) as u32;
    let pad = compute_padding(total_len, spec.width, flags);

    let zero_active = flags.contains(Flags::ZERO) && !flags.contains(Flags::MINUS) && !flags.contains(Flags::CARET);
    let (left_space, zero_pad, right_space) = if zero_active {
        (0, pad.left, pad.right)
    } else {
        (pad.left, 0, pad.right)
    };

    let sections = Sections {
        left_space,
        prefix,
        zero_pad,
        body: grouped,
        right_zero_pad: 0,
        trailing: &[],
        right_space,
    };
    compose(sink, &sections, count)
}

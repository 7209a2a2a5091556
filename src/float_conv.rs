//! Floating-point converters: `f F e E g G` (spec §4.6).

use crate::compose::{compose, compute_padding, Sections};
use crate::error::Result;
use crate::flags::Flags;
use crate::radix::{decompose, Decimal, DEC_SIG_FIG};
use crate::sink::Sink;
use crate::spec::FormatSpec;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum FloatKind {
    Fixed,
    FixedUpper,
    Sci,
    SciUpper,
    General,
    GeneralUpper,
}

const DEFAULT_PRECISION: u32 = 6;

/// SI/engineering unit prefixes for `%!f` (spec §4.6), indexed by
/// `exponent-of-1000 + 8` so the no-prefix case (`10^0`) lands on the centre
/// slot. A `0` entry means "in range, but no symbol" (the `10^0` slot itself).
const SI_PREFIXES: [u8; 17] = [
    b'y', b'z', b'a', b'f', b'p', b'n', b'u', b'm', 0, b'k', b'M', b'G', b'T', b'P', b'E', b'Z', b'Y',
];

/// Round the leading `keep` digits of a 16-digit mantissa, propagating a
/// carry that overflows into a leading `1` (e.g. rounding `999…` up shifts
/// the whole window right and bumps `exp10`).
fn round_digits(digits: &[u8; DEC_SIG_FIG as usize], exp10: i32, keep: usize) -> ([u8; DEC_SIG_FIG as usize], i32) {
    let mut out = [b'0'; DEC_SIG_FIG as usize];
    out[..keep].copy_from_slice(&digits[..keep]);
    let mut exp = exp10;
    if keep < digits.len() && digits[keep] >= b'5' {
        let mut i = keep as isize - 1;
        loop {
            if i < 0 {
                for j in (1..keep).rev() {
                    out[j] = out[j - 1];
                }
                // Even a zero-digit window (`keep == 0`, every digit rounds
                // away) still produces a new leading significant digit —
                // the carry always lands on `out[0]`.
                out[0] = b'1';
                exp += 1;
                break;
            }
            let idx = i as usize;
            if out[idx] == b'9' {
                out[idx] = b'0';
                i -= 1;
            } else {
                out[idx] += 1;
                break;
            }
        }
    }
    (out, exp)
}

fn sign_prefix(negative: bool, flags: Flags) -> Option<u8> {
    if negative {
        Some(b'-')
    } else if flags.contains(Flags::PLUS) {
        Some(b'+')
    } else if flags.contains(Flags::SPACE) {
        Some(b' ')
    } else {
        None
    }
}

fn emit_sections(sink: &mut impl Sink, prefix: &[u8], body: &[u8], trailing: &[u8], width: u32, flags: Flags, count: &mut i32) -> Result<()> {
    let total = (prefix.len() + body.len() + trailing.len()) as u32;
    let pad = compute_padding(total, width, flags);
    let zero_active = flags.contains(Flags::ZERO) && !flags.contains(Flags::MINUS) && !flags.contains(Flags::CARET);
    let (left_space, zero_pad) = if zero_active { (0, pad.left) } else { (pad.left, 0) };
    let sections = Sections {
        left_space,
        prefix,
        zero_pad,
        body,
        right_zero_pad: 0,
        trailing,
        right_space: pad.right,
    };
    compose(sink, &sections, count)
}

/// `%f`/`%F`: fixed notation, `prec` digits after the point. Under `BANG`
/// the decimal point is shifted to the nearest multiple-of-3 exponent and an
/// SI/engineering unit prefix is appended, falling back to plain fixed
/// notation when that exponent falls outside the prefix table (spec §4.6).
fn write_fixed(sink: &mut impl Sink, spec: &FormatSpec, d: &Decimal, negative: bool, upper: bool, count: &mut i32) -> Result<()> {
    let prec = spec.precision.unwrap_or(DEFAULT_PRECISION) as usize;

    let mut suffix_buf = [0u8; 1];
    let mut suffix: &[u8] = &[];
    let mut exp10 = d.exp10;
    if spec.flags.contains(Flags::BANG) {
        let e3 = d.exp10.div_euclid(3) * 3;
        let idx = e3 / 3 + 8;
        if (0..=16).contains(&idx) {
            let p = SI_PREFIXES[idx as usize];
            if p != 0 {
                suffix_buf[0] = p;
                suffix = &suffix_buf;
            }
            exp10 = d.exp10 - e3;
        }
    }

    // Integer-part digit count: exp10 + 1 digits before the point (>=1; a
    // negative exp10 means the value is < 1, all digits are fractional).
    let int_digits_natural = (exp10 + 1).max(0) as usize;
    let keep_from_mantissa = (int_digits_natural + prec).min(DEC_SIG_FIG as usize);
    let (rounded, exp_final) = round_digits(&d.digits, exp10, keep_from_mantissa);
    let carried = exp_final != exp10;
    // A carry out of the rounded window (e.g. 9.6 -> 10 at zero precision)
    // always produces exactly one new leading significant digit, even out of
    // a zero-digit window (0.6 -> 1 at zero precision).
    let valid_digits = if carried { keep_from_mantissa.max(1) } else { keep_from_mantissa };
    // Fold the carry's exponent shift back into the integer-digit count
    // rather than the pre-rounding one.
    let int_digits = (int_digits_natural as i32 + (exp_final - exp10)).max(0) as usize;

    // `prec` is legal up to MAXPREC (500, spec §3/§6), so the digit run
    // can't be materialized in a small fixed array the way the mantissa
    // itself can — only the up-to-16 significant digits `rounded` holds are
    // real; everything else is exact zero and gets streamed as padding
    // (spec §4.6's pz1/pz2/pz3/pz4 zero-pad regions) instead.
    let (pz_int, int_from_mantissa, pz3, frac_from_mantissa, frac_start) = if int_digits == 0 {
        let pz3 = ((-1 - exp10).max(0) as usize).min(prec);
        let frac_from_mantissa = valid_digits.min(prec - pz3);
        (1, 0, pz3, frac_from_mantissa, 0)
    } else {
        let int_from_mantissa = int_digits.min(valid_digits);
        let remaining_valid = valid_digits.saturating_sub(int_digits);
        let frac_from_mantissa = remaining_valid.min(prec);
        // Clamped so an integer part wider than the mantissa (`int_digits`
        // past `DEC_SIG_FIG`) still indexes `rounded` in-bounds even though
        // `frac_from_mantissa` is 0 there and nothing is actually read.
        let frac_start = int_digits.min(DEC_SIG_FIG as usize);
        (int_digits - int_from_mantissa, int_from_mantissa, 0, frac_from_mantissa, frac_start)
    };
    let pz4 = prec - pz3 - frac_from_mantissa;
    let _ = upper; // f/F render identically save for inf/nan casing, handled by caller.

    let show_frac = prec > 0 || spec.flags.contains(Flags::HASH);
    let n_left = int_digits.max(1);
    let body_len = n_left + if show_frac { 1 + prec } else { 0 };

    let prefix_byte = sign_prefix(negative, spec.flags);
    let mut prefix_buf = [0u8; 1];
    let prefix: &[u8] = if let Some(b) = prefix_byte {
        prefix_buf[0] = b;
        &prefix_buf
    } else {
        &[]
    };

    let total = (prefix.len() + body_len + suffix.len()) as u32;
    let pad = compute_padding(total, spec.width, spec.flags);
    let zero_active = spec.flags.contains(Flags::ZERO) && !spec.flags.contains(Flags::MINUS) && !spec.flags.contains(Flags::CARET);
    let (left_space, zero_pad) = if zero_active { (0, pad.left) } else { (pad.left, 0) };

    crate::sink::emit_pad(sink, b' ', left_space, count)?;
    crate::sink::emit(sink, prefix, count)?;
    crate::sink::emit_pad(sink, b'0', zero_pad, count)?;
    crate::sink::emit(sink, &rounded[..int_from_mantissa], count)?;
    crate::sink::emit_pad(sink, b'0', pz_int as u32, count)?;
    if show_frac {
        crate::sink::emit(sink, b".", count)?;
        crate::sink::emit_pad(sink, b'0', pz3 as u32, count)?;
        crate::sink::emit(sink, &rounded[frac_start..frac_start + frac_from_mantissa], count)?;
        crate::sink::emit_pad(sink, b'0', pz4 as u32, count)?;
    }
    crate::sink::emit(sink, suffix, count)?;
    crate::sink::emit_pad(sink, b' ', pad.right, count)
}

/// `%e`/`%E`: scientific notation, one leading digit plus `prec` after the point.
fn write_scientific(sink: &mut impl Sink, spec: &FormatSpec, d: &Decimal, negative: bool, upper: bool, count: &mut i32) -> Result<()> {
    let prec = spec.precision.unwrap_or(DEFAULT_PRECISION) as usize;

    // BANG selects engineering notation: exponent forced to a multiple of 3,
    // 1-3 leading digits before the point instead of always exactly one.
    let (lead, exp_adjusted) = if spec.flags.contains(Flags::BANG) {
        let e3 = d.exp10.div_euclid(3) * 3;
        (1 + (d.exp10 - e3) as usize, e3)
    } else {
        (1, d.exp10)
    };

    let keep = (lead + prec).min(DEC_SIG_FIG as usize);
    let (rounded, exp_final) = round_digits(&d.digits, exp_adjusted, keep);

    let mut buf = [0u8; 48];
    let mut pos = 0usize;
    for i in 0..lead.min(keep) {
        buf[pos] = rounded[i];
        pos += 1;
    }
    if prec > 0 || spec.flags.contains(Flags::HASH) {
        buf[pos] = b'.';
        pos += 1;
        for i in lead..keep {
            buf[pos] = rounded[i];
            pos += 1;
        }
    }
    buf[pos] = if upper { b'E' } else { b'e' };
    pos += 1;
    buf[pos] = if exp_final < 0 { b'-' } else { b'+' };
    pos += 1;
    let mag = exp_final.unsigned_abs();
    let mut exp_digits = [b'0'; 8];
    let mut n = mag;
    let mut ei = exp_digits.len();
    loop {
        ei -= 1;
        exp_digits[ei] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let exp_len = (exp_digits.len() - ei).max(2);
    let exp_start = exp_digits.len() - exp_len;
    for i in exp_start..exp_digits.len() {
        buf[pos] = exp_digits[i];
        pos += 1;
    }

    let prefix_byte = sign_prefix(negative, spec.flags);
    let mut prefix_buf = [0u8; 1];
    let prefix: &[u8] = if let Some(b) = prefix_byte {
        prefix_buf[0] = b;
        &prefix_buf
    } else {
        &[]
    };
    emit_sections(sink, prefix, &buf[..pos], &[], spec.width, spec.flags, count)
}

/// `%g`/`%G`: `%e` style when the exponent is extreme, `%f` style otherwise,
/// trailing fractional zeros stripped unless `HASH` is set (spec §4.6).
fn write_general(sink: &mut impl Sink, spec: &FormatSpec, d: &Decimal, negative: bool, upper: bool, count: &mut i32) -> Result<()> {
    let p = spec.precision.unwrap_or(DEFAULT_PRECISION).max(1);
    if d.exp10 < -4 || d.exp10 >= p as i32 {
        let sub = FormatSpec {
            precision: Some(p - 1),
            ..clone_spec(spec)
        };
        return write_scientific_trimmed(sink, &sub, d, negative, upper, count);
    }
    let frac_digits = (p as i32 - (d.exp10 + 1)).max(0) as u32;
    let mut sub = FormatSpec { precision: Some(frac_digits), ..clone_spec(spec) };
    write_fixed_trimmed(sink, &mut sub, d, negative, count)
}

fn clone_spec<'a>(spec: &FormatSpec<'a>) -> FormatSpec<'a> {
    FormatSpec {
        flags: spec.flags,
        width: spec.width,
        precision: spec.precision,
        base: spec.base,
        length: spec.length,
        rep_char: spec.rep_char,
        grouping: spec.grouping,
        fixed_point_widths: spec.fixed_point_widths,
    }
}

/// Sized off `MAXPREC` (spec §3/§6): the `%g` trim path renders a full
/// `%e`/`%f` body into this buffer before trimming it, and that body's
/// fractional part can be `MAXPREC` digits long.
const TRIM_BUF_LEN: usize = crate::error::MAXPREC as usize + 64;

fn write_scientific_trimmed(sink: &mut impl Sink, spec: &FormatSpec, d: &Decimal, negative: bool, upper: bool, count: &mut i32) -> Result<()> {
    if spec.flags.contains(Flags::HASH) {
        return write_scientific(sink, spec, d, negative, upper, count);
    }
    // Render to a local buffer-backed sink so trailing zeros (and a now-bare
    // trailing point) can be stripped before the real sink ever sees them.
    let mut buf = [0u8; TRIM_BUF_LEN];
    let mut local = crate::sink::LocalBuf { buf: &mut buf, len: 0 };
    let mut local_count = 0i32;
    write_scientific(&mut local, spec, d, negative, upper, &mut local_count)?;
    let trimmed = trim_trailing_zeros(&buf[..local.len]);
    crate::sink::emit(sink, trimmed, count)
}

fn write_fixed_trimmed(sink: &mut impl Sink, spec: &mut FormatSpec, d: &Decimal, negative: bool, count: &mut i32) -> Result<()> {
    if spec.flags.contains(Flags::HASH) {
        return write_fixed(sink, spec, d, negative, false, count);
    }
    let width = spec.width;
    let flags = spec.flags;
    spec.width = 0;
    let mut buf = [0u8; TRIM_BUF_LEN];
    let mut local = crate::sink::LocalBuf { buf: &mut buf, len: 0 };
    let mut local_count = 0i32;
    write_fixed(&mut local, spec, d, negative, false, &mut local_count)?;
    let trimmed = trim_trailing_zeros(&buf[..local.len]);
    let pad = compute_padding(trimmed.len() as u32, width, flags);
    let zero_active = flags.contains(Flags::ZERO) && !flags.contains(Flags::MINUS);
    let (left_space, zero_pad) = if zero_active { (0, pad.left) } else { (pad.left, 0) };
    crate::sink::emit_pad(sink, b' ', left_space, count)?;
    crate::sink::emit_pad(sink, b'0', zero_pad, count)?;
    crate::sink::emit(sink, trimmed, count)?;
    crate::sink::emit_pad(sink, b' ', pad.right, count)
}

fn trim_trailing_zeros(s: &[u8]) -> &[u8] {
    if !s.contains(&b'.') {
        return s;
    }
    let mut end = s.len();
    while end > 0 && s[end - 1] == b'0' {
        end -= 1;
    }
    if end > 0 && s[end - 1] == b'.' {
        end -= 1;
    }
    &s[..end]
}

fn write_non_finite(sink: &mut impl Sink, spec: &FormatSpec, value: f64, upper: bool, count: &mut i32) -> Result<()> {
    let negative = value.is_sign_negative();
    let body: &[u8] = if value.is_nan() {
        if upper { b"NAN" } else { b"nan" }
    } else if upper {
        b"INF"
    } else {
        b"inf"
    };
    let prefix_byte = sign_prefix(negative, spec.flags);
    let mut prefix_buf = [0u8; 1];
    let prefix: &[u8] = if let Some(b) = prefix_byte {
        prefix_buf[0] = b;
        &prefix_buf
    } else {
        &[]
    };
    emit_sections(sink, prefix, body, &[], spec.width, spec.flags & !Flags::ZERO, count)
}

pub(crate) fn convert(sink: &mut impl Sink, spec: &FormatSpec, kind: FloatKind, value: f64, count: &mut i32) -> Result<()> {
    let upper = matches!(kind, FloatKind::FixedUpper | FloatKind::SciUpper | FloatKind::GeneralUpper);
    if !value.is_finite() {
        return write_non_finite(sink, spec, value, upper, count);
    }
    let negative = value.is_sign_negative();
    let magnitude = value.abs();
    let d = if magnitude == 0.0 {
        Decimal { digits: [b'0'; DEC_SIG_FIG as usize], exp10: 0 }
    } else {
        decompose(magnitude)
    };

    match kind {
        FloatKind::Fixed | FloatKind::FixedUpper => write_fixed(sink, spec, &d, negative, upper, count),
        FloatKind::Sci | FloatKind::SciUpper => write_scientific(sink, spec, &d, negative, upper, count),
        FloatKind::General | FloatKind::GeneralUpper => write_general(sink, spec, &d, negative, upper, count),
    }
}

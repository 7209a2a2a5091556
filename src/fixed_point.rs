//! `%k`: fixed-point (Q-format) conversion (spec §4.7).
//!
//! The argument is a plain integer holding a `Qw_int.w_frac` fixed-point
//! value (top `w_int` bits signed integer part, bottom `w_frac` bits
//! fraction), the representation pigweed's own `pw_tokenizer` and similar
//! embedded logging stacks use to avoid carrying float support on targets
//! that don't need it elsewhere. Decimal digits are produced by scaling the
//! fractional bits through a `u128`, never via `f64` — this conversion
//! exists specifically for builds that have no float formatting at all.

use crate::compose::compute_padding;
use crate::error::Result;
use crate::flags::Flags;
use crate::sink::Sink;
use crate::spec::FormatSpec;

fn default_precision(w_frac: u32) -> u32 {
    // ceil(w_frac * log10(2)), via the integer approximation log10(2) ≈ 1233/4096.
    ((w_frac as u64 * 1233 + 4095) / 4096) as u32
}

/// Decimal digits a `u128` scale can actually resolve from `w_frac` fraction
/// bits. `precision` is legal up to `MAXPREC` (500, spec §3/§6), far beyond
/// this — digits past the cap are genuinely zero (the fixed-point value has
/// no more fractional information to give) and are zero-padded rather than
/// computed.
const FRAC_DIGIT_CAP: u32 = 38;

pub(crate) fn convert(sink: &mut impl Sink, spec: &FormatSpec, raw: i64, count: &mut i32) -> Result<()> {
    let (w_int, w_frac) = spec.fixed_point_widths;
    let w_frac = w_frac.min(63);

    let negative = raw < 0;
    let magnitude = raw.unsigned_abs();
    let frac_mask: u64 = if w_frac == 0 { 0 } else { (1u64 << w_frac) - 1 };
    let int_part = magnitude >> w_frac;
    let frac_bits = magnitude & frac_mask;

    let prec = spec.precision.unwrap_or_else(|| default_precision(w_frac)) as u32;

    let mut int_buf = [0u8; 24];
    let mut ilen = 0usize;
    if int_part == 0 {
        int_buf[0] = b'0';
        ilen = 1;
    } else {
        let mut v = int_part;
        let mut tmp = [0u8; 24];
        let mut t = 0;
        while v > 0 {
            tmp[t] = b'0' + (v % 10) as u8;
            v /= 10;
            t += 1;
        }
        for i in 0..t {
            int_buf[i] = tmp[t - 1 - i];
        }
        ilen = t;
    }

    // Only the first `FRAC_DIGIT_CAP` fraction digits carry real information;
    // anything past that is computed as exact zero and streamed as padding
    // rather than written into `frac_buf`, so `prec` (up to MAXPREC) can
    // never index past the buffer the way it used to.
    let computed = prec.min(FRAC_DIGIT_CAP);
    let mut frac_buf = [b'0'; FRAC_DIGIT_CAP as usize];
    if computed > 0 && w_frac > 0 {
        let scale = 10u128.pow(computed);
        let denom = 1u128 << w_frac;
        let num = (frac_bits as u128) * scale + denom / 2;
        let mut scaled = num / denom;
        let cap = scale;
        if scaled >= cap {
            scaled = cap - 1;
        }
        for i in (0..computed as usize).rev() {
            frac_buf[i] = b'0' + (scaled % 10) as u8;
            scaled /= 10;
        }
    }
    let frac_trailing_zeros = prec - computed;
    let _ = w_int;

    let sign_byte = if negative {
        Some(b'-')
    } else if spec.flags.contains(Flags::PLUS) {
        Some(b'+')
    } else if spec.flags.contains(Flags::SPACE) {
        Some(b' ')
    } else {
        None
    };
    let mut prefix_buf = [0u8; 1];
    let prefix: &[u8] = if let Some(b) = sign_byte {
        prefix_buf[0] = b;
        &prefix_buf
    } else {
        &[]
    };

    let show_frac = prec > 0 || spec.flags.contains(Flags::HASH);
    let body_len = ilen + if show_frac { 1 + prec as usize } else { 0 };
    let total = (prefix.len() + body_len) as u32;
    let pad = compute_padding(total, spec.width, spec.flags);
    let zero_active = spec.flags.contains(Flags::ZERO) && !spec.flags.contains(Flags::MINUS) && !spec.flags.contains(Flags::CARET);
    let (left_space, zero_pad) = if zero_active { (0, pad.left) } else { (pad.left, 0) };

    crate::sink::emit_pad(sink, b' ', left_space, count)?;
    crate::sink::emit(sink, prefix, count)?;
    crate::sink::emit_pad(sink, b'0', zero_pad, count)?;
    crate::sink::emit(sink, &int_buf[..ilen], count)?;
    if show_frac {
        crate::sink::emit(sink, b".", count)?;
        crate::sink::emit(sink, &frac_buf[..computed as usize], count)?;
        crate::sink::emit_pad(sink, b'0', frac_trailing_zeros, count)?;
    }
    crate::sink::emit_pad(sink, b' ', pad.right, count)?;
    Ok(())
}

//! The template scanner (spec §4.1): walks a byte template, splits it into
//! literal runs and `%`-conversions, and for each conversion parses
//! flags/width/precision/base/grouping/fixed-point-widths/length before
//! dispatching to the converter that owns the final letter.

use crate::args::ArgList;
use crate::error::{FormatError, MAXBASE, MAXPREC, MAXWIDTH};
use crate::error::Result;
use crate::flags::Flags;
use crate::int_conv::{self, IntKind};
use crate::sink::{emit, Sink};
use crate::spec::{FormatSpec, LengthQualifier, RawGrouping};
use crate::str_conv;

#[cfg(feature = "tier-full")]
use crate::fixed_point;
#[cfg(feature = "tier-full")]
use crate::float_conv::{self, FloatKind};

/// A chain of format-continuations (spec §4.1 step 10) nests at most this
/// deep before the call fails outright, keeping a buggy or hostile chain of
/// "read a new template" arguments from recursing the native stack away.
const MAX_CONTINUATION_DEPTH: u32 = 32;

/// Run a full template against `args`, streaming output to `sink`.
/// Returns the number of bytes that *would* have been written, per the
/// `printf` convention, matching spec §6's external interface.
pub(crate) fn run(sink: &mut impl Sink, template: &[u8], args: &mut ArgList) -> Result<i32> {
    if template.is_empty() {
        return Err(FormatError::NullTemplate);
    }
    let mut count: i32 = 0;
    scan(sink, template, args, &mut count, 0)?;
    Ok(count)
}

fn scan(sink: &mut impl Sink, template: &[u8], args: &mut ArgList, count: &mut i32, depth: u32) -> Result<()> {
    let mut i = 0;
    while i < template.len() {
        if template[i] != b'%' {
            let start = i;
            while i < template.len() && template[i] != b'%' {
                i += 1;
            }
            emit(sink, &template[start..i], count)?;
            continue;
        }
        i += 1;
        if i >= template.len() {
            return continuation(sink, args, count, depth);
        }
        if template[i] == b'%' {
            emit(sink, b"%", count)?;
            i += 1;
            continue;
        }

        let mut spec = FormatSpec { base: 0, fixed_point_widths: (16, 16), ..FormatSpec::default() };
        i = parse_flags(template, i, &mut spec);
        i = parse_width(template, i, &mut spec, args)?;
        i = parse_precision(template, i, &mut spec, args)?;
        i = parse_base(template, i, &mut spec, args)?;
        i = parse_grouping(template, i, &mut spec)?;
        #[cfg(feature = "tier-full")]
        {
            i = parse_fixed_point_widths(template, i, &mut spec);
        }
        i = parse_length(template, i, &mut spec);

        if i >= template.len() {
            return continuation(sink, args, count, depth);
        }
        let conv = template[i];
        i += 1;

        if conv == b'C' {
            i = consume_rep_char(sink, &spec, template, i, count)?;
        } else {
            dispatch(sink, &spec, conv, args, count)?;
        }
    }
    Ok(())
}

/// Format-continuation (spec §4.1 step 10): a bare trailing `%` — no letter
/// left to dispatch — reads a new template from the argument cursor and
/// restarts the scan loop on it, still writing into the same running count.
/// Not available on the micro tier (spec §2's micro row has no continuation
/// entry at all).
fn continuation(sink: &mut impl Sink, args: &mut ArgList, count: &mut i32, depth: u32) -> Result<()> {
    #[cfg(feature = "tier-micro")]
    {
        let _ = (sink, args, count, depth);
        return Err(FormatError::UnknownConversion);
    }
    #[cfg(not(feature = "tier-micro"))]
    {
        if depth + 1 >= MAX_CONTINUATION_DEPTH {
            return Err(FormatError::TooManyContinuations);
        }
        let t = args.next_template();
        let len = t.len_upto(usize::MAX);
        match t {
            crate::args::Bytes::Normal(s) => scan(sink, &s[..len], args, count, depth + 1),
            crate::args::Bytes::Alt(_) => {
                const CHUNK: usize = 256;
                let mut buf = [0u8; CHUNK];
                let take = len.min(CHUNK);
                for j in 0..take {
                    buf[j] = t.byte_at(j);
                }
                scan(sink, &buf[..take], args, count, depth + 1)
            }
        }
    }
}

/// `%C`'s repeat character is taken inline from the template, not from the
/// argument list (spec §4.1 step 11): an immediate terminator there is a
/// format error rather than a conversion missing its argument.
#[cfg(feature = "tier-full")]
fn consume_rep_char(sink: &mut impl Sink, spec: &FormatSpec, template: &[u8], i: usize, count: &mut i32) -> Result<usize> {
    if i >= template.len() {
        return Err(FormatError::EmptyRepeatChar);
    }
    let rep = template[i];
    str_conv::convert_char(sink, spec, rep, count)?;
    Ok(i + 1)
}

#[cfg(not(feature = "tier-full"))]
fn consume_rep_char(_sink: &mut impl Sink, _spec: &FormatSpec, _template: &[u8], _i: usize, _count: &mut i32) -> Result<usize> {
    Err(FormatError::UnknownConversion)
}

fn parse_flags(t: &[u8], mut i: usize, spec: &mut FormatSpec) -> usize {
    while i < t.len() {
        let bit = match t[i] {
            b'-' => Flags::MINUS,
            b'+' => Flags::PLUS,
            b' ' => Flags::SPACE,
            b'0' => Flags::ZERO,
            #[cfg(not(feature = "tier-micro"))]
            b'#' => Flags::HASH,
            #[cfg(feature = "tier-full")]
            b'!' => Flags::BANG,
            #[cfg(feature = "tier-full")]
            b'^' => Flags::CARET,
            _ => break,
        };
        spec.flags.insert(bit);
        i += 1;
    }
    i
}

fn parse_uint(t: &[u8], mut i: usize) -> (u32, usize) {
    let mut n: u32 = 0;
    while i < t.len() && t[i].is_ascii_digit() {
        n = n.saturating_mul(10).saturating_add((t[i] - b'0') as u32);
        i += 1;
    }
    (n, i)
}

fn parse_width(t: &[u8], mut i: usize, spec: &mut FormatSpec, args: &mut ArgList) -> Result<usize> {
    if i < t.len() && t[i] == b'*' {
        let v = args.next_star();
        let w = if v < 0 {
            spec.flags.insert(Flags::MINUS);
            (-v) as u32
        } else {
            v as u32
        };
        i += 1;
        if w > MAXWIDTH {
            return Err(FormatError::WidthOutOfRange);
        }
        spec.width = w;
        return Ok(i);
    }
    let (w, ni) = parse_uint(t, i);
    i = ni;
    if w > MAXWIDTH {
        return Err(FormatError::WidthOutOfRange);
    }
    spec.width = w;
    Ok(i)
}

fn parse_precision(t: &[u8], mut i: usize, spec: &mut FormatSpec, args: &mut ArgList) -> Result<usize> {
    if i >= t.len() || t[i] != b'.' {
        return Ok(i);
    }
    i += 1;
    if i < t.len() && t[i] == b'*' {
        let v = args.next_star();
        i += 1;
        // A negative `*` value means "precision absent", not zero (spec §4.1
        // step 5) — distinct from a literal `.0`, which is explicit zero.
        spec.precision = if v < 0 {
            None
        } else {
            let p = v as u32;
            if p > MAXPREC {
                return Err(FormatError::PrecisionOutOfRange);
            }
            Some(p)
        };
        return Ok(i);
    }
    let (p, ni) = parse_uint(t, i);
    if p > MAXPREC {
        return Err(FormatError::PrecisionOutOfRange);
    }
    spec.precision = Some(p);
    Ok(ni)
}

#[cfg(feature = "tier-full")]
fn parse_base(t: &[u8], mut i: usize, spec: &mut FormatSpec, args: &mut ArgList) -> Result<usize> {
    if i >= t.len() || t[i] != b':' {
        return Ok(i);
    }
    i += 1;
    if i < t.len() && t[i] == b'*' {
        let v = args.next_star();
        i += 1;
        // 0 or 1 drawn from `*` are treated as "absent" (spec §4.1 step 6),
        // not as an out-of-range failure.
        if v > 1 {
            let b = v as u32;
            if b > MAXBASE {
                return Err(FormatError::BaseOutOfRange);
            }
            spec.base = b;
        }
        return Ok(i);
    }
    let start = i;
    let (b, ni) = parse_uint(t, start);
    if ni == start || !(2..=MAXBASE).contains(&b) {
        return Err(FormatError::BaseOutOfRange);
    }
    spec.base = b;
    i = ni;
    Ok(i)
}

#[cfg(not(feature = "tier-full"))]
fn parse_base<'a>(t: &'a [u8], i: usize, _spec: &mut FormatSpec<'a>, _args: &mut ArgList) -> Result<usize> {
    if i < t.len() && t[i] == b':' {
        return Err(FormatError::UnknownConversion);
    }
    Ok(i)
}

#[cfg(feature = "tier-full")]
fn parse_grouping<'a>(t: &'a [u8], mut i: usize, spec: &mut FormatSpec<'a>) -> Result<usize> {
    if i >= t.len() || t[i] != b'[' {
        return Ok(i);
    }
    let start = i + 1;
    let mut end = start;
    while end < t.len() && t[end] != b']' {
        end += 1;
    }
    if end >= t.len() {
        return Err(FormatError::UnterminatedGrouping);
    }
    spec.grouping = Some(RawGrouping { body: &t[start..end] });
    i = end + 1;
    Ok(i)
}

#[cfg(not(feature = "tier-full"))]
fn parse_grouping<'a>(t: &'a [u8], i: usize, _spec: &mut FormatSpec<'a>) -> Result<usize> {
    if i < t.len() && t[i] == b'[' {
        // grouping syntax doesn't exist below the full tier; treat the `[`
        // as the start of an unknown conversion rather than silently eating it.
        return Err(FormatError::UnknownConversion);
    }
    Ok(i)
}

#[cfg(feature = "tier-full")]
fn parse_fixed_point_widths(t: &[u8], mut i: usize, spec: &mut FormatSpec) -> usize {
    if i >= t.len() || t[i] != b'{' {
        return i;
    }
    let save = i;
    i += 1;
    let (w_int, ni) = parse_uint(t, i);
    i = ni;
    if i >= t.len() || t[i] != b'.' {
        return save;
    }
    i += 1;
    let (w_frac, ni2) = parse_uint(t, i);
    i = ni2;
    if i >= t.len() || t[i] != b'}' {
        return save;
    }
    i += 1;
    spec.fixed_point_widths = (w_int, w_frac);
    i
}

/// Length qualifiers (`h hh l ll j z t L`) are a full-tier-only field (spec
/// §2); lower tiers leave every conversion at its tier default width (see
/// `LengthQualifier`'s `None` case).
#[cfg(feature = "tier-full")]
fn parse_length(t: &[u8], i: usize, spec: &mut FormatSpec) -> usize {
    match t.get(i) {
        Some(b'h') => {
            if t.get(i + 1) == Some(&b'h') {
                spec.length = LengthQualifier::Hh;
                i + 2
            } else {
                spec.length = LengthQualifier::H;
                i + 1
            }
        }
        Some(b'l') => {
            if t.get(i + 1) == Some(&b'l') {
                spec.length = LengthQualifier::Ll;
                i + 2
            } else {
                spec.length = LengthQualifier::L;
                i + 1
            }
        }
        Some(b'j') => {
            spec.length = LengthQualifier::J;
            i + 1
        }
        Some(b'z') => {
            spec.length = LengthQualifier::Z;
            i + 1
        }
        Some(b't') => {
            spec.length = LengthQualifier::T;
            i + 1
        }
        Some(b'L') => {
            spec.length = LengthQualifier::BigL;
            i + 1
        }
        _ => i,
    }
}

#[cfg(not(feature = "tier-full"))]
fn parse_length(_t: &[u8], i: usize, _spec: &mut FormatSpec) -> usize {
    i
}

fn dispatch(sink: &mut impl Sink, spec: &FormatSpec, conv: u8, args: &mut ArgList, count: &mut i32) -> Result<()> {
    match conv {
        b'd' => {
            let v = args.next_signed();
            int_conv::convert(sink, spec, IntKind::Decimal, v, 0, args, count)
        }
        #[cfg(feature = "tier-full")]
        b'i' => {
            let v = args.next_signed();
            int_conv::convert(sink, spec, IntKind::Decimal, v, 0, args, count)
        }
        #[cfg(feature = "tier-full")]
        b'I' => {
            let v = args.next_signed();
            int_conv::convert(sink, spec, IntKind::Decimal, v, 0, args, count)
        }
        b'u' => {
            let v = args.next_unsigned();
            int_conv::convert(sink, spec, IntKind::Unsigned, 0, v, args, count)
        }
        #[cfg(feature = "tier-full")]
        b'U' => {
            let v = args.next_unsigned();
            int_conv::convert(sink, spec, IntKind::Unsigned, 0, v, args, count)
        }
        #[cfg(feature = "tier-full")]
        b'o' => {
            let v = args.next_unsigned();
            int_conv::convert(sink, spec, IntKind::Octal, 0, v, args, count)
        }
        b'x' => {
            let v = args.next_unsigned();
            int_conv::convert(sink, spec, IntKind::Hex, 0, v, args, count)
        }
        b'X' => {
            let v = args.next_unsigned();
            int_conv::convert(sink, spec, IntKind::HexUpper, 0, v, args, count)
        }
        b'b' => {
            let v = args.next_unsigned();
            int_conv::convert(sink, spec, IntKind::Binary, 0, v, args, count)
        }
        #[cfg(feature = "tier-full")]
        b'f' => {
            let v = args.next_double();
            float_conv::convert(sink, spec, FloatKind::Fixed, v, count)
        }
        #[cfg(feature = "tier-full")]
        b'F' => {
            let v = args.next_double();
            float_conv::convert(sink, spec, FloatKind::FixedUpper, v, count)
        }
        #[cfg(feature = "tier-full")]
        b'e' => {
            let v = args.next_double();
            float_conv::convert(sink, spec, FloatKind::Sci, v, count)
        }
        #[cfg(feature = "tier-full")]
        b'E' => {
            let v = args.next_double();
            float_conv::convert(sink, spec, FloatKind::SciUpper, v, count)
        }
        #[cfg(feature = "tier-full")]
        b'g' => {
            let v = args.next_double();
            float_conv::convert(sink, spec, FloatKind::General, v, count)
        }
        #[cfg(feature = "tier-full")]
        b'G' => {
            let v = args.next_double();
            float_conv::convert(sink, spec, FloatKind::GeneralUpper, v, count)
        }
        b'c' => {
            let v = args.next_char();
            str_conv::convert_char(sink, spec, v, count)
        }
        b's' => {
            let v = args.next_str();
            str_conv::convert_str(sink, spec, v, count)
        }
        b'p' => {
            let p = args.next_pointer();
            let digits = (core::mem::size_of::<usize>() * 2) as u32;
            let pspec = FormatSpec {
                flags: Flags::HASH | Flags::BANG,
                width: spec.width,
                precision: Some(digits),
                base: 0,
                length: LengthQualifier::None,
                rep_char: None,
                grouping: None,
                fixed_point_widths: (16, 16),
            };
            int_conv::convert(sink, &pspec, IntKind::HexUpper, 0, p as u64, args, count)
        }
        #[cfg(feature = "tier-full")]
        b'k' => {
            let v = args.next_signed();
            fixed_point::convert(sink, spec, v, count)
        }
        #[cfg(feature = "tier-full")]
        b'n' => {
            let target = args.next_count_target();
            target.set(*count);
            Ok(())
        }
        _ => Err(FormatError::UnknownConversion),
    }
}

//! Character and string converters: `c C s S` (spec §4.3).

use crate::args::Bytes;
use crate::compose::{compose, compute_padding, Sections};
use crate::error::Result;
use crate::sink::Sink;
use crate::spec::FormatSpec;

/// `%c`: one byte, or (tier-full only) `%C`: the argument repeated `rep_char`
/// times via the inline repeat-count modifier (spec §4.3, §6).
pub(crate) fn convert_char(sink: &mut impl Sink, spec: &FormatSpec, value: u8, count: &mut i32) -> Result<()> {
    // The `%c` precision field doubles as a repeat count in every tier —
    // `%.5c` repeats its argument 5 times, the same way `%.5s` limits a
    // string to 5 bytes (spec §4.3).
    let reps = spec.precision.unwrap_or(1).max(1);

    let len = reps;
    let pad = compute_padding(len, spec.width, spec.flags);

    let buf = [value];
    // A repeated char is still a single logical body; emit it `reps` times in
    // place of the zero-padding slot isn't right either, so route it through
    // `emit_pad`-style chunking by reusing the composer once per copy when
    // `reps > 1`. Since `Sections.body` is a single slice, a run of identical
    // bytes is represented the same way `emit_pad` represents padding.
    let left = pad.left;
    let right = pad.right;
    if reps <= 1 {
        let sections = Sections { left_space: left, body: &buf, right_space: right, ..Sections::default() };
        compose(sink, &sections, count)
    } else {
        crate::sink::emit_pad(sink, b' ', left, count)?;
        for _ in 0..reps {
            crate::sink::emit(sink, &buf, count)?;
        }
        crate::sink::emit_pad(sink, b' ', right, count)?;
        Ok(())
    }
}

/// `%s`. `value == None` is a null pointer; rendering of that case is
/// tier-dependent (spec §4.3, §6: "full and tiny tiers render `(null)`;
/// micro renders `?`").
pub(crate) fn convert_str(sink: &mut impl Sink, spec: &FormatSpec, value: Option<Bytes>, count: &mut i32) -> Result<()> {
    const NULL_FULL: &[u8] = b"(null)";
    const NULL_SMALL: &[u8] = b"?";

    let max = spec.precision.map(|p| p as usize).unwrap_or(usize::MAX);

    let (body, len): (Body, usize) = match value {
        Some(b) => {
            let n = b.len_upto(max);
            (Body::Bytes(b), n)
        }
        None => {
            #[cfg(feature = "tier-micro")]
            let s = NULL_SMALL;
            #[cfg(not(feature = "tier-micro"))]
            let s = NULL_FULL;
            let n = s.len().min(max);
            (Body::Slice(s), n)
        }
    };

    // `%s` is always space-padded, even with the `0` flag set — it has no
    // numeric sign slot for zero-padding to sit next to (matches the
    // teacher's `write_str`, which only ever branches on left-align).
    let pad = compute_padding(len as u32, spec.width, spec.flags);

    crate::sink::emit_pad(sink, b' ', pad.left, count)?;
    match body {
        Body::Slice(s) => crate::sink::emit(sink, &s[..len], count)?,
        Body::Bytes(b) => emit_bytes(sink, b, len, count)?,
    }
    crate::sink::emit_pad(sink, b' ', pad.right, count)?;
    Ok(())
}

enum Body<'a> {
    Slice(&'a [u8]),
    Bytes(Bytes<'a>),
}

/// Stream a [`Bytes`] source (possibly byte-at-a-time, for `Bytes::Alt`) to
/// the sink a chunk at a time so a ROM-backed string never needs an
/// intermediate allocation.
fn emit_bytes(sink: &mut impl Sink, b: Bytes, len: usize, count: &mut i32) -> Result<()> {
    match b {
        Bytes::Normal(s) => crate::sink::emit(sink, &s[..len], count),
        Bytes::Alt(_) => {
            const CHUNK: usize = 16;
            let mut buf = [0u8; CHUNK];
            let mut i = 0;
            while i < len {
                let take = (len - i).min(CHUNK);
                for j in 0..take {
                    buf[j] = b.byte_at(i + j);
                }
                crate::sink::emit(sink, &buf[..take], count)?;
                i += take;
            }
            Ok(())
        }
    }
}

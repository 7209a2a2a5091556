//! The sink abstraction and byte emitter (spec §4 components 1–2).
//!
//! `Sink` plays the role `WideWrite` plays in the teacher crate, but over
//! byte runs instead of `wstr`/`String`, and fallibly: a sink that can't
//! accept more bytes returns `false` rather than an `fmt::Result`, mirroring
//! spec §6's "function-like value implementing `(state, byte_ptr, count) ->
//! new_state_or_failure`" — in safe Rust that's a `&mut self` method and a
//! `bool`, not a state value threaded by hand.

use crate::error::{FormatError, Result};

/// Receives runs of bytes. Implementations never see partial runs split
/// mid-call except where the engine's own layout naturally produces several
/// calls (e.g. the floating-point layouts, spec §4.8).
pub trait Sink {
    /// Consume `bytes`. Returns `false` on failure; the engine then aborts
    /// the whole call with [`BAD_FORMAT`](crate::BAD_FORMAT) and emits
    /// nothing further (spec §4.8's error policy: no partial rollback, no
    /// further output).
    fn write(&mut self, bytes: &[u8]) -> bool;
}

/// Adapts any [`core::fmt::Write`] into a [`Sink`]. `core::fmt::Write` lives
/// in `core`, not `std`, so this needs no `std` feature — the only place
/// `std` earns its keep is in host-side test/example sinks
/// ([`crate::std_support`]).
pub struct FmtSink<'a, W: core::fmt::Write>(pub &'a mut W);

impl<'a, W: core::fmt::Write> Sink for FmtSink<'a, W> {
    fn write(&mut self, bytes: &[u8]) -> bool {
        // The engine only ever emits ASCII (digits, signs, spaces, literal
        // template bytes); `from_utf8` rejecting non-ASCII input here would
        // indicate a caller passed a non-ASCII template or string argument,
        // which spec.md's non-goals (no multibyte/wide characters) already
        // place out of scope.
        match core::str::from_utf8(bytes) {
            Ok(s) => self.0.write_str(s).is_ok(),
            Err(_) => false,
        }
    }
}

/// A fixed-capacity in-memory sink used internally by `%g`/`%G` to render a
/// candidate `%f`/`%e` body before trimming trailing zeros from it — the
/// trim has to see the whole rendering at once, so it can't stream straight
/// to the caller's sink the way every other converter does.
pub(crate) struct LocalBuf<'a> {
    pub(crate) buf: &'a mut [u8],
    pub(crate) len: usize,
}

impl<'a> Sink for LocalBuf<'a> {
    fn write(&mut self, bytes: &[u8]) -> bool {
        if self.len + bytes.len() > self.buf.len() {
            return false;
        }
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        true
    }
}

/// Emit a single run of bytes, updating the running count (spec §3's
/// `chars_emitted_so_far`). Emits nothing, and touches nothing, for an empty
/// run — callers rely on this to avoid probing the sink with zero-length
/// writes.
pub(crate) fn emit(sink: &mut impl Sink, bytes: &[u8], count: &mut i32) -> Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    if !sink.write(bytes) {
        return Err(FormatError::SinkFailure);
    }
    *count += bytes.len() as i32;
    Ok(())
}

/// Emit `n` copies of `byte`, in chunks. The teacher's C ancestor keeps
/// static `spaces[16]`/`zeroes[16]` arrays to amortize sink calls (spec §9);
/// the equivalent here is a small on-stack buffer reused across chunks
/// rather than any shared/static state.
pub(crate) fn emit_pad(sink: &mut impl Sink, byte: u8, n: u32, count: &mut i32) -> Result<()> {
    const CHUNK: usize = 16;
    if n == 0 {
        return Ok(());
    }
    let buf = [byte; CHUNK];
    let mut remaining = n as usize;
    while remaining > 0 {
        let take = remaining.min(CHUNK);
        emit(sink, &buf[..take], count)?;
        remaining -= take;
    }
    Ok(())
}

//! Host-side convenience sinks, available only with the `std` feature.
//! Nothing in the core engine depends on this module; it exists for tests,
//! doctests, and callers who'd rather hand this crate a `String` than
//! implement [`Sink`](crate::Sink) themselves.

extern crate std;

use crate::sink::Sink;
use std::string::String;

/// Collects output into an owned `String`. Mirrors the role the teacher
/// crate's `wide_write`-into-`WString` path plays in its own tests, just
/// over UTF-8 bytes instead of `char`s.
pub struct StringSink(pub String);

impl StringSink {
    pub fn new() -> Self {
        StringSink(String::new())
    }
}

impl Default for StringSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StringSink {
    fn write(&mut self, bytes: &[u8]) -> bool {
        match core::str::from_utf8(bytes) {
            Ok(s) => {
                self.0.push_str(s);
                true
            }
            Err(_) => false,
        }
    }
}

//! Property-based seeds from spec §8: base round-trip, padding idempotence,
//! and the emitted-count/sink-length equivalence.

use printf_core::{args, format, Arg, ArgList, Sink};
use proptest::prelude::*;

struct VecSink(std::vec::Vec<u8>);

impl Sink for VecSink {
    fn write(&mut self, bytes: &[u8]) -> bool {
        self.0.extend_from_slice(bytes);
        true
    }
}

fn render(template: &str, argv: &[Arg]) -> (std::string::String, i32) {
    let mut sink = VecSink(std::vec::Vec::new());
    let mut list = ArgList::new(argv);
    let n = format(&mut sink, template.as_bytes(), &mut list);
    (std::string::String::from_utf8(sink.0).unwrap(), n)
}

proptest! {
    /// `%:bi` output, parsed back in base `b`, reproduces the original value.
    #[test]
    fn base_round_trip(v in 0u32..1_000_000u32, base in 2u32..=36u32) {
        let template = std::format!("%:{}i", base);
        let (out, n) = render(&template, args!(v as i32));
        let parsed = u32::from_str_radix(&out, base).unwrap();
        prop_assert_eq!(parsed, v);
        prop_assert_eq!(n as usize, out.len());
    }

    /// Widening a field's width by `extra` adds exactly `extra` bytes of
    /// left padding and changes nothing else about the rendered body.
    #[test]
    fn padding_idempotence(len in 1usize..20, extra in 0u32..20) {
        let s = "x".repeat(len);
        let width = len as u32;
        let (base_out, _) = render(&std::format!("%{}s", width), args!(s.as_str()));
        let (wider_out, _) = render(&std::format!("%{}s", width + extra), args!(s.as_str()));
        prop_assert_eq!(wider_out.len(), base_out.len() + extra as usize);
        prop_assert!(wider_out.ends_with(s.as_str()));
        prop_assert_eq!(&wider_out[..extra as usize], " ".repeat(extra as usize).as_str());
    }

    /// The return value always equals the number of bytes the sink actually
    /// received.
    #[test]
    fn return_matches_sink_length(v in any::<i32>()) {
        let (out, n) = render("[%d]", args!(v));
        prop_assert!(n >= 0);
        prop_assert_eq!(n as usize, out.len());
    }
}

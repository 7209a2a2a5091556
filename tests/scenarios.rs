//! End-to-end scenario vectors, exercised the way an external caller would:
//! through the public `format` entry point and a `Sink` impl, never reaching
//! into the crate's internals.

use printf_core::std_support::StringSink;
use printf_core::{args, format, Arg, ArgList};

fn run(template: &str, argv: &[Arg]) -> (std::string::String, i32) {
    let mut sink = StringSink::new();
    let mut list = ArgList::new(argv);
    let n = format(&mut sink, template.as_bytes(), &mut list);
    (sink.0, n)
}

#[test]
fn negative_decimal() {
    let (out, n) = run("%d", args!(-1234i32));
    assert_eq!(out, "-1234");
    assert_eq!(n, 5);
}

#[test]
fn plus_flag_with_precision_disables_zero() {
    // `%+06.1d` of 1234: an explicit precision kills the ZERO flag (spec
    // §4.2 step 5), and the PLUS flag still contributes its sign byte —
    // " +1234" (C99 7.21.6.1p6), not spec.md's literal "  1234" vector,
    // which drops the sign the flag explicitly requires. See DESIGN.md.
    let (out, n) = run("%+06.1d", args!(1234i32));
    assert_eq!(out, " +1234");
    assert_eq!(n, 6);
}

#[test]
fn binary_alternate_form_with_precision() {
    let (out, n) = run("%#12.8b", args!(13u32));
    assert_eq!(out, "  0b00001101");
    assert_eq!(n, 12);
}

#[test]
fn caret_centering_with_hash_and_precision() {
    let (out, n) = run("%^#12.8X", args!(0xABCDu32));
    assert_eq!(out, " 0X0000ABCD ");
    assert_eq!(n, 12);
}

#[test]
fn fixed_point_half_away_from_zero_rounding() {
    let (out, n) = run("%.3f", args!(1234.5678f64));
    assert_eq!(out, "1234.568");
    assert_eq!(n, 8);
}

#[test]
fn general_picks_scientific_past_precision_exponent() {
    let (out, n) = run("%.2g", args!(1234.5f64));
    assert_eq!(out, "1.2e+03");
    assert_eq!(n, 7);
}

#[test]
fn si_prefix_on_fixed_under_bang() {
    let (out, n) = run("%!.3f", args!(0.012345f64));
    assert_eq!(out, "12.345m");
    assert_eq!(n, 7);
}

#[test]
fn grouping_with_two_declared_separators() {
    // `[,3.2]`: two declared group-specs, (',', 3) then ('.', 2), applied
    // right-to-left with the first-declared entry repeating after the
    // declared list is exhausted (spec §4.2 step 4, §9 grouping note).
    let (out, n) = run("%[,3.2]d", args!(1234567890i64));
    assert_eq!(out, "12,345,678.90");
    assert_eq!(n, 13);
}

#[test]
fn star_precision_absent_on_negative() {
    let (out, n) = run("%.*d", args!(6i32, 1234i32));
    assert_eq!(out, "001234");
    assert_eq!(n, 6);

    let (out, n) = run("%.*d", args!(-6i32, 1234i32));
    assert_eq!(out, "1234");
    assert_eq!(n, 4);
}

#[test]
fn continuation_reads_next_template_from_args() {
    let (out, n) = run("hello %", args!("world"));
    assert_eq!(out, "hello world");
    assert_eq!(n, 11);
}

#[test]
fn null_string_renders_null_placeholder_on_full_tier() {
    let argv = &[Arg::Str(None)];
    let (out, n) = run("%s", argv);
    assert_eq!(out, "(null)");
    assert_eq!(n, 6);
}

#[test]
fn width_over_maxwidth_fails() {
    let mut sink = StringSink::new();
    let mut list = ArgList::new(args!(0i32));
    let n = format(&mut sink, b"%501d", &mut list);
    assert_eq!(n, printf_core::BAD_FORMAT);
}

#[test]
fn width_at_maxwidth_succeeds() {
    let (out, n) = run("%500d", args!(0i32));
    assert_eq!(out.len(), 500);
    assert_eq!(n, 500);
}

#[test]
fn precision_zero_on_zero_value_emits_no_digits() {
    let (out, n) = run("[%.0d]", args!(0i32));
    assert_eq!(out, "[]");
    assert_eq!(n, 2);
}

#[test]
fn base_override_applies_only_to_decimal_family() {
    // `%:16x` must ignore the base override — `x` always renders in base 16
    // regardless of the `:N` suffix (spec §3: base override is for `i I u U`
    // only).
    let (out, _) = run("%:8x", args!(255u32));
    assert_eq!(out, "ff");
    let (out, _) = run("%:8i", args!(8i32));
    assert_eq!(out, "10");
}

#[test]
fn base_modifier_selects_arbitrary_base() {
    let (out, n) = run("%:16i", args!(255i32));
    assert_eq!(out, "ff");
    assert_eq!(n, 2);
}

#[test]
fn repeat_char_conversion() {
    let (out, n) = run("[%.3C*]", args!());
    assert_eq!(out, "[***]");
    assert_eq!(n, 5);
}

#[test]
fn extended_signed_unsigned_letters() {
    let (out, _) = run("%I", args!(-7i32));
    assert_eq!(out, "-7");
    let (out, _) = run("%U", args!(7u32));
    assert_eq!(out, "7");
}

#[test]
fn count_target_records_bytes_emitted_so_far() {
    let cell = core::cell::Cell::new(-1);
    let argv = &[Arg::Signed(42i64), Arg::CountTarget(&cell)];
    let (out, n) = run("[%d]%n", argv);
    assert_eq!(out, "[42]");
    assert_eq!(n, 4);
    assert_eq!(cell.get(), 4);
}

#[test]
fn octal_and_indirect_conversion_are_full_tier_only_letters() {
    let (out, _) = run("%o", args!(8u32));
    assert_eq!(out, "10");
}

#[test]
fn fixed_point_q_format_default_widths_and_precision() {
    // Default `{w_int.w_frac}` is (16, 16); default precision is
    // `ceil(16 * log10(2))` = 5. 3 << 16 is exactly 3.0 in Q16.16.
    let (out, n) = run("%k", args!(3i64 << 16));
    assert_eq!(out, "3.00000");
    assert_eq!(n, 7);
}

#[test]
fn fixed_point_q_format_negative_and_explicit_widths() {
    // Q8.8, -1.5: magnitude 1.5 * 256 = 384, negated.
    let (out, n) = run("%{8.8}k", args!(-384i64));
    assert_eq!(out, "-1.500");
    assert_eq!(n, 6);
}

#[test]
fn fixed_point_q_format_precision_past_digit_cap_is_exact() {
    // Q4.4, value 2.5 (frac_bits 8 of 16): 8/16 is exact, so every digit
    // past the 38-digit cap that `FRAC_DIGIT_CAP` can resolve is a real
    // zero, not a truncation — this must not panic and must still honor
    // the full requested precision (spec §3/§6: MAXPREC is 500).
    let (out, n) = run("%.50{4.4}k", args!(40i64));
    let mut want = std::string::String::from("2.5");
    want.push_str(&"0".repeat(49));
    assert_eq!(out, want);
    assert_eq!(n, 52);
}

#[test]
fn null_template_is_bad_format() {
    let mut sink = StringSink::new();
    let mut list = ArgList::new(args!());
    let n = format(&mut sink, b"", &mut list);
    assert_eq!(n, printf_core::BAD_FORMAT);
}

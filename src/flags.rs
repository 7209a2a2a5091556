//! Format-spec flag bits (spec §3, §4.1).

bitflags::bitflags! {
    /// Flags recognized between `%` and the width field.
    ///
    /// Micro tier only ever sets `SPACE | PLUS | MINUS | ZERO`; `HASH` joins
    /// for tiny; `BANG` and `CARET` are full-tier only. `IS_SIGNED_INTERNAL`
    /// never comes from the template — the integer converter sets it on
    /// itself to remember whether the current conversion is signed, since
    /// that same converter also handles `u`/`x`/`X`/`o`/`b`.
    pub struct Flags: u16 {
        /// `' '` — prepend a space to positive signed numbers.
        const SPACE = 0b0000_0001;
        /// `+` — prepend a sign to positive signed numbers.
        const PLUS  = 0b0000_0010;
        /// `-` — left-justify within the field width.
        const MINUS = 0b0000_0100;
        /// `#` — alternate form (radix prefixes, forced decimal point).
        const HASH  = 0b0000_1000;
        /// `0` — pad with zeros instead of spaces.
        const ZERO  = 0b0001_0000;
        /// `!` — force a radix prefix even for zero; SI/engineering for FP.
        const BANG  = 0b0010_0000;
        /// `^` — centre the field's content within the width.
        const CARET = 0b0100_0000;
        /// internal: the current integer conversion is signed.
        const IS_SIGNED_INTERNAL = 0b1000_0000;
    }
}

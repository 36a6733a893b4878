//! Flag sets attached to tokens and nodes.

use bitflags::bitflags;

bitflags! {
    /// Attributes of the token most recently produced by the scanner.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE = 0;
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// Identifier spelled with `\u` escapes.
        const ESCAPED = 1 << 1;
        /// String containing a legacy octal escape or `\8` / `\9`.
        const OCTAL_ESCAPE = 1 << 2;
        /// Numeric literal such as `017`.
        const LEGACY_OCTAL = 1 << 3;
        /// Numeric literal such as `08` or `09`.
        const NON_OCTAL_DECIMAL = 1 << 4;
        /// Template chunk whose cooked value is undefined.
        const INVALID_TEMPLATE_ESCAPE = 1 << 5;
        const UNTERMINATED = 1 << 6;
    }
}

impl TokenFlags {
    #[inline]
    pub fn has_preceding_line_break(self) -> bool {
        self.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// The token cannot appear in strict mode code.
    #[inline]
    pub fn is_legacy_numeric(self) -> bool {
        self.intersects(TokenFlags::LEGACY_OCTAL | TokenFlags::NON_OCTAL_DECIMAL)
    }
}

bitflags! {
    /// Cover state of an array or object literal that may still turn out
    /// to be a pattern.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DestructuringFlags: u8 {
        const NONE = 0;
        /// Contains a shorthand initializer `{ a = 1 }` that is only valid
        /// in a pattern.
        const MUST_DESTRUCT = 1 << 0;
        /// Contains two `__proto__: value` properties.
        const SEEN_PROTO = 1 << 1;
    }
}

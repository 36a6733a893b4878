//! The scanner.
//!
//! Works over the UTF-8 bytes of the source; all offsets are byte offsets.
//! Only the current token is materialized. A `/` is always scanned as a
//! division operator and a `>` always as a single `>`; the parser asks for a
//! rescan when the grammar says otherwise.

use std::borrow::Cow;

use crate::char_codes::*;
use crate::token::{Comment, CommentKind};
use sable_ast::types::TokenFlags;
use sable_ast::Token;
use sable_core::text::LineMap;
use sable_diagnostics::messages;
use sable_diagnostics::{DiagnosticMessage, ParseError, ParseResult};

/// Where the decoded value of the current token lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueSource {
    /// A slice of the source text.
    Slice(usize, usize),
    /// The scanner's value buffer.
    Buffer,
}

/// Saved scanner state for lookahead.
pub struct ScannerState {
    pos: usize,
    token_start: usize,
    token: Token,
    token_flags: TokenFlags,
    value: ValueSource,
    value_buf: String,
    number: f64,
    regex_flags: (usize, usize),
    comments_len: usize,
    at_line_start: bool,
}

pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    line_map: LineMap<'a>,
    /// Current position (end of the current token).
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    token: Token,
    token_flags: TokenFlags,
    value: ValueSource,
    value_buf: String,
    number: f64,
    regex_flags: (usize, usize),
    /// Offset of the first invalid escape in the current template chunk.
    invalid_escape_pos: usize,
    /// `<!--` and `-->` are comments.
    html_comments: bool,
    collect_comments: bool,
    comments: Vec<Comment<'a>>,
    /// No token has been scanned on the current line yet.
    at_line_start: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            line_map: LineMap::new(source),
            pos: 0,
            token_start: 0,
            token: Token::EndOfSource,
            token_flags: TokenFlags::NONE,
            value: ValueSource::Slice(0, 0),
            value_buf: String::new(),
            number: 0.0,
            regex_flags: (0, 0),
            invalid_escape_pos: 0,
            html_comments: false,
            collect_comments: false,
            comments: Vec::new(),
            at_line_start: true,
        }
    }

    pub fn set_html_comments(&mut self, enabled: bool) {
        self.html_comments = enabled;
    }

    pub fn set_collect_comments(&mut self, enabled: bool) {
        self.collect_comments = enabled;
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub fn line_map(&self) -> &LineMap<'a> {
        &self.line_map
    }

    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    #[inline]
    pub fn token_start(&self) -> u32 {
        self.token_start as u32
    }

    #[inline]
    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.has_preceding_line_break()
    }

    /// Source text of the current token.
    #[inline]
    pub fn token_raw(&self) -> &'a str {
        &self.source[self.token_start..self.pos]
    }

    /// Decoded value: identifier name, cooked string, regex pattern, bigint
    /// digits or markup text.
    pub fn token_value(&self) -> &str {
        match self.value {
            ValueSource::Slice(start, end) => &self.source[start..end],
            ValueSource::Buffer => &self.value_buf,
        }
    }

    /// The decoded value when it is a plain slice of the source.
    pub fn token_value_slice(&self) -> Option<&'a str> {
        match self.value {
            ValueSource::Slice(start, end) => Some(&self.source[start..end]),
            ValueSource::Buffer => None,
        }
    }

    #[inline]
    pub fn token_number(&self) -> f64 {
        self.number
    }

    pub fn regex_flags(&self) -> &'a str {
        &self.source[self.regex_flags.0..self.regex_flags.1]
    }

    /// Raw text of a template chunk with line terminators normalized to `\n`.
    pub fn token_template_raw(&self) -> Cow<'a, str> {
        let start = self.token_start + 1;
        let end = match self.token {
            Token::TemplateHead | Token::TemplateMiddle => self.pos - 2,
            _ => self.pos - 1,
        };
        let raw = &self.source[start..end.max(start)];
        if raw.contains('\r') {
            Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
        } else {
            Cow::Borrowed(raw)
        }
    }

    /// Offset of the first invalid escape of the current template chunk.
    pub fn invalid_escape_pos(&self) -> u32 {
        self.invalid_escape_pos as u32
    }

    pub fn take_comments(&mut self) -> Vec<Comment<'a>> {
        std::mem::take(&mut self.comments)
    }

    pub fn error_at(&self, message: &DiagnosticMessage, args: &[&str], offset: u32) -> ParseError {
        ParseError::new(message, args, offset, self.line_map.position_of(offset))
    }

    fn error(&self, message: &DiagnosticMessage, args: &[&str], offset: usize) -> ParseError {
        self.error_at(message, args, offset as u32)
    }

    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_flags: self.token_flags,
            value: self.value,
            value_buf: self.value_buf.clone(),
            number: self.number,
            regex_flags: self.regex_flags,
            comments_len: self.comments.len(),
            at_line_start: self.at_line_start,
        }
    }

    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_flags = state.token_flags;
        self.value = state.value;
        self.value_buf = state.value_buf;
        self.number = state.number;
        self.regex_flags = state.regex_flags;
        self.comments.truncate(state.comments_len);
        self.at_line_start = state.at_line_start;
    }

    /// Run `f` and restore the scanner afterwards.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Kind and flags of the token after the current one. Lexical errors in
    /// the peeked token are reported later, when it is actually scanned.
    pub fn peek(&mut self) -> (Token, TokenFlags) {
        self.look_ahead(|s| match s.scan() {
            Ok(token) => (token, s.token_flags),
            Err(_) => (Token::EndOfSource, TokenFlags::NONE),
        })
    }

    /// The byte right after the current token.
    pub fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn byte_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn push_comment(&mut self, kind: CommentKind, start: usize, end: usize, value: (usize, usize)) {
        if self.collect_comments {
            self.comments.push(Comment {
                kind,
                value: &self.source[value.0..value.1],
                start: start as u32,
                end: end as u32,
            });
        }
    }

    /// Position of the next line terminator at or after `from`, or the end
    /// of input.
    fn find_line_end(&self, from: usize) -> usize {
        let mut search = from;
        loop {
            match memchr::memchr3(b'\n', b'\r', LS_PS_LEAD, &self.bytes[search..]) {
                None => return self.bytes.len(),
                Some(i) => {
                    let at = search + i;
                    if self.bytes[at] != LS_PS_LEAD || self.is_ls_ps_at(at) {
                        return at;
                    }
                    search = at + 1;
                }
            }
        }
    }

    #[inline]
    fn is_ls_ps_at(&self, at: usize) -> bool {
        self.bytes.get(at) == Some(&LS_PS_LEAD)
            && self.bytes.get(at + 1) == Some(&0x80)
            && matches!(self.bytes.get(at + 2), Some(0xA8) | Some(0xA9))
    }

    fn skip_line_comment(&mut self, skip: usize, kind: CommentKind) {
        let start = self.pos;
        let value_start = self.pos + skip;
        let end = self.find_line_end(value_start);
        self.pos = end;
        self.push_comment(kind, start, end, (value_start, end));
    }

    fn skip_block_comment(&mut self) -> ParseResult<()> {
        let start = self.pos;
        let body = start + 2;
        let Some(close) = memchr::memmem::find(&self.bytes[body..], b"*/") else {
            return Err(self.error(&messages::UNTERMINATED_COMMENT, &[], start));
        };
        let end = body + close;
        let text = &self.bytes[body..end];
        if memchr::memchr2(b'\n', b'\r', text).is_some()
            || (memchr::memchr(LS_PS_LEAD, text).is_some()
                && self.source[body..end].contains([LINE_SEPARATOR, PARAGRAPH_SEPARATOR]))
        {
            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
            self.at_line_start = true;
        }
        self.pos = end + 2;
        self.push_comment(CommentKind::Block, start, self.pos, (body, end));
        Ok(())
    }

    /// Skip whitespace and comments, recording line breaks in the token flags.
    fn skip_trivia(&mut self) -> ParseResult<()> {
        if self.pos == 0 && self.bytes.starts_with(b"#!") {
            self.skip_line_comment(2, CommentKind::Line);
        }
        loop {
            if self.is_eof() {
                return Ok(());
            }
            match self.bytes[self.pos] {
                b'\n' | b'\r' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.at_line_start = true;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'/' => match self.byte_at(1) {
                    b'/' => self.skip_line_comment(2, CommentKind::Line),
                    b'*' => self.skip_block_comment()?,
                    _ => return Ok(()),
                },
                b'<' if self.html_comments && self.bytes[self.pos..].starts_with(b"<!--") => {
                    self.skip_line_comment(4, CommentKind::Html);
                }
                b'-' if self.html_comments
                    && self.at_line_start
                    && self.bytes[self.pos..].starts_with(b"-->") =>
                {
                    self.skip_line_comment(3, CommentKind::Html);
                }
                b if b < 0x80 => return Ok(()),
                _ => match self.current_char() {
                    Some(LINE_SEPARATOR) | Some(PARAGRAPH_SEPARATOR) => {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                        self.at_line_start = true;
                        self.pos += 3;
                    }
                    Some(ch) if is_white_space_single_line(ch) => self.pos += ch.len_utf8(),
                    _ => return Ok(()),
                },
            }
        }
    }

    fn begin_token(&mut self) -> ParseResult<()> {
        self.token_flags = TokenFlags::NONE;
        self.skip_trivia()?;
        self.token_start = self.pos;
        self.value = ValueSource::Slice(self.pos, self.pos);
        Ok(())
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> ParseResult<Token> {
        self.begin_token()?;
        if self.is_eof() {
            self.token = Token::EndOfSource;
            return Ok(self.token);
        }
        let token = self.scan_token()?;
        self.token = token;
        self.at_line_start = false;
        Ok(token)
    }

    fn single(&mut self, token: Token) -> Token {
        self.pos += 1;
        token
    }

    /// Consume `len` bytes and yield `token`.
    fn op(&mut self, len: usize, token: Token) -> Token {
        self.pos += len;
        token
    }

    fn scan_token(&mut self) -> ParseResult<Token> {
        let b = self.bytes[self.pos];
        let token = match b {
            b'(' => self.single(Token::LeftParen),
            b')' => self.single(Token::RightParen),
            b'{' => self.single(Token::LeftBrace),
            b'}' => self.single(Token::RightBrace),
            b'[' => self.single(Token::LeftBracket),
            b']' => self.single(Token::RightBracket),
            b';' => self.single(Token::Semicolon),
            b',' => self.single(Token::Comma),
            b':' => self.single(Token::Colon),
            b'~' => self.single(Token::Complement),
            b'@' => self.single(Token::At),
            b'>' => self.single(Token::GreaterThan),
            b'.' => self.scan_dot()?,
            b'?' => self.scan_question(),
            b'<' => self.scan_less_than(),
            b'=' => self.scan_equals(),
            b'!' => self.scan_exclamation(),
            b'+' => self.scan_repeatable(b'+', Token::Add, Token::Increment, Token::AddAssign),
            b'-' => self.scan_repeatable(b'-', Token::Subtract, Token::Decrement, Token::SubtractAssign),
            b'*' => self.scan_asterisk(),
            b'/' => self.scan_compound(Token::Divide, Token::DivideAssign),
            b'%' => self.scan_compound(Token::Modulo, Token::ModuloAssign),
            b'^' => self.scan_compound(Token::BitwiseXor, Token::BitwiseXorAssign),
            b'&' => self.scan_logical(b'&', Token::BitwiseAnd, Token::BitwiseAndAssign, Token::LogicalAnd, Token::LogicalAndAssign),
            b'|' => self.scan_logical(b'|', Token::BitwiseOr, Token::BitwiseOrAssign, Token::LogicalOr, Token::LogicalOrAssign),
            b'\'' | b'"' => self.scan_string_literal(b)?,
            b'`' => {
                self.pos += 1;
                self.scan_template_chunk(true)?
            }
            b'0'..=b'9' => self.scan_number()?,
            b'#' => self.scan_private_name()?,
            b'\\' => self.scan_identifier()?,
            _ if is_identifier_start_byte(b) => self.scan_identifier()?,
            _ if b >= 0x80 => match self.current_char() {
                Some(ch) if is_identifier_start(ch) => self.scan_identifier()?,
                _ => return Err(self.error(&messages::INVALID_CHARACTER, &[], self.pos)),
            },
            _ => return Err(self.error(&messages::INVALID_CHARACTER, &[], self.pos)),
        };
        Ok(token)
    }

    // ========================================================================
    // Punctuation
    // ========================================================================

    fn scan_dot(&mut self) -> ParseResult<Token> {
        if self.byte_at(1) == b'.' && self.byte_at(2) == b'.' {
            Ok(self.op(3, Token::Ellipsis))
        } else if self.byte_at(1).is_ascii_digit() {
            self.scan_number()
        } else {
            Ok(self.single(Token::Dot))
        }
    }

    fn scan_question(&mut self) -> Token {
        match self.byte_at(1) {
            b'?' if self.byte_at(2) == b'=' => self.op(3, Token::CoalesceAssign),
            b'?' => self.op(2, Token::Coalesce),
            // `a?.5:b` is a conditional.
            b'.' if !self.byte_at(2).is_ascii_digit() => self.op(2, Token::QuestionDot),
            _ => self.single(Token::Question),
        }
    }

    fn scan_less_than(&mut self) -> Token {
        match (self.byte_at(1), self.byte_at(2)) {
            (b'<', b'=') => self.op(3, Token::ShiftLeftAssign),
            (b'<', _) => self.op(2, Token::ShiftLeft),
            (b'=', _) => self.op(2, Token::LessThanOrEqual),
            _ => self.single(Token::LessThan),
        }
    }

    fn scan_equals(&mut self) -> Token {
        match (self.byte_at(1), self.byte_at(2)) {
            (b'=', b'=') => self.op(3, Token::StrictEqual),
            (b'=', _) => self.op(2, Token::LooseEqual),
            (b'>', _) => self.op(2, Token::Arrow),
            _ => self.single(Token::Assign),
        }
    }

    fn scan_exclamation(&mut self) -> Token {
        match (self.byte_at(1), self.byte_at(2)) {
            (b'=', b'=') => self.op(3, Token::StrictNotEqual),
            (b'=', _) => self.op(2, Token::LooseNotEqual),
            _ => self.single(Token::Negate),
        }
    }

    fn scan_repeatable(&mut self, ch: u8, single: Token, double: Token, assign: Token) -> Token {
        match self.byte_at(1) {
            b if b == ch => self.op(2, double),
            b'=' => self.op(2, assign),
            _ => self.single(single),
        }
    }

    fn scan_asterisk(&mut self) -> Token {
        match (self.byte_at(1), self.byte_at(2)) {
            (b'*', b'=') => self.op(3, Token::ExponentiateAssign),
            (b'*', _) => self.op(2, Token::Exponentiate),
            (b'=', _) => self.op(2, Token::MultiplyAssign),
            _ => self.single(Token::Multiply),
        }
    }

    fn scan_compound(&mut self, single: Token, assign: Token) -> Token {
        if self.byte_at(1) == b'=' {
            self.op(2, assign)
        } else {
            self.single(single)
        }
    }

    fn scan_logical(&mut self, ch: u8, single: Token, assign: Token, double: Token, double_assign: Token) -> Token {
        match (self.byte_at(1), self.byte_at(2)) {
            (b, b'=') if b == ch => self.op(3, double_assign),
            (b, _) if b == ch => self.op(2, double),
            (b'=', _) => self.op(2, assign),
            _ => self.single(single),
        }
    }

    /// Merge the current `>` with following `>` and `=` characters.
    pub fn rescan_greater_than(&mut self) -> Token {
        if self.token != Token::GreaterThan {
            return self.token;
        }
        self.token = match (self.byte_at(0), self.byte_at(1), self.byte_at(2)) {
            (b'>', b'>', b'=') => self.op(3, Token::LogicalShiftRightAssign),
            (b'>', b'>', _) => self.op(2, Token::LogicalShiftRight),
            (b'>', b'=', _) => self.op(2, Token::ShiftRightAssign),
            (b'>', _, _) => self.single(Token::ShiftRight),
            (b'=', _, _) => self.single(Token::GreaterThanOrEqual),
            _ => Token::GreaterThan,
        };
        self.token
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self) -> ParseResult<Token> {
        let start = self.pos;
        let escaped = self.scan_identifier_chars(start)?;
        if escaped {
            self.token_flags |= TokenFlags::ESCAPED;
        } else {
            self.value = ValueSource::Slice(start, self.pos);
        }
        Ok(Token::from_keyword(self.token_value()).unwrap_or(Token::Identifier))
    }

    /// Scan an IdentifierName starting at `self.pos`. Returns whether it
    /// contained escapes, in which case the decoded name is in the buffer.
    fn scan_identifier_chars(&mut self, start: usize) -> ParseResult<bool> {
        let mut escaped = false;
        let mut chunk_start = self.pos;
        let mut first = true;
        while !self.is_eof() {
            let b = self.bytes[self.pos];
            if is_identifier_part_byte(b) {
                if first && b.is_ascii_digit() {
                    break;
                }
                self.pos += 1;
            } else if b == b'\\' {
                if !escaped {
                    escaped = true;
                    self.value_buf.clear();
                }
                self.value_buf.push_str(&self.source[chunk_start..self.pos]);
                let escape_pos = self.pos;
                if self.byte_at(1) != b'u' {
                    return Err(self.error(&messages::INVALID_IDENTIFIER_ESCAPE, &[], escape_pos));
                }
                self.pos += 2;
                let code = self.scan_unicode_escape_body(escape_pos)?;
                let valid = char::from_u32(code)
                    .filter(|&ch| if first { is_identifier_start(ch) } else { is_identifier_part(ch) });
                match valid {
                    Some(ch) => self.value_buf.push(ch),
                    None => return Err(self.error(&messages::INVALID_IDENTIFIER_ESCAPE, &[], escape_pos)),
                }
                chunk_start = self.pos;
            } else if b >= 0x80 {
                match self.current_char() {
                    Some(ch) if (if first { is_identifier_start(ch) } else { is_identifier_part(ch) }) => {
                        self.pos += ch.len_utf8();
                    }
                    _ => break,
                }
            } else {
                break;
            }
            first = false;
        }
        if escaped {
            self.value_buf.push_str(&self.source[chunk_start..self.pos]);
            self.value = ValueSource::Buffer;
        }
        debug_assert!(self.pos > start);
        Ok(escaped)
    }

    fn scan_private_name(&mut self) -> ParseResult<Token> {
        let hash = self.pos;
        self.pos += 1;
        let starts_identifier = match self.current_char() {
            Some('\\') => true,
            Some(ch) => is_identifier_start(ch),
            None => false,
        };
        if !starts_identifier {
            return Err(self.error(&messages::INVALID_CHARACTER, &[], hash));
        }
        let start = self.pos;
        if !self.scan_identifier_chars(start)? {
            self.value = ValueSource::Slice(start, self.pos);
        }
        Ok(Token::PrivateName)
    }

    // ========================================================================
    // Escapes
    // ========================================================================

    /// Decode `XXXX` or `{X...}` after `\u`, combining an escaped surrogate
    /// pair into one code point.
    fn scan_unicode_escape_body(&mut self, escape_pos: usize) -> ParseResult<u32> {
        let code = self.scan_code_unit(escape_pos)?;
        if (0xD800..0xDC00).contains(&code) && self.byte_at(0) == b'\\' && self.byte_at(1) == b'u' {
            let saved = self.pos;
            self.pos += 2;
            if let Ok(low) = self.scan_code_unit(saved) {
                if (0xDC00..0xE000).contains(&low) {
                    return Ok(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00));
                }
            }
            self.pos = saved;
        }
        Ok(code)
    }

    fn scan_code_unit(&mut self, escape_pos: usize) -> ParseResult<u32> {
        if self.byte_at(0) == b'{' {
            self.pos += 1;
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(d) = hex_value(self.byte_at(0)) {
                value = value.saturating_mul(16).saturating_add(d);
                digits += 1;
                self.pos += 1;
            }
            if digits == 0 || self.byte_at(0) != b'}' {
                return Err(self.error(&messages::INVALID_UNICODE_ESCAPE, &[], escape_pos));
            }
            if value > 0x10FFFF {
                return Err(self.error(&messages::UNDEFINED_CODE_POINT, &[], escape_pos));
            }
            self.pos += 1;
            Ok(value)
        } else {
            let mut value = 0;
            for _ in 0..4 {
                match hex_value(self.byte_at(0)) {
                    Some(d) => value = value * 16 + d,
                    None => return Err(self.error(&messages::INVALID_UNICODE_ESCAPE, &[], escape_pos)),
                }
                self.pos += 1;
            }
            Ok(value)
        }
    }

    /// Decode the escape sequence whose backslash is at `self.pos`, pushing
    /// the decoded text onto the value buffer.
    ///
    /// In templates an invalid escape is recorded instead of failing, since
    /// tagged templates allow them. Returns `false` for such an escape.
    fn scan_escape_sequence(&mut self, in_template: bool) -> ParseResult<bool> {
        let escape_pos = self.pos;
        self.pos += 1;
        let Some(ch) = self.current_char() else {
            let message = if in_template {
                &messages::UNTERMINATED_TEMPLATE_LITERAL
            } else {
                &messages::UNTERMINATED_STRING_LITERAL
            };
            return Err(self.error(message, &[], self.token_start));
        };
        self.pos += ch.len_utf8();
        let decoded = match ch {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{C}',
            'v' => '\u{B}',
            '\r' => {
                if self.byte_at(0) == b'\n' {
                    self.pos += 1;
                }
                return Ok(true);
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => return Ok(true),
            '0' if !self.byte_at(0).is_ascii_digit() => '\0',
            '0'..='7' => {
                if in_template {
                    return Ok(self.invalid_template_escape(escape_pos));
                }
                self.token_flags |= TokenFlags::OCTAL_ESCAPE;
                let mut value = ch as u32 - '0' as u32;
                let max_len = if ch <= '3' { 3 } else { 2 };
                let mut len = 1;
                while len < max_len && matches!(self.byte_at(0), b'0'..=b'7') {
                    value = value * 8 + (self.byte_at(0) - b'0') as u32;
                    self.pos += 1;
                    len += 1;
                }
                char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            '8' | '9' => {
                if in_template {
                    return Ok(self.invalid_template_escape(escape_pos));
                }
                self.token_flags |= TokenFlags::OCTAL_ESCAPE;
                ch
            }
            'x' => {
                match (hex_value(self.byte_at(0)), hex_value(self.byte_at(1))) {
                    (Some(hi), Some(lo)) => {
                        self.pos += 2;
                        char::from_u32(hi * 16 + lo).unwrap_or(char::REPLACEMENT_CHARACTER)
                    }
                    _ if in_template => return Ok(self.invalid_template_escape(escape_pos)),
                    _ => return Err(self.error(&messages::INVALID_HEX_ESCAPE, &[], escape_pos)),
                }
            }
            'u' => {
                let saved = self.pos;
                match self.scan_unicode_escape_body(escape_pos) {
                    Ok(code) => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
                    Err(_) if in_template => {
                        self.pos = saved;
                        return Ok(self.invalid_template_escape(escape_pos));
                    }
                    Err(err) => return Err(err),
                }
            }
            other => other,
        };
        self.value_buf.push(decoded);
        Ok(true)
    }

    fn invalid_template_escape(&mut self, escape_pos: usize) -> bool {
        if !self.token_flags.contains(TokenFlags::INVALID_TEMPLATE_ESCAPE) {
            self.invalid_escape_pos = escape_pos;
        }
        self.token_flags |= TokenFlags::INVALID_TEMPLATE_ESCAPE;
        false
    }

    // ========================================================================
    // Strings and templates
    // ========================================================================

    fn scan_string_literal(&mut self, quote: u8) -> ParseResult<Token> {
        let start = self.pos;
        self.pos += 1;
        let mut chunk_start = self.pos;
        let mut buffered = false;
        loop {
            if self.is_eof() {
                return Err(self.error(&messages::UNTERMINATED_STRING_LITERAL, &[], start));
            }
            let b = self.bytes[self.pos];
            if b == quote {
                break;
            }
            match b {
                b'\\' => {
                    if !buffered {
                        buffered = true;
                        self.value_buf.clear();
                    }
                    self.value_buf.push_str(&self.source[chunk_start..self.pos]);
                    self.scan_escape_sequence(false)?;
                    chunk_start = self.pos;
                }
                b'\n' | b'\r' => {
                    return Err(self.error(&messages::UNTERMINATED_STRING_LITERAL, &[], start));
                }
                _ => self.pos += 1,
            }
        }
        if buffered {
            self.value_buf.push_str(&self.source[chunk_start..self.pos]);
            self.value = ValueSource::Buffer;
        } else {
            self.value = ValueSource::Slice(chunk_start, self.pos);
        }
        self.pos += 1;
        Ok(Token::StringLiteral)
    }

    /// Scan template characters up to and including the closing `` ` `` or
    /// `${`. `self.pos` is just past the opening delimiter.
    fn scan_template_chunk(&mut self, is_start: bool) -> ParseResult<Token> {
        let start = self.token_start;
        let mut chunk_start = self.pos;
        let mut buffered = false;
        self.value_buf.clear();
        let kind = loop {
            if self.is_eof() {
                return Err(self.error(&messages::UNTERMINATED_TEMPLATE_LITERAL, &[], start));
            }
            match self.bytes[self.pos] {
                b'`' => {
                    self.push_template_chunk(buffered, chunk_start);
                    self.pos += 1;
                    break if is_start { Token::NoSubstitutionTemplate } else { Token::TemplateTail };
                }
                b'$' if self.byte_at(1) == b'{' => {
                    self.push_template_chunk(buffered, chunk_start);
                    self.pos += 2;
                    break if is_start { Token::TemplateHead } else { Token::TemplateMiddle };
                }
                b'\\' => {
                    buffered = true;
                    self.value_buf.push_str(&self.source[chunk_start..self.pos]);
                    self.scan_escape_sequence(true)?;
                    chunk_start = self.pos;
                }
                b'\r' => {
                    buffered = true;
                    self.value_buf.push_str(&self.source[chunk_start..self.pos]);
                    self.value_buf.push('\n');
                    self.pos += 1;
                    if self.byte_at(0) == b'\n' {
                        self.pos += 1;
                    }
                    chunk_start = self.pos;
                }
                _ => self.pos += 1,
            }
        };
        Ok(kind)
    }

    fn push_template_chunk(&mut self, buffered: bool, chunk_start: usize) {
        if buffered {
            self.value_buf.push_str(&self.source[chunk_start..self.pos]);
            self.value = ValueSource::Buffer;
        } else {
            self.value = ValueSource::Slice(chunk_start, self.pos);
        }
    }

    /// Rescan the `}` that closes a template substitution as the following
    /// template chunk.
    pub fn rescan_template_continuation(&mut self) -> ParseResult<Token> {
        debug_assert_eq!(self.token, Token::RightBrace);
        self.pos = self.token_start + 1;
        self.token_flags.remove(TokenFlags::INVALID_TEMPLATE_ESCAPE);
        self.token = self.scan_template_chunk(false)?;
        Ok(self.token)
    }

    // ========================================================================
    // Regular expressions
    // ========================================================================

    /// Rescan the current `/` or `/=` as a regular expression literal.
    pub fn rescan_regex(&mut self) -> ParseResult<Token> {
        debug_assert!(matches!(self.token, Token::Divide | Token::DivideAssign));
        let start = self.token_start;
        self.pos = start + 1;
        let mut in_class = false;
        loop {
            if self.is_eof() {
                return Err(self.error(&messages::UNTERMINATED_REGEXP, &[], start));
            }
            let b = self.bytes[self.pos];
            match b {
                b'\n' | b'\r' => return Err(self.error(&messages::UNTERMINATED_REGEXP, &[], start)),
                _ if self.is_ls_ps_at(self.pos) => {
                    return Err(self.error(&messages::UNTERMINATED_REGEXP, &[], start));
                }
                b'\\' => {
                    self.pos += 1;
                    match self.current_char() {
                        Some(ch) if !is_line_terminator(ch) => self.pos += ch.len_utf8(),
                        _ => return Err(self.error(&messages::UNTERMINATED_REGEXP, &[], start)),
                    }
                    continue;
                }
                b'[' => in_class = true,
                b']' => in_class = false,
                b'/' if !in_class => break,
                _ => {}
            }
            self.pos += 1;
        }
        self.value = ValueSource::Slice(start + 1, self.pos);
        self.pos += 1;

        let flags_start = self.pos;
        let mut seen = 0u8;
        while let Some(ch) = self.current_char() {
            if !is_identifier_part(ch) {
                if ch == '\\' {
                    return Err(self.error(&messages::INVALID_REGEXP_FLAG, &["\\"], self.pos));
                }
                break;
            }
            let bit = match ch {
                'd' => 1 << 0,
                'g' => 1 << 1,
                'i' => 1 << 2,
                'm' => 1 << 3,
                's' => 1 << 4,
                'u' => 1 << 5,
                'y' => 1 << 6,
                'v' => 1 << 7,
                _ => {
                    let flag = ch.to_string();
                    return Err(self.error(&messages::INVALID_REGEXP_FLAG, &[flag.as_str()], self.pos));
                }
            };
            if seen & bit != 0 {
                let flag = ch.to_string();
                return Err(self.error(&messages::DUPLICATE_REGEXP_FLAG, &[flag.as_str()], self.pos));
            }
            seen |= bit;
            self.pos += 1;
        }
        if seen & (1 << 5) != 0 && seen & (1 << 7) != 0 {
            return Err(self.error(&messages::INVALID_REGEXP_FLAG, &["v"], flags_start));
        }
        self.regex_flags = (flags_start, self.pos);
        self.token = Token::RegularExpression;
        Ok(self.token)
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    /// Scan digits of `radix`, allowing single `_` separators between digits.
    /// Digits are appended to `digits` when given. Returns the digit count.
    fn scan_digits(&mut self, radix: u32, allow_separators: bool, mut digits: Option<&mut String>) -> ParseResult<usize> {
        let mut count = 0;
        let mut last_was_separator = false;
        loop {
            let b = self.byte_at(0);
            if b == b'_' {
                if !allow_separators || count == 0 || last_was_separator {
                    return Err(self.error(&messages::NUMERIC_SEPARATOR_NOT_ALLOWED, &[], self.pos));
                }
                last_was_separator = true;
                self.pos += 1;
            } else if is_digit_in_radix(b, radix) {
                if let Some(buf) = digits.as_mut() {
                    buf.push(b as char);
                }
                last_was_separator = false;
                count += 1;
                self.pos += 1;
            } else {
                break;
            }
        }
        if last_was_separator {
            return Err(self.error(&messages::TRAILING_NUMERIC_SEPARATOR, &[], self.pos - 1));
        }
        Ok(count)
    }

    fn scan_number(&mut self) -> ParseResult<Token> {
        let start = self.pos;
        if self.bytes[start] == b'0' {
            match self.byte_at(1) {
                b'x' | b'X' => return self.scan_radix_number(16, &messages::HEX_DIGIT_EXPECTED),
                b'o' | b'O' => return self.scan_radix_number(8, &messages::OCTAL_DIGIT_EXPECTED),
                b'b' | b'B' => return self.scan_radix_number(2, &messages::BINARY_DIGIT_EXPECTED),
                b'0'..=b'9' => return self.scan_legacy_number(),
                b'_' => return Err(self.error(&messages::NUMERIC_SEPARATOR_NOT_ALLOWED, &[], start + 1)),
                _ => {}
            }
        }

        let mut text = String::new();
        self.scan_digits(10, true, Some(&mut text))?;
        let is_integer = self.scan_fraction_and_exponent(&mut text)?;

        if self.byte_at(0) == b'n' {
            if !is_integer {
                return Err(self.error(&messages::INVALID_BIGINT, &[], start));
            }
            return self.finish_bigint(start);
        }
        self.number = parse_decimal(&text);
        self.check_after_number()?;
        Ok(Token::NumericLiteral)
    }

    /// Returns whether the literal is still an integer.
    fn scan_fraction_and_exponent(&mut self, text: &mut String) -> ParseResult<bool> {
        let mut is_integer = true;
        if self.byte_at(0) == b'.' {
            is_integer = false;
            text.push('.');
            self.pos += 1;
            if self.byte_at(0) == b'_' {
                return Err(self.error(&messages::NUMERIC_SEPARATOR_NOT_ALLOWED, &[], self.pos));
            }
            self.scan_digits(10, true, Some(&mut *text))?;
        }
        if matches!(self.byte_at(0), b'e' | b'E') {
            is_integer = false;
            text.push('e');
            self.pos += 1;
            if matches!(self.byte_at(0), b'+' | b'-') {
                text.push(self.byte_at(0) as char);
                self.pos += 1;
            }
            if self.scan_digits(10, true, Some(&mut *text))? == 0 {
                return Err(self.error(&messages::DIGIT_EXPECTED, &[], self.pos));
            }
        }
        Ok(is_integer)
    }

    fn scan_radix_number(&mut self, radix: u32, missing: &DiagnosticMessage) -> ParseResult<Token> {
        let start = self.pos;
        self.pos += 2;
        if self.byte_at(0) == b'_' {
            return Err(self.error(&messages::NUMERIC_SEPARATOR_NOT_ALLOWED, &[], self.pos));
        }
        let mut digits = String::new();
        if self.scan_digits(radix, true, Some(&mut digits))? == 0 {
            return Err(self.error(missing, &[], self.pos));
        }
        if self.byte_at(0) == b'n' {
            return self.finish_bigint(start);
        }
        self.number = digits
            .bytes()
            .fold(0.0, |acc, d| acc * radix as f64 + (d as char).to_digit(radix).unwrap_or(0) as f64);
        self.check_after_number()?;
        Ok(Token::NumericLiteral)
    }

    /// `0` followed by more digits: legacy octal (`017`) or non-octal
    /// decimal (`089`).
    fn scan_legacy_number(&mut self) -> ParseResult<Token> {
        let start = self.pos;
        let mut text = String::new();
        self.scan_digits(10, false, Some(&mut text))?;
        if text.bytes().all(|b| matches!(b, b'0'..=b'7')) {
            self.token_flags |= TokenFlags::LEGACY_OCTAL;
            self.number = text.bytes().fold(0.0, |acc, d| acc * 8.0 + (d - b'0') as f64);
        } else {
            self.token_flags |= TokenFlags::NON_OCTAL_DECIMAL;
            self.scan_fraction_and_exponent(&mut text)?;
            self.number = parse_decimal(&text);
        }
        if self.byte_at(0) == b'n' {
            return Err(self.error(&messages::INVALID_BIGINT, &[], start));
        }
        self.check_after_number()?;
        Ok(Token::NumericLiteral)
    }

    fn finish_bigint(&mut self, start: usize) -> ParseResult<Token> {
        let digits = &self.source[start..self.pos];
        self.value_buf.clear();
        self.value_buf.extend(digits.chars().filter(|&c| c != '_'));
        self.value = ValueSource::Buffer;
        self.pos += 1;
        self.check_after_number()?;
        Ok(Token::BigIntLiteral)
    }

    /// An identifier start or digit may not directly follow a numeric literal.
    fn check_after_number(&self) -> ParseResult<()> {
        match self.current_char() {
            Some(ch) if ch.is_ascii_digit() || is_identifier_start(ch) || ch == '\\' => {
                Err(self.error(&messages::IDENTIFIER_AFTER_NUMBER, &[], self.pos))
            }
            _ => Ok(()),
        }
    }

    // ========================================================================
    // Markup
    // ========================================================================

    /// Scan markup children starting at the end of the current token: a text
    /// run, `{`, `<` or the end of input.
    pub fn scan_jsx_child(&mut self) -> ParseResult<Token> {
        self.token_flags = TokenFlags::NONE;
        self.token_start = self.pos;
        if self.is_eof() {
            self.token = Token::EndOfSource;
            return Ok(self.token);
        }
        self.token = match self.bytes[self.pos] {
            b'{' => self.single(Token::LeftBrace),
            b'<' => self.single(Token::LessThan),
            _ => {
                let start = self.pos;
                while !self.is_eof() {
                    match self.bytes[self.pos] {
                        b'{' | b'<' => break,
                        b'>' | b'}' => {
                            let ch = (self.bytes[self.pos] as char).to_string();
                            return Err(self.error(&messages::UNEXPECTED_TOKEN, &[ch.as_str()], self.pos));
                        }
                        _ => self.pos += 1,
                    }
                }
                self.set_jsx_text_value(start, self.pos);
                Token::JsxText
            }
        };
        Ok(self.token)
    }

    /// Extend the current identifier over `-` for markup names like
    /// `data-value`.
    pub fn scan_jsx_identifier(&mut self) {
        if !self.token.is_word() {
            return;
        }
        let mut extended = false;
        while !self.is_eof() {
            let b = self.bytes[self.pos];
            if b == b'-' || is_identifier_part_byte(b) {
                self.pos += 1;
                extended = true;
            } else if b >= 0x80 {
                match self.current_char() {
                    Some(ch) if is_identifier_part(ch) => {
                        self.pos += ch.len_utf8();
                        extended = true;
                    }
                    _ => break,
                }
            } else {
                break;
            }
        }
        if extended || self.token != Token::Identifier {
            self.value = ValueSource::Slice(self.token_start, self.pos);
            self.token = Token::Identifier;
        }
    }

    /// Scan an attribute value. Strings are taken verbatim, without escape
    /// processing; anything else is scanned as an ordinary token.
    pub fn scan_jsx_attribute_value(&mut self) -> ParseResult<Token> {
        self.begin_token()?;
        let quote = self.byte_at(0);
        if quote != b'"' && quote != b'\'' {
            return self.scan();
        }
        let start = self.pos;
        self.pos += 1;
        match memchr::memchr(quote, &self.bytes[self.pos..]) {
            Some(i) => {
                self.set_jsx_text_value(self.pos, self.pos + i);
                self.pos += i + 1;
            }
            None => return Err(self.error(&messages::UNTERMINATED_STRING_LITERAL, &[], start)),
        }
        self.token = Token::StringLiteral;
        Ok(self.token)
    }

    fn set_jsx_text_value(&mut self, start: usize, end: usize) {
        let text = &self.source[start..end];
        match decode_entities(text) {
            Cow::Borrowed(_) => self.value = ValueSource::Slice(start, end),
            Cow::Owned(decoded) => {
                self.value_buf = decoded;
                self.value = ValueSource::Buffer;
            }
        }
    }
}

fn parse_decimal(text: &str) -> f64 {
    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Decode HTML character references in markup text.
fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let entity = &after[..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{A0}'),
                "copy" => Some('\u{A9}'),
                "hellip" => Some('\u{2026}'),
                "mdash" => Some('\u{2014}'),
                "ndash" => Some('\u{2013}'),
                _ => {
                    let code = if let Some(hex) = entity.strip_prefix("#x") {
                        u32::from_str_radix(hex, 16).ok()
                    } else if let Some(dec) = entity.strip_prefix('#') {
                        dec.parse::<u32>().ok()
                    } else {
                        None
                    };
                    code.and_then(char::from_u32)
                }
            };
            ch.map(|ch| (ch, semi))
        });
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(source);
        let mut result = Vec::new();
        loop {
            let token = scanner.scan().unwrap();
            if token == Token::EndOfSource {
                break;
            }
            result.push(token);
        }
        result
    }

    #[test]
    fn test_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("&unknown; &"), "&unknown; &");
    }

    #[test]
    fn test_greater_than_is_single() {
        assert_eq!(tokens("a >>= b"), vec![Token::Identifier, Token::GreaterThan, Token::GreaterThan, Token::Assign, Token::Identifier]);
    }

    #[test]
    fn test_rescan_greater_than() {
        let mut scanner = Scanner::new(">>>= 1");
        assert_eq!(scanner.scan().unwrap(), Token::GreaterThan);
        assert_eq!(scanner.rescan_greater_than(), Token::LogicalShiftRightAssign);
        assert_eq!(scanner.token_raw(), ">>>=");
    }

    #[test]
    fn test_question_dot_before_digit() {
        assert_eq!(tokens("a?.5:b"), vec![Token::Identifier, Token::Question, Token::NumericLiteral, Token::Colon, Token::Identifier]);
        assert_eq!(tokens("a?.b"), vec![Token::Identifier, Token::QuestionDot, Token::Identifier]);
    }
}

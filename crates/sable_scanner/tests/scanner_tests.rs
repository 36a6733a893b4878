//! Scanner integration tests.
//!
//! Verifies that the scanner correctly tokenizes JavaScript source text.

use pretty_assertions::assert_eq;
use sable_ast::types::TokenFlags;
use sable_ast::Token;
use sable_diagnostics::{messages, ParseError};
use sable_scanner::{CommentKind, Scanner};

/// Helper: scan all tokens from source and return as (kind, value) pairs.
fn scan_all(source: &str) -> Vec<(Token, String)> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan().unwrap();
        if kind == Token::EndOfSource {
            break;
        }
        tokens.push((kind, scanner.token_value().to_string()));
    }
    tokens
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<Token> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

/// Helper: scan a single token and return the scanner positioned on it.
fn scan_one(source: &str) -> Scanner<'_> {
    let mut scanner = Scanner::new(source);
    scanner.scan().unwrap();
    scanner
}

/// Helper: the first error produced while scanning every token.
fn scan_error(source: &str) -> ParseError {
    let mut scanner = Scanner::new(source);
    loop {
        match scanner.scan() {
            Ok(Token::EndOfSource) => panic!("expected {source:?} to fail"),
            Ok(_) => {}
            Err(err) => return err,
        }
    }
}

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
}

#[test]
fn test_whitespace_only() {
    assert!(scan_all("   \n\t \u{FEFF} \u{2028}").is_empty());
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numeric_literals() {
    let cases: &[(&str, f64)] = &[
        ("42", 42.0),
        ("3.14", 3.14),
        (".5", 0.5),
        ("1e3", 1000.0),
        ("2E-2", 0.02),
        ("0xFF", 255.0),
        ("0b1010", 10.0),
        ("0o77", 63.0),
        ("1_000_000", 1_000_000.0),
    ];
    for &(source, expected) in cases {
        let scanner = scan_one(source);
        assert_eq!(scanner.token(), Token::NumericLiteral, "{source}");
        assert_eq!(scanner.token_number(), expected, "{source}");
        assert_eq!(scanner.token_raw(), source);
    }
}

#[test]
fn test_legacy_octal_and_non_octal_decimal() {
    let scanner = scan_one("017");
    assert_eq!(scanner.token_number(), 15.0);
    assert!(scanner.token_flags().contains(TokenFlags::LEGACY_OCTAL));

    let scanner = scan_one("089");
    assert_eq!(scanner.token_number(), 89.0);
    assert!(scanner.token_flags().contains(TokenFlags::NON_OCTAL_DECIMAL));
}

#[test]
fn test_bigint_literals() {
    let scanner = scan_one("1_000n");
    assert_eq!(scanner.token(), Token::BigIntLiteral);
    assert_eq!(scanner.token_value(), "1000");
    assert_eq!(scan_kinds("0x1Fn"), vec![Token::BigIntLiteral]);
}

#[test]
fn test_numeric_errors() {
    assert!(scan_error("1__0").is(&messages::NUMERIC_SEPARATOR_NOT_ALLOWED));
    assert!(scan_error("1_").is(&messages::TRAILING_NUMERIC_SEPARATOR));
    assert!(scan_error("0x").is(&messages::HEX_DIGIT_EXPECTED));
    assert!(scan_error("1.5n").is(&messages::INVALID_BIGINT));
    assert!(scan_error("017n").is(&messages::INVALID_BIGINT));
    assert!(scan_error("3in x").is(&messages::IDENTIFIER_AFTER_NUMBER));
    assert!(scan_error("1e").is(&messages::DIGIT_EXPECTED));
}

#[test]
fn test_member_access_on_number() {
    assert_eq!(scan_kinds("1..toString"), vec![Token::NumericLiteral, Token::Dot, Token::Identifier]);
}

// ============================================================================
// Strings and templates
// ============================================================================

#[test]
fn test_string_literals() {
    let tokens = scan_all(r#"'single' "double" 'a\nb' "\x41B\u{43}""#);
    assert_eq!(tokens[0], (Token::StringLiteral, "single".to_string()));
    assert_eq!(tokens[1], (Token::StringLiteral, "double".to_string()));
    assert_eq!(tokens[2].1, "a\nb");
    assert_eq!(tokens[3].1, "ABC");
}

#[test]
fn test_string_line_continuation() {
    let tokens = scan_all("'a\\\nb'");
    assert_eq!(tokens[0].1, "ab");
}

#[test]
fn test_string_octal_escape_flag() {
    let scanner = scan_one(r"'\101'");
    assert_eq!(scanner.token_value(), "A");
    assert!(scanner.token_flags().contains(TokenFlags::OCTAL_ESCAPE));
    let scanner = scan_one(r"'\0'");
    assert!(!scanner.token_flags().contains(TokenFlags::OCTAL_ESCAPE));
}

#[test]
fn test_string_errors() {
    assert!(scan_error("'abc").is(&messages::UNTERMINATED_STRING_LITERAL));
    assert!(scan_error("'a\nb'").is(&messages::UNTERMINATED_STRING_LITERAL));
    assert!(scan_error(r"'\x4'").is(&messages::INVALID_HEX_ESCAPE));
    assert!(scan_error(r"'\u{110000}'").is(&messages::UNDEFINED_CODE_POINT));
}

#[test]
fn test_template_literals() {
    let tokens = scan_all("`hello`");
    assert_eq!(tokens, vec![(Token::NoSubstitutionTemplate, "hello".to_string())]);

    let mut scanner = Scanner::new("`a${b}c`");
    assert_eq!(scanner.scan().unwrap(), Token::TemplateHead);
    assert_eq!(scanner.token_value(), "a");
    assert_eq!(scanner.scan().unwrap(), Token::Identifier);
    assert_eq!(scanner.scan().unwrap(), Token::RightBrace);
    assert_eq!(scanner.rescan_template_continuation().unwrap(), Token::TemplateTail);
    assert_eq!(scanner.token_value(), "c");
    assert_eq!(scanner.token_raw(), "}c`");
}

#[test]
fn test_template_raw_normalizes_line_endings() {
    let scanner = scan_one("`a\r\nb`");
    assert_eq!(scanner.token_value(), "a\nb");
    assert_eq!(scanner.token_template_raw(), "a\nb");
}

#[test]
fn test_template_invalid_escape_is_recorded() {
    let scanner = scan_one(r"`a\u{zz}`");
    assert!(scanner.token_flags().contains(TokenFlags::INVALID_TEMPLATE_ESCAPE));
    assert_eq!(scanner.invalid_escape_pos(), 2);
}

// ============================================================================
// Identifiers and keywords
// ============================================================================

#[test]
fn test_identifiers() {
    let tokens = scan_all("foo _bar $baz café ñ");
    assert!(tokens.iter().all(|(kind, _)| *kind == Token::Identifier));
    assert_eq!(tokens[3].1, "café");
}

#[test]
fn test_keywords() {
    assert_eq!(
        scan_kinds("var let const function class if else"),
        vec![
            Token::VarKeyword,
            Token::LetKeyword,
            Token::ConstKeyword,
            Token::FunctionKeyword,
            Token::ClassKeyword,
            Token::IfKeyword,
            Token::ElseKeyword,
        ]
    );
}

#[test]
fn test_contextual_keywords() {
    assert_eq!(
        scan_kinds("async await of get set"),
        vec![
            Token::AsyncKeyword,
            Token::AwaitKeyword,
            Token::OfKeyword,
            Token::GetKeyword,
            Token::SetKeyword,
        ]
    );
}

#[test]
fn test_escaped_identifiers() {
    let scanner = scan_one(r"\u0061bc");
    assert_eq!(scanner.token(), Token::Identifier);
    assert_eq!(scanner.token_value(), "abc");
    assert!(scanner.token_flags().contains(TokenFlags::ESCAPED));

    let scanner = scan_one(r"v\u{61}r");
    assert_eq!(scanner.token(), Token::VarKeyword);
    assert!(scanner.token_flags().contains(TokenFlags::ESCAPED));

    assert!(scan_error(r"\u0030abc").is(&messages::INVALID_IDENTIFIER_ESCAPE));
    assert!(scan_error(r"a\x41").is(&messages::INVALID_IDENTIFIER_ESCAPE));
}

#[test]
fn test_private_names() {
    let tokens = scan_all("#field #\\u0061");
    assert_eq!(tokens[0], (Token::PrivateName, "field".to_string()));
    assert_eq!(tokens[1], (Token::PrivateName, "a".to_string()));
    assert!(scan_error("# x").is(&messages::INVALID_CHARACTER));
}

// ============================================================================
// Punctuation
// ============================================================================

#[test]
fn test_operators() {
    assert_eq!(
        scan_kinds("=== !== ** **= ?? ??= ?. => ... &&= ||="),
        vec![
            Token::StrictEqual,
            Token::StrictNotEqual,
            Token::Exponentiate,
            Token::ExponentiateAssign,
            Token::Coalesce,
            Token::CoalesceAssign,
            Token::QuestionDot,
            Token::Arrow,
            Token::Ellipsis,
            Token::LogicalAndAssign,
            Token::LogicalOrAssign,
        ]
    );
}

#[test]
fn test_greater_than_split_and_merged() {
    let mut scanner = Scanner::new("a >>> b");
    scanner.scan().unwrap();
    assert_eq!(scanner.scan().unwrap(), Token::GreaterThan);
    assert_eq!(scanner.rescan_greater_than(), Token::LogicalShiftRight);
    assert_eq!(scanner.scan().unwrap(), Token::Identifier);
}

#[test]
fn test_invalid_character() {
    let err = scan_error("a ^ \u{1}");
    assert!(err.is(&messages::INVALID_CHARACTER));
    assert_eq!(err.offset, 4);
}

// ============================================================================
// Regular expressions
// ============================================================================

#[test]
fn test_rescan_regex() {
    let mut scanner = Scanner::new("/[/]a\\/b/gi.x");
    assert_eq!(scanner.scan().unwrap(), Token::Divide);
    assert_eq!(scanner.rescan_regex().unwrap(), Token::RegularExpression);
    assert_eq!(scanner.token_value(), "[/]a\\/b");
    assert_eq!(scanner.regex_flags(), "gi");
    assert_eq!(scanner.scan().unwrap(), Token::Dot);
}

#[test]
fn test_regex_errors() {
    let rescan = |source: &str| {
        let mut scanner = Scanner::new(source);
        scanner.scan().unwrap();
        scanner.rescan_regex().unwrap_err()
    };
    assert!(rescan("/abc").is(&messages::UNTERMINATED_REGEXP));
    assert!(rescan("/a\nb/").is(&messages::UNTERMINATED_REGEXP));
    assert!(rescan("/a/gg").is(&messages::DUPLICATE_REGEXP_FLAG));
    assert!(rescan("/a/x").is(&messages::INVALID_REGEXP_FLAG));
    assert!(rescan("/a/uv").is(&messages::INVALID_REGEXP_FLAG));
}

// ============================================================================
// Trivia
// ============================================================================

#[test]
fn test_line_break_flag() {
    let mut scanner = Scanner::new("a\nb /* \n */ c d");
    scanner.scan().unwrap();
    assert!(!scanner.has_preceding_line_break());
    scanner.scan().unwrap();
    assert!(scanner.has_preceding_line_break());
    scanner.scan().unwrap();
    assert!(scanner.has_preceding_line_break());
    scanner.scan().unwrap();
    assert!(!scanner.has_preceding_line_break());
}

#[test]
fn test_comments_are_collected() {
    let mut scanner = Scanner::new("// line\n/* block */ x");
    scanner.set_collect_comments(true);
    assert_eq!(scanner.scan().unwrap(), Token::Identifier);
    let comments = scanner.take_comments();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].kind, CommentKind::Line);
    assert_eq!(comments[0].value, " line");
    assert_eq!((comments[0].start, comments[0].end), (0, 7));
    assert_eq!(comments[1].kind, CommentKind::Block);
    assert_eq!(comments[1].value, " block ");
}

#[test]
fn test_hashbang() {
    let mut scanner = Scanner::new("#!/usr/bin/env node\nx");
    scanner.set_collect_comments(true);
    assert_eq!(scanner.scan().unwrap(), Token::Identifier);
    assert_eq!(scanner.take_comments()[0].value, "/usr/bin/env node");
}

#[test]
fn test_html_comments() {
    let mut scanner = Scanner::new("x <!-- hidden\n--> also hidden\ny");
    scanner.set_html_comments(true);
    scanner.set_collect_comments(true);
    assert_eq!(scanner.scan().unwrap(), Token::Identifier);
    assert_eq!(scanner.scan().unwrap(), Token::Identifier);
    assert_eq!(scanner.token_value(), "y");
    let comments = scanner.take_comments();
    assert_eq!(comments.len(), 2);
    assert!(comments.iter().all(|c| c.kind == CommentKind::Html));

    assert_eq!(scan_kinds("x <!-- y"), vec![Token::Identifier, Token::LessThan, Token::Negate, Token::Decrement, Token::Identifier]);
}

#[test]
fn test_unterminated_comment() {
    assert!(scan_error("/* never closed").is(&messages::UNTERMINATED_COMMENT));
}

// ============================================================================
// Lookahead
// ============================================================================

#[test]
fn test_peek_restores_state() {
    let mut scanner = Scanner::new("a\n(b)");
    scanner.scan().unwrap();
    let (token, flags) = scanner.peek();
    assert_eq!(token, Token::LeftParen);
    assert!(flags.has_preceding_line_break());
    assert_eq!(scanner.token(), Token::Identifier);
    assert_eq!(scanner.token_value(), "a");
    assert_eq!(scanner.scan().unwrap(), Token::LeftParen);
}

#[test]
fn test_save_and_restore_state() {
    let mut scanner = Scanner::new("x y z");
    scanner.scan().unwrap();
    let state = scanner.save_state();
    scanner.scan().unwrap();
    scanner.scan().unwrap();
    assert_eq!(scanner.token_value(), "z");
    scanner.restore_state(state);
    assert_eq!(scanner.token_value(), "x");
    scanner.scan().unwrap();
    assert_eq!(scanner.token_value(), "y");
}

// ============================================================================
// Markup
// ============================================================================

#[test]
fn test_jsx_text_and_entities() {
    let mut scanner = Scanner::new(">a &amp; b{x}");
    assert_eq!(scanner.scan().unwrap(), Token::GreaterThan);
    assert_eq!(scanner.scan_jsx_child().unwrap(), Token::JsxText);
    assert_eq!(scanner.token_value(), "a & b");
    assert_eq!(scanner.token_raw(), "a &amp; b");
    assert_eq!(scanner.scan_jsx_child().unwrap(), Token::LeftBrace);
}

#[test]
fn test_jsx_identifier_with_dash() {
    let mut scanner = Scanner::new("data-value=");
    scanner.scan().unwrap();
    scanner.scan_jsx_identifier();
    assert_eq!(scanner.token(), Token::Identifier);
    assert_eq!(scanner.token_value(), "data-value");
    assert_eq!(scanner.scan().unwrap(), Token::Assign);
}

#[test]
fn test_jsx_attribute_string_is_verbatim() {
    let mut scanner = Scanner::new(r#"="a\nb""#);
    scanner.scan().unwrap();
    assert_eq!(scanner.scan_jsx_attribute_value().unwrap(), Token::StringLiteral);
    assert_eq!(scanner.token_value(), "a\\nb");
}

//! sable_diagnostics: Error messages and the parse failure type.
//!
//! Parsing stops at the first error, so instead of a diagnostic collection
//! this crate provides a single [`ParseError`] value carrying a numeric code,
//! the rendered message and the position of the offending token.

use sable_core::text::Position;
use thiserror::Error;

/// A message template with a stable numeric code.
///
/// Templates may contain `{0}`, `{1}`, ... placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub message: &'static str,
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// The error produced when a source text fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({line}:{column})")]
pub struct ParseError {
    pub code: u32,
    pub message: String,
    /// Byte offset of the offending token.
    pub offset: u32,
    /// 1-based line.
    pub line: u32,
    /// 0-based column in UTF-16 code units.
    pub column: u32,
}

impl ParseError {
    pub fn new(message: &DiagnosticMessage, args: &[&str], offset: u32, position: Position) -> Self {
        Self {
            code: message.code,
            message: format_message(message.message, args),
            offset,
            line: position.line,
            column: position.column,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Whether this error was raised from the given catalog entry.
    pub fn is(&self, message: &DiagnosticMessage) -> bool {
        self.code == message.code
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

// ============================================================================
// Message catalog
// ============================================================================

pub mod messages {
    use super::DiagnosticMessage;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Lexical errors (1000-1099)
    // ========================================================================
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1000, "Invalid character.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1001, "Unterminated string literal.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1002, "Unterminated template literal.");
    pub const UNTERMINATED_REGEXP: DiagnosticMessage = diag!(1003, "Unterminated regular expression literal.");
    pub const UNTERMINATED_COMMENT: DiagnosticMessage = diag!(1004, "Unterminated comment.");
    pub const INVALID_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1005, "Invalid escape sequence.");
    pub const INVALID_UNICODE_ESCAPE: DiagnosticMessage = diag!(1006, "Invalid Unicode escape sequence.");
    pub const INVALID_HEX_ESCAPE: DiagnosticMessage = diag!(1007, "Invalid hexadecimal escape sequence.");
    pub const UNDEFINED_CODE_POINT: DiagnosticMessage = diag!(1008, "Undefined Unicode code-point.");
    pub const INVALID_IDENTIFIER_ESCAPE: DiagnosticMessage = diag!(1009, "Invalid Unicode escape sequence in identifier.");
    pub const NUMERIC_SEPARATOR_NOT_ALLOWED: DiagnosticMessage = diag!(1010, "Numeric separators are not allowed here.");
    pub const TRAILING_NUMERIC_SEPARATOR: DiagnosticMessage = diag!(1011, "Numeric separators are not allowed at the end of numeric literals.");
    pub const DIGIT_EXPECTED: DiagnosticMessage = diag!(1012, "Digit expected.");
    pub const HEX_DIGIT_EXPECTED: DiagnosticMessage = diag!(1013, "Hexadecimal digit expected.");
    pub const BINARY_DIGIT_EXPECTED: DiagnosticMessage = diag!(1014, "Binary digit expected.");
    pub const OCTAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1015, "Octal digit expected.");
    pub const IDENTIFIER_AFTER_NUMBER: DiagnosticMessage = diag!(1016, "An identifier or keyword cannot immediately follow a numeric literal.");
    pub const INVALID_BIGINT: DiagnosticMessage = diag!(1017, "Invalid BigInt syntax.");
    pub const INVALID_REGEXP_FLAG: DiagnosticMessage = diag!(1018, "Invalid regular expression flag '{0}'.");
    pub const DUPLICATE_REGEXP_FLAG: DiagnosticMessage = diag!(1019, "Duplicate regular expression flag '{0}'.");
    pub const INVALID_TEMPLATE_ESCAPE: DiagnosticMessage = diag!(1020, "Invalid escape sequence in template.");

    // ========================================================================
    // Grammar errors (1100-1199)
    // ========================================================================
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1100, "Unexpected token '{0}'.");
    pub const EXPECTED_TOKEN: DiagnosticMessage = diag!(1101, "'{0}' expected.");
    pub const UNEXPECTED_EOF: DiagnosticMessage = diag!(1102, "Unexpected end of input.");
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1103, "Identifier expected.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1104, "Expression expected.");
    pub const MISSING_CONST_INITIALIZER: DiagnosticMessage = diag!(1105, "Missing initializer in const declaration.");
    pub const MISSING_DESTRUCTURING_INITIALIZER: DiagnosticMessage = diag!(1106, "Missing initializer in destructuring declaration.");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(1107, "Invalid left-hand side in assignment.");
    pub const INVALID_UPDATE_TARGET: DiagnosticMessage = diag!(1108, "Invalid left-hand side expression in {0} operation.");
    pub const INVALID_FOR_IN_OF_TARGET: DiagnosticMessage = diag!(1109, "Invalid left-hand side in for-{0} loop.");
    pub const FOR_IN_OF_SINGLE_BINDING: DiagnosticMessage = diag!(1110, "Only a single declaration is allowed in a for-{0} statement.");
    pub const FOR_IN_OF_INITIALIZER: DiagnosticMessage = diag!(1111, "for-{0} loop variable declaration may not have an initializer.");
    pub const FOR_OF_LET: DiagnosticMessage = diag!(1112, "The left-hand side of a for-of loop may not be 'let'.");
    pub const FOR_OF_ASYNC: DiagnosticMessage = diag!(1113, "The left-hand side of a for-of loop may not be 'async'.");
    pub const FOR_AWAIT_REQUIRES_OF: DiagnosticMessage = diag!(1114, "'for await' loops must use 'of'.");
    pub const NEWLINE_AFTER_THROW: DiagnosticMessage = diag!(1115, "Illegal newline after throw.");
    pub const MISSING_CATCH_OR_FINALLY: DiagnosticMessage = diag!(1116, "Missing catch or finally after try.");
    pub const MULTIPLE_DEFAULTS_IN_SWITCH: DiagnosticMessage = diag!(1117, "More than one default clause in switch statement.");
    pub const REST_TRAILING_COMMA: DiagnosticMessage = diag!(1118, "A rest element may not have a trailing comma.");
    pub const REST_MUST_BE_LAST: DiagnosticMessage = diag!(1119, "Rest element must be last element.");
    pub const REST_WITH_INITIALIZER: DiagnosticMessage = diag!(1120, "Rest elements cannot have a default value.");
    pub const INVALID_DESTRUCTURING_TARGET: DiagnosticMessage = diag!(1121, "Invalid destructuring assignment target.");
    pub const INVALID_SHORTHAND_INITIALIZER: DiagnosticMessage = diag!(1122, "Invalid shorthand property initializer.");
    pub const INVALID_ARROW_PARAMETER: DiagnosticMessage = diag!(1123, "Invalid arrow function parameter.");
    pub const LINE_TERMINATOR_BEFORE_ARROW: DiagnosticMessage = diag!(1124, "Line terminator not permitted before arrow.");
    pub const NULLISH_MIXED_WITH_LOGICAL: DiagnosticMessage = diag!(1125, "Nullish coalescing cannot be mixed with '||' or '&&' without parentheses.");
    pub const UNARY_BEFORE_EXPONENTIATION: DiagnosticMessage = diag!(1126, "Unary operator used immediately before exponentiation expression; parentheses are required.");
    pub const OPTIONAL_CHAIN_NEW: DiagnosticMessage = diag!(1127, "Invalid optional chain from new expression.");
    pub const OPTIONAL_CHAIN_TEMPLATE: DiagnosticMessage = diag!(1128, "Tagged template cannot be used in optional chain.");
    pub const GETTER_PARAMETERS: DiagnosticMessage = diag!(1129, "Getter must not have any formal parameters.");
    pub const SETTER_PARAMETERS: DiagnosticMessage = diag!(1130, "Setter must have exactly one formal parameter.");
    pub const SETTER_REST_PARAMETER: DiagnosticMessage = diag!(1131, "Setter function argument must not be a rest parameter.");
    pub const DUPLICATE_PROTO: DiagnosticMessage = diag!(1132, "Duplicate __proto__ fields are not allowed in object literals.");
    pub const FUNCTION_NAME_REQUIRED: DiagnosticMessage = diag!(1133, "Function statements require a function name.");
    pub const CLASS_NAME_REQUIRED: DiagnosticMessage = diag!(1134, "Class declarations require a name.");
    pub const LEXICAL_IN_SINGLE_STATEMENT: DiagnosticMessage = diag!(1135, "Lexical declaration cannot appear in a single-statement context.");
    pub const FUNCTION_IN_SINGLE_STATEMENT: DiagnosticMessage = diag!(1136, "In strict mode code, functions can only be declared at top level or inside a block.");
    pub const GENERATOR_IN_SINGLE_STATEMENT: DiagnosticMessage = diag!(1137, "Generators and async functions can only be declared at the top level or inside a block.");
    pub const ESCAPED_KEYWORD: DiagnosticMessage = diag!(1138, "Keyword must not contain escaped characters.");
    pub const INVALID_DECORATOR_POSITION: DiagnosticMessage = diag!(1139, "Decorators are not valid here.");
    pub const IMPORT_CALL_ARGUMENTS: DiagnosticMessage = diag!(1140, "Dynamic import requires one or two arguments without spread.");
    pub const UNEXPECTED_PRIVATE_NAME: DiagnosticMessage = diag!(1141, "Unexpected private name.");
    pub const MAX_NESTING_DEPTH: DiagnosticMessage = diag!(1142, "Maximum nesting depth exceeded.");
    pub const INVALID_META_PROPERTY: DiagnosticMessage = diag!(1143, "'{0}.{1}' is not a valid meta-property.");
    pub const STRING_EXPORT_WITHOUT_FROM: DiagnosticMessage = diag!(1144, "A string literal cannot be used as an exported binding without 'from'.");
    pub const DUPLICATE_IMPORT_ATTRIBUTE: DiagnosticMessage = diag!(1145, "Import attribute has duplicate key '{0}'.");
    pub const INVALID_MODULE_NAME: DiagnosticMessage = diag!(1146, "String literal must not contain lone surrogates.");

    // ========================================================================
    // Early errors (1200-1299)
    // ========================================================================
    pub const UNEXPECTED_RESERVED_WORD: DiagnosticMessage = diag!(1200, "Unexpected reserved word '{0}'.");
    pub const UNEXPECTED_STRICT_RESERVED_WORD: DiagnosticMessage = diag!(1201, "Unexpected strict mode reserved word '{0}'.");
    pub const STRICT_EVAL_ARGUMENTS: DiagnosticMessage = diag!(1202, "Unexpected eval or arguments in strict mode.");
    pub const STRICT_WITH: DiagnosticMessage = diag!(1203, "Strict mode code may not include a with statement.");
    pub const STRICT_OCTAL_LITERAL: DiagnosticMessage = diag!(1204, "Octal literals are not allowed in strict mode.");
    pub const STRICT_OCTAL_ESCAPE: DiagnosticMessage = diag!(1205, "Octal escape sequences are not allowed in strict mode.");
    pub const STRICT_DELETE: DiagnosticMessage = diag!(1206, "Delete of an unqualified identifier in strict mode.");
    pub const ILLEGAL_USE_STRICT: DiagnosticMessage = diag!(1207, "Illegal 'use strict' directive in function with non-simple parameter list.");
    pub const DUPLICATE_PARAMETER: DiagnosticMessage = diag!(1208, "Duplicate parameter name not allowed in this context.");
    pub const DUPLICATE_BINDING: DiagnosticMessage = diag!(1209, "Identifier '{0}' has already been declared.");
    pub const LET_IN_LEXICAL_BINDING: DiagnosticMessage = diag!(1210, "let is disallowed as a lexically bound name.");
    pub const YIELD_IN_PARAMETER: DiagnosticMessage = diag!(1211, "Yield expression not allowed in formal parameter.");
    pub const AWAIT_IN_PARAMETER: DiagnosticMessage = diag!(1212, "Await expression not allowed in formal parameter.");
    pub const AWAIT_AS_IDENTIFIER: DiagnosticMessage = diag!(1213, "Cannot use 'await' as an identifier here.");
    pub const YIELD_AS_IDENTIFIER: DiagnosticMessage = diag!(1214, "Cannot use 'yield' as an identifier here.");
    pub const ARGUMENTS_IN_INITIALIZER: DiagnosticMessage = diag!(1215, "'arguments' is not allowed in class field initializer or static initialization block.");
    pub const ILLEGAL_RETURN: DiagnosticMessage = diag!(1216, "Illegal return statement.");
    pub const ILLEGAL_BREAK: DiagnosticMessage = diag!(1217, "Illegal break statement.");
    pub const ILLEGAL_CONTINUE: DiagnosticMessage = diag!(1218, "Illegal continue statement: no surrounding iteration statement.");
    pub const UNDEFINED_LABEL: DiagnosticMessage = diag!(1219, "Undefined label '{0}'.");
    pub const CONTINUE_TARGET_NOT_ITERATION: DiagnosticMessage = diag!(1220, "Illegal continue statement: '{0}' does not denote an iteration statement.");
    pub const DUPLICATE_LABEL: DiagnosticMessage = diag!(1221, "Label '{0}' has already been declared.");
    pub const SUPER_CALL_NOT_ALLOWED: DiagnosticMessage = diag!(1222, "'super()' is only valid in derived class constructors.");
    pub const SUPER_PROPERTY_NOT_ALLOWED: DiagnosticMessage = diag!(1223, "'super' property access is only valid inside methods.");
    pub const SUPER_UNEXPECTED: DiagnosticMessage = diag!(1224, "'super' keyword unexpected here.");
    pub const NEW_TARGET_NOT_ALLOWED: DiagnosticMessage = diag!(1225, "new.target expression is not allowed here.");
    pub const IMPORT_META_OUTSIDE_MODULE: DiagnosticMessage = diag!(1226, "Cannot use 'import.meta' outside a module.");
    pub const IMPORT_EXPORT_OUTSIDE_MODULE: DiagnosticMessage = diag!(1227, "'{0}' declarations may only appear at top level of a module.");
    pub const DUPLICATE_CONSTRUCTOR: DiagnosticMessage = diag!(1228, "A class may only have one constructor.");
    pub const INVALID_CONSTRUCTOR: DiagnosticMessage = diag!(1229, "Class constructor may not be a {0}.");
    pub const CONSTRUCTOR_FIELD: DiagnosticMessage = diag!(1230, "Classes may not have a field named 'constructor'.");
    pub const STATIC_PROTOTYPE: DiagnosticMessage = diag!(1231, "Classes may not have a static property named 'prototype'.");
    pub const PRIVATE_CONSTRUCTOR: DiagnosticMessage = diag!(1232, "Classes may not have a private element named '#constructor'.");
    pub const DUPLICATE_PRIVATE_NAME: DiagnosticMessage = diag!(1233, "Private name '#{0}' has already been declared.");
    pub const UNDECLARED_PRIVATE_NAME: DiagnosticMessage = diag!(1234, "Private field '#{0}' must be declared in an enclosing class.");
    pub const DELETE_PRIVATE_FIELD: DiagnosticMessage = diag!(1235, "Private fields cannot be deleted.");
    pub const DUPLICATE_EXPORT: DiagnosticMessage = diag!(1236, "Duplicate export of '{0}'.");
    pub const UNDECLARED_EXPORT: DiagnosticMessage = diag!(1237, "Export '{0}' is not defined in module.");
    pub const AWAIT_IN_STATIC_BLOCK: DiagnosticMessage = diag!(1238, "Cannot use 'await' in class static initialization block.");
    pub const DUPLICATE_PATTERN_KEY: DiagnosticMessage = diag!(1239, "Duplicate property name '{0}' in destructuring pattern.");

    // ========================================================================
    // Embedded markup (1300-1399)
    // ========================================================================
    pub const JSX_CLOSING_TAG_MISMATCH: DiagnosticMessage = diag!(1300, "Expected corresponding closing tag for '{0}'.");
    pub const JSX_EMPTY_ATTRIBUTE_EXPRESSION: DiagnosticMessage = diag!(1301, "Attributes must only be assigned a non-empty expression.");
    pub const JSX_UNTERMINATED: DiagnosticMessage = diag!(1302, "Unterminated markup contents.");
    pub const JSX_ADJACENT_ELEMENTS: DiagnosticMessage = diag!(1303, "Adjacent markup elements must be wrapped in an enclosing tag.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("Identifier '{0}' has already been declared.", &["a"]);
        assert_eq!(msg, "Identifier 'a' has already been declared.");
    }

    #[test]
    fn test_format_message_multiple_args() {
        let msg = format_message(messages::INVALID_META_PROPERTY.message, &["new", "tar"]);
        assert_eq!(msg, "'new.tar' is not a valid meta-property.");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(&messages::UNEXPECTED_TOKEN, &[")"], 7, Position::new(2, 3));
        assert_eq!(err.to_string(), "Unexpected token ')'. (2:3)");
        assert_eq!(err.code, 1100);
        assert!(err.is(&messages::UNEXPECTED_TOKEN));
        assert_eq!(err.position(), Position::new(2, 3));
    }

    #[test]
    fn test_codes_are_unique() {
        let all = [
            messages::INVALID_CHARACTER,
            messages::UNTERMINATED_STRING_LITERAL,
            messages::UNEXPECTED_TOKEN,
            messages::EXPECTED_TOKEN,
            messages::DUPLICATE_PARAMETER,
            messages::DUPLICATE_BINDING,
            messages::STRICT_WITH,
            messages::JSX_CLOSING_TAG_MISMATCH,
            messages::MAX_NESTING_DEPTH,
        ];
        let mut codes: Vec<u32> = all.iter().map(|m| m.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }
}

//! Import and export declarations.

use rustc_hash::FxHashSet;
use sable_ast::*;
use sable_binder::BindingKind;
use sable_diagnostics::{messages, ParseResult};

use crate::context::Context;
use crate::parser::Parser;
use crate::patterns::visit_bound_names;

impl<'a, 'o> Parser<'a, 'o> {
    // ========================================================================
    // Imports
    // ========================================================================

    pub(crate) fn parse_import_declaration(&mut self, ctx: Context) -> ParseResult<Statement<'a>> {
        let start = self.start();
        self.expect(Token::ImportKeyword)?;

        // import "source";
        if self.token() == Token::StringLiteral {
            let source = self.parse_module_source(ctx)?;
            let attributes = self.parse_import_attributes(ctx)?;
            self.consume_semicolon()?;
            return Ok(Statement::Import(self.alloc(ImportDeclaration {
                span: self.finish(start),
                specifiers: &[],
                source,
                attributes,
            })));
        }

        let mut specifiers = self.vec();
        if self.token().is_identifier() {
            let local_start = self.start();
            let local = self.parse_import_binding(ctx)?;
            specifiers.push(ImportDeclarationSpecifier::Default(self.alloc(ImportDefaultSpecifier {
                span: self.finish(local_start),
                local,
            })));
            if !self.eat(Token::Comma)? {
                return self.finish_import(ctx, start, specifiers.into_bump_slice());
            }
        }

        match self.token() {
            Token::Multiply => {
                let ns_start = self.start();
                self.next_token()?;
                if !self.at_keyword(Token::AsKeyword) {
                    return Err(self.unexpected());
                }
                self.next_token()?;
                let local = self.parse_import_binding(ctx)?;
                specifiers.push(ImportDeclarationSpecifier::Namespace(self.alloc(ImportNamespaceSpecifier {
                    span: self.finish(ns_start),
                    local,
                })));
            }
            Token::LeftBrace => {
                self.next_token()?;
                while self.token() != Token::RightBrace {
                    specifiers.push(self.parse_import_specifier(ctx)?);
                    if self.token() != Token::RightBrace {
                        self.expect(Token::Comma)?;
                    }
                }
                self.next_token()?;
            }
            _ => return Err(self.unexpected()),
        }
        self.finish_import(ctx, start, specifiers.into_bump_slice())
    }

    fn finish_import(
        &mut self,
        ctx: Context,
        start: u32,
        specifiers: &'a [ImportDeclarationSpecifier<'a>],
    ) -> ParseResult<Statement<'a>> {
        if !self.at_keyword(Token::FromKeyword) {
            return Err(self.error(&messages::EXPECTED_TOKEN, &["from"]));
        }
        self.next_token()?;
        let source = self.parse_module_source(ctx)?;
        let attributes = self.parse_import_attributes(ctx)?;
        self.consume_semicolon()?;
        Ok(Statement::Import(self.alloc(ImportDeclaration {
            span: self.finish(start),
            specifiers,
            source,
            attributes,
        })))
    }

    /// `name`, `name as local`, `default as local` or `"str" as local`.
    fn parse_import_specifier(&mut self, ctx: Context) -> ParseResult<ImportDeclarationSpecifier<'a>> {
        let start = self.start();
        let token = self.token();
        let imported_is_binding = token.is_identifier();
        let imported_start = self.start();
        let imported = self.parse_module_export_name(ctx)?;

        let local = if self.at_keyword(Token::AsKeyword) {
            self.next_token()?;
            self.parse_import_binding(ctx)?
        } else {
            match imported {
                ModuleExportName::Identifier(id) if imported_is_binding => {
                    self.check_binding_identifier(id.name, id.span.start, ctx, BindingKind::Import)?;
                    self.declare(id.name, BindingKind::Import, id.span.start, ctx)?;
                    id
                }
                ModuleExportName::Identifier(id) => {
                    return Err(self.error_at(&messages::UNEXPECTED_RESERVED_WORD, &[id.name], imported_start));
                }
                ModuleExportName::Literal(_) => {
                    return Err(self.error(&messages::EXPECTED_TOKEN, &["as"]));
                }
            }
        };
        Ok(ImportDeclarationSpecifier::Specifier(self.alloc(ImportSpecifier {
            span: self.finish(start),
            imported,
            local,
        })))
    }

    fn parse_import_binding(&mut self, ctx: Context) -> ParseResult<&'a Identifier<'a>> {
        if !self.token().is_identifier() {
            return Err(if self.token().is_reserved_word() {
                self.error(&messages::UNEXPECTED_RESERVED_WORD, &[self.scanner.token_raw()])
            } else {
                self.error(&messages::IDENTIFIER_EXPECTED, &[])
            });
        }
        self.parse_binding_identifier(ctx, BindingKind::Import)
    }

    fn parse_module_source(&mut self, ctx: Context) -> ParseResult<&'a Literal<'a>> {
        if self.token() != Token::StringLiteral {
            return Err(self.error(&messages::EXPECTED_TOKEN, &["string literal"]));
        }
        self.parse_literal_node(ctx)
    }

    /// `with { key: "value", ... }` after a module specifier.
    fn parse_import_attributes(&mut self, ctx: Context) -> ParseResult<&'a [ImportAttribute<'a>]> {
        if !self.at_keyword(Token::WithKeyword) {
            return Ok(&[]);
        }
        self.next_token()?;
        self.expect(Token::LeftBrace)?;
        let mut attributes = self.vec();
        let mut keys: FxHashSet<&'a str> = FxHashSet::default();
        while self.token() != Token::RightBrace {
            let start = self.start();
            let key = if self.token() == Token::StringLiteral {
                ModuleExportName::Literal(self.parse_literal_node(ctx)?)
            } else if self.token().is_word() {
                ModuleExportName::Identifier(self.identifier_node()?)
            } else {
                return Err(self.unexpected());
            };
            if !keys.insert(key.name()) {
                return Err(self.error_at(&messages::DUPLICATE_IMPORT_ATTRIBUTE, &[key.name()], start));
            }
            self.expect(Token::Colon)?;
            if self.token() != Token::StringLiteral {
                return Err(self.error(&messages::EXPECTED_TOKEN, &["string literal"]));
            }
            let value = self.parse_literal_node(ctx)?;
            attributes.push(ImportAttribute {
                span: self.finish(start),
                key,
                value,
            });
            if self.token() != Token::RightBrace {
                self.expect(Token::Comma)?;
            }
        }
        self.next_token()?;
        Ok(attributes.into_bump_slice())
    }

    /// An identifier name or a string literal naming an export.
    fn parse_module_export_name(&mut self, ctx: Context) -> ParseResult<ModuleExportName<'a>> {
        if self.token() == Token::StringLiteral {
            if has_lone_surrogate(self.scanner.token_raw()) {
                return Err(self.error(&messages::INVALID_MODULE_NAME, &[]));
            }
            return Ok(ModuleExportName::Literal(self.parse_literal_node(ctx)?));
        }
        if !self.token().is_word() {
            return Err(self.unexpected());
        }
        Ok(ModuleExportName::Identifier(self.identifier_node()?))
    }

    // ========================================================================
    // Exports
    // ========================================================================

    /// Any `export` form, positioned on `export`. `decorators` were read
    /// before the keyword.
    pub(crate) fn parse_export(
        &mut self,
        ctx: Context,
        start: u32,
        decorators: &'a [Decorator<'a>],
    ) -> ParseResult<Statement<'a>> {
        self.expect(Token::ExportKeyword)?;
        let decorators = if self.token() == Token::At && self.options.next {
            if !decorators.is_empty() {
                return Err(self.error(&messages::INVALID_DECORATOR_POSITION, &[]));
            }
            self.parse_decorators(ctx)?
        } else {
            decorators
        };
        if !decorators.is_empty() && !matches!(self.token(), Token::ClassKeyword | Token::DefaultKeyword) {
            return Err(self.error(&messages::INVALID_DECORATOR_POSITION, &[]));
        }

        match self.token() {
            Token::Multiply => self.parse_export_all(ctx, start),
            Token::DefaultKeyword => self.parse_export_default(ctx, start, decorators),
            Token::LeftBrace => self.parse_export_named(ctx, start),
            _ => self.parse_export_declaration(ctx, start, decorators),
        }
    }

    /// `export * from "m"` and `export * as name from "m"`.
    fn parse_export_all(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let exported = if self.at_keyword(Token::AsKeyword) {
            self.next_token()?;
            let name_start = self.start();
            let name = self.parse_module_export_name(ctx)?;
            self.add_export(name.name(), name_start)?;
            Some(name)
        } else {
            None
        };
        if !self.at_keyword(Token::FromKeyword) {
            return Err(self.error(&messages::EXPECTED_TOKEN, &["from"]));
        }
        self.next_token()?;
        let source = self.parse_module_source(ctx)?;
        let attributes = self.parse_import_attributes(ctx)?;
        self.consume_semicolon()?;
        Ok(Statement::ExportAll(self.alloc(ExportAllDeclaration {
            span: self.finish(start),
            exported,
            source,
            attributes,
        })))
    }

    fn parse_export_default(
        &mut self,
        ctx: Context,
        start: u32,
        decorators: &'a [Decorator<'a>],
    ) -> ParseResult<Statement<'a>> {
        let default_start = self.start();
        self.next_token()?;
        let decorators = if self.token() == Token::At && self.options.next {
            if !decorators.is_empty() {
                return Err(self.error(&messages::INVALID_DECORATOR_POSITION, &[]));
            }
            self.parse_decorators(ctx)?
        } else {
            decorators
        };
        self.add_export("default", default_start)?;

        let declaration_start = self.start();
        let declaration = match self.token() {
            Token::ClassKeyword => ExportDefaultKind::Class(self.parse_class(
                ctx,
                declaration_start,
                ClassType::ClassDeclaration,
                decorators,
                true,
            )?),
            _ if !decorators.is_empty() => return Err(self.error(&messages::INVALID_DECORATOR_POSITION, &[])),
            Token::FunctionKeyword if !self.escaped() => {
                ExportDefaultKind::Function(self.parse_function_declaration(ctx, false, false)?)
            }
            Token::AsyncKeyword if self.at_async_function() => {
                ExportDefaultKind::Function(self.parse_function_declaration(ctx, true, false)?)
            }
            _ => {
                let expr = self.parse_assignment_expression(ctx)?;
                self.consume_semicolon()?;
                ExportDefaultKind::Expression(expr)
            }
        };
        Ok(Statement::ExportDefault(self.alloc(ExportDefaultDeclaration {
            span: self.finish(start),
            declaration,
        })))
    }

    /// `export { a, b as c } [from "m"]`.
    fn parse_export_named(&mut self, ctx: Context, start: u32) -> ParseResult<Statement<'a>> {
        self.next_token()?;
        let mut specifiers = self.vec();
        // Local names that would be invalid references, reported only when
        // there is no `from` clause.
        let mut invalid_local: Option<(u32, bool)> = None;
        let mut seen = Vec::new();

        while self.token() != Token::RightBrace {
            let spec_start = self.start();
            let token = self.token();
            if invalid_local.is_none() {
                if token == Token::StringLiteral {
                    invalid_local = Some((spec_start, true));
                } else if token.is_reserved_word() || (token.is_strict_reserved_word() && ctx.is_strict()) {
                    invalid_local = Some((spec_start, false));
                } else if self.at_keyword(Token::AwaitKeyword) && ctx.await_is_reserved() {
                    invalid_local = Some((spec_start, false));
                }
            }
            let local = self.parse_module_export_name(ctx)?;
            let exported = if self.at_keyword(Token::AsKeyword) {
                self.next_token()?;
                self.parse_module_export_name(ctx)?
            } else {
                local
            };
            let exported_start = exported.start();
            seen.push((local, exported.name(), exported_start));
            specifiers.push(ExportSpecifier {
                span: self.finish(spec_start),
                local,
                exported,
            });
            if self.token() != Token::RightBrace {
                self.expect(Token::Comma)?;
            }
        }
        self.next_token()?;

        let (source, attributes) = if self.at_keyword(Token::FromKeyword) {
            self.next_token()?;
            let source = self.parse_module_source(ctx)?;
            (Some(source), self.parse_import_attributes(ctx)?)
        } else {
            (None, &[][..])
        };

        if source.is_none() {
            if let Some((offset, is_string)) = invalid_local {
                return Err(if is_string {
                    self.error_at(&messages::STRING_EXPORT_WITHOUT_FROM, &[], offset)
                } else {
                    self.error_at(&messages::UNEXPECTED_RESERVED_WORD, &[self.source_word_at(offset)], offset)
                });
            }
        }
        for (local, exported, offset) in seen {
            self.add_export(exported, offset)?;
            if source.is_none() {
                self.module_record.add_local_export(local.name(), local.start());
            }
        }
        self.consume_semicolon()?;
        Ok(Statement::ExportNamed(self.alloc(ExportNamedDeclaration {
            span: self.finish(start),
            declaration: None,
            specifiers: specifiers.into_bump_slice(),
            source,
            attributes,
        })))
    }

    /// `export var|let|const|function|async function|class ...`.
    fn parse_export_declaration(
        &mut self,
        ctx: Context,
        start: u32,
        decorators: &'a [Decorator<'a>],
    ) -> ParseResult<Statement<'a>> {
        let declaration_start = self.start();
        let declaration = match self.token() {
            Token::VarKeyword | Token::ConstKeyword => self.parse_statement_list_item(ctx)?,
            Token::LetKeyword if !self.escaped() => self.parse_statement_list_item(ctx)?,
            Token::FunctionKeyword => self.parse_statement_list_item(ctx)?,
            Token::AsyncKeyword if self.at_async_function() => self.parse_statement_list_item(ctx)?,
            Token::ClassKeyword => Statement::Class(self.parse_class(
                ctx,
                declaration_start,
                ClassType::ClassDeclaration,
                decorators,
                false,
            )?),
            _ => return Err(self.unexpected()),
        };

        let mut names = Vec::new();
        match declaration {
            Statement::Variable(variable) => {
                for declarator in variable.declarations {
                    visit_bound_names(declarator.id, &mut |id: &'a Identifier<'a>| {
                        names.push((id.name, id.span.start));
                        Ok(())
                    })?;
                }
            }
            Statement::Function(function) => names.extend(function.id.map(|id| (id.name, id.span.start))),
            Statement::Class(class) => names.extend(class.id.map(|id| (id.name, id.span.start))),
            _ => return Err(self.error_at(&messages::UNEXPECTED_TOKEN, &["let"], declaration_start)),
        }
        for (name, offset) in names {
            self.add_export(name, offset)?;
        }

        Ok(Statement::ExportNamed(self.alloc(ExportNamedDeclaration {
            span: self.finish(start),
            declaration: Some(declaration),
            specifiers: &[],
            source: None,
            attributes: &[],
        })))
    }

    fn add_export(&mut self, name: &str, offset: u32) -> ParseResult<()> {
        match self.module_record.add_export(name, offset) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.scope_error(err)),
        }
    }

    /// The identifier-like word starting at `offset`.
    fn source_word_at(&self, offset: u32) -> &'a str {
        let rest = &self.scanner.source()[offset as usize..];
        let len = rest
            .find(|ch: char| !(ch.is_alphanumeric() || ch == '_' || ch == '$'))
            .unwrap_or(rest.len());
        &rest[..len]
    }
}

/// Whether the raw text of a string literal has a `\u` escape for a
/// surrogate half that is not part of a pair.
fn has_lone_surrogate(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut pending_high = false;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            if pending_high {
                return true;
            }
            i += 1;
            continue;
        }
        if bytes.get(i + 1) != Some(&b'u') {
            if pending_high {
                return true;
            }
            i += 2;
            continue;
        }
        let (code, next) = match decode_unicode_escape(bytes, i + 2) {
            Some(decoded) => decoded,
            None => return false,
        };
        let is_high = (0xD800..0xDC00).contains(&code);
        let is_low = (0xDC00..0xE000).contains(&code);
        if pending_high {
            if !is_low {
                return true;
            }
            pending_high = false;
        } else if is_low {
            return true;
        } else {
            pending_high = is_high;
        }
        i = next;
    }
    pending_high
}

fn decode_unicode_escape(bytes: &[u8], at: usize) -> Option<(u32, usize)> {
    let hex = |b: u8| (b as char).to_digit(16);
    if bytes.get(at) == Some(&b'{') {
        let mut value = 0u32;
        let mut i = at + 1;
        while let Some(d) = bytes.get(i).and_then(|b| hex(*b)) {
            value = value.saturating_mul(16).saturating_add(d);
            i += 1;
        }
        return (bytes.get(i) == Some(&b'}')).then_some((value, i + 1));
    }
    let digits = bytes.get(at..at + 4)?;
    let mut value = 0u32;
    for b in digits {
        value = value * 16 + hex(*b)?;
    }
    Some((value, at + 4))
}

#[cfg(test)]
mod tests {
    use super::has_lone_surrogate;

    #[test]
    fn test_lone_surrogates() {
        assert!(has_lone_surrogate(r#""\uD83D""#));
        assert!(has_lone_surrogate(r#""\uDE00x""#));
        assert!(has_lone_surrogate(r#""\u{D800}""#));
        assert!(!has_lone_surrogate(r#""\uD83D\uDE00""#));
        assert!(!has_lone_surrogate(r#""plain""#));
        assert!(!has_lone_surrogate(r#""\u0041\n""#));
    }
}

//! Lexical scopes and binding conflict detection.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use sable_core::intern::{InternedString, StringInterner};
use sable_diagnostics::{messages, DiagnosticMessage};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScopeKind: u16 {
        const TOP_LEVEL = 1 << 0;
        const FUNCTION_PARAMS = 1 << 1;
        const FUNCTION_BODY = 1 << 2;
        const ARROW_PARAMS = 1 << 3;
        const BLOCK = 1 << 4;
        const CATCH_PARAM = 1 << 5;
        const CATCH_BODY = 1 << 6;
        const FOR_HEAD = 1 << 7;
        const SWITCH = 1 << 8;
        const STATIC_BLOCK = 1 << 9;
        const CLASS = 1 << 10;

        /// Scopes that stop the upward walk of a `var` declaration.
        const VAR_BOUNDARY = Self::TOP_LEVEL.bits()
            | Self::FUNCTION_BODY.bits()
            | Self::STATIC_BLOCK.bits();
        const PARAMS = Self::FUNCTION_PARAMS.bits() | Self::ARROW_PARAMS.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Var,
    Let,
    Const,
    Class,
    /// Function declaration hoisted like `var`.
    FunctionVar,
    /// Block-scoped function declaration.
    FunctionLexical,
    Parameter,
    /// `catch (e)`.
    CatchSimple,
    /// `catch ({ e })`.
    CatchPattern,
    Import,
}

impl BindingKind {
    pub fn is_lexical(self) -> bool {
        matches!(
            self,
            BindingKind::Let
                | BindingKind::Const
                | BindingKind::Class
                | BindingKind::FunctionLexical
                | BindingKind::Import
        )
    }

    pub fn is_var_like(self) -> bool {
        matches!(self, BindingKind::Var | BindingKind::FunctionVar)
    }
}

/// A binding conflict, reported at the offset of the later declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeError {
    pub message: DiagnosticMessage,
    pub name: String,
    pub offset: u32,
}

impl ScopeError {
    pub fn new(message: &DiagnosticMessage, name: &str, offset: u32) -> Self {
        Self {
            message: *message,
            name: name.to_string(),
            offset,
        }
    }
}

/// An error recorded on a scope that only applies if the owning construct
/// turns out to require it.
pub type DeferredError = ScopeError;

pub type ScopeId = usize;

#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub bindings: FxHashMap<InternedString, BindingKind>,
    pub deferred: Option<DeferredError>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            parent,
            bindings: FxHashMap::default(),
            deferred: None,
        }
    }
}

/// The chain of open scopes. Closed scopes are dropped; only the chain from
/// the current scope to the top level is kept.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
    interner: StringInterner,
}

impl ScopeStack {
    pub fn new(interner: StringInterner) -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::TOP_LEVEL, None)],
            interner,
        }
    }

    #[inline]
    pub fn current(&self) -> ScopeId {
        self.scopes.len() - 1
    }

    pub fn current_kind(&self) -> ScopeKind {
        self.scopes[self.current()].kind
    }

    pub fn push(&mut self, kind: ScopeKind) -> ScopeId {
        let parent = self.current();
        self.scopes.push(Scope::new(kind, Some(parent)));
        self.current()
    }

    /// Close the current scope. The top-level scope is never popped.
    pub fn pop(&mut self) -> Option<Scope> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Take the deferred error of `id`, if any.
    pub fn take_deferred(&mut self, id: ScopeId) -> Option<DeferredError> {
        self.scopes.get_mut(id).and_then(|scope| scope.deferred.take())
    }

    pub fn defer(&mut self, id: ScopeId, error: DeferredError) {
        let scope = &mut self.scopes[id];
        if scope.deferred.is_none() {
            scope.deferred = Some(error);
        }
    }

    /// Whether `name` is declared in the top-level scope.
    pub fn is_declared_top_level(&self, name: &str) -> bool {
        self.interner
            .get(name)
            .map_or(false, |key| self.scopes[0].bindings.contains_key(&key))
    }

    /// Declare `name` in the current scope.
    ///
    /// `annex_b` allows duplicate block-level function declarations, as
    /// sloppy web-compatible code may contain.
    pub fn declare(&mut self, name: &str, kind: BindingKind, offset: u32, annex_b: bool) -> Result<(), ScopeError> {
        let key = self.interner.intern(name);
        match kind {
            BindingKind::Var | BindingKind::FunctionVar => self.declare_var(key, name, kind, offset),
            BindingKind::Parameter => {
                let current = self.current();
                let scope = &mut self.scopes[current];
                if scope.bindings.insert(key, kind).is_some() {
                    self.defer(current, ScopeError::new(&messages::DUPLICATE_PARAMETER, name, offset));
                }
                Ok(())
            }
            _ => self.declare_lexical(key, name, kind, offset, annex_b),
        }
    }

    fn declare_lexical(
        &mut self,
        key: InternedString,
        name: &str,
        kind: BindingKind,
        offset: u32,
        annex_b: bool,
    ) -> Result<(), ScopeError> {
        let current = self.current();
        let duplicate = || ScopeError::new(&messages::DUPLICATE_BINDING, name, offset);
        let scope = &self.scopes[current];
        if let Some(&existing) = scope.bindings.get(&key) {
            let sloppy_functions = annex_b
                && existing == BindingKind::FunctionLexical
                && kind == BindingKind::FunctionLexical;
            if !sloppy_functions {
                return Err(duplicate());
            }
        }

        // A body-level lexical binding may not shadow a parameter or a
        // catch parameter of the same name.
        if scope.kind.intersects(ScopeKind::FUNCTION_BODY | ScopeKind::CATCH_BODY) {
            if let Some(parent) = scope.parent {
                let parent_scope = &self.scopes[parent];
                if parent_scope
                    .kind
                    .intersects(ScopeKind::PARAMS | ScopeKind::CATCH_PARAM)
                    && parent_scope.bindings.contains_key(&key)
                {
                    return Err(duplicate());
                }
            }
        }

        self.scopes[current].bindings.insert(key, kind);
        Ok(())
    }

    fn declare_var(&mut self, key: InternedString, name: &str, kind: BindingKind, offset: u32) -> Result<(), ScopeError> {
        let current = self.current();
        let mut id = current;
        loop {
            let scope = &mut self.scopes[id];
            match scope.bindings.get(&key).copied() {
                Some(existing) if existing.is_lexical() => {
                    return Err(ScopeError::new(&messages::DUPLICATE_BINDING, name, offset));
                }
                Some(BindingKind::CatchPattern) => {
                    return Err(ScopeError::new(&messages::DUPLICATE_BINDING, name, offset));
                }
                Some(_) => {}
                None => {
                    let recorded = if id == current { kind } else { BindingKind::Var };
                    scope.bindings.insert(key, recorded);
                }
            }
            if scope.kind.intersects(ScopeKind::VAR_BOUNDARY) {
                return Ok(());
            }
            match scope.parent {
                Some(parent) => id = parent,
                None => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stack() -> ScopeStack {
        ScopeStack::new(StringInterner::new())
    }

    #[test]
    fn test_let_conflicts_with_var_in_same_scope() {
        let mut scopes = stack();
        scopes.declare("x", BindingKind::Var, 0, false).unwrap();
        let err = scopes.declare("x", BindingKind::Let, 10, false).unwrap_err();
        assert_eq!(err.message, messages::DUPLICATE_BINDING);
        assert_eq!(err.name, "x");
        assert_eq!(err.offset, 10);
    }

    #[test]
    fn test_var_hoists_through_blocks() {
        let mut scopes = stack();
        scopes.declare("x", BindingKind::Let, 0, false).unwrap();
        scopes.push(ScopeKind::BLOCK);
        assert!(scopes.declare("x", BindingKind::Var, 5, false).is_err());
    }

    #[test]
    fn test_var_recorded_in_enclosing_block() {
        let mut scopes = stack();
        scopes.push(ScopeKind::BLOCK);
        scopes.push(ScopeKind::BLOCK);
        scopes.declare("x", BindingKind::Var, 0, false).unwrap();
        scopes.pop();
        assert!(scopes.declare("x", BindingKind::Let, 5, false).is_err());
    }

    #[test]
    fn test_var_stops_at_function_body() {
        let mut scopes = stack();
        scopes.declare("x", BindingKind::Let, 0, false).unwrap();
        scopes.push(ScopeKind::FUNCTION_PARAMS);
        scopes.push(ScopeKind::FUNCTION_BODY);
        assert!(scopes.declare("x", BindingKind::Var, 5, false).is_ok());
    }

    #[test]
    fn test_duplicate_parameter_is_deferred() {
        let mut scopes = stack();
        let params = scopes.push(ScopeKind::FUNCTION_PARAMS);
        scopes.declare("a", BindingKind::Parameter, 11, false).unwrap();
        scopes.declare("a", BindingKind::Parameter, 13, false).unwrap();
        let deferred = scopes.take_deferred(params).unwrap();
        assert_eq!(deferred.message, messages::DUPLICATE_PARAMETER);
        assert_eq!(deferred.offset, 13);
        assert!(scopes.take_deferred(params).is_none());
    }

    #[test]
    fn test_body_let_shadows_parameter() {
        let mut scopes = stack();
        scopes.push(ScopeKind::FUNCTION_PARAMS);
        scopes.declare("a", BindingKind::Parameter, 0, false).unwrap();
        scopes.push(ScopeKind::FUNCTION_BODY);
        assert!(scopes.declare("a", BindingKind::Var, 5, false).is_ok());
        assert!(scopes.declare("b", BindingKind::Let, 5, false).is_ok());
        assert!(scopes.declare("a", BindingKind::Let, 8, false).is_err());
    }

    #[test]
    fn test_catch_parameter_rules() {
        let mut scopes = stack();
        scopes.push(ScopeKind::CATCH_PARAM);
        scopes.declare("e", BindingKind::CatchSimple, 0, false).unwrap();
        scopes.push(ScopeKind::CATCH_BODY);
        assert!(scopes.declare("e", BindingKind::Var, 5, false).is_ok());
        assert!(scopes.declare("e", BindingKind::Let, 8, false).is_err());
    }

    #[test]
    fn test_var_conflicts_with_catch_pattern() {
        let mut scopes = stack();
        scopes.push(ScopeKind::CATCH_PARAM);
        scopes.declare("e", BindingKind::CatchPattern, 0, false).unwrap();
        scopes.push(ScopeKind::CATCH_BODY);
        assert!(scopes.declare("e", BindingKind::Var, 5, false).is_err());
    }

    #[test]
    fn test_sloppy_block_functions() {
        let mut scopes = stack();
        scopes.push(ScopeKind::BLOCK);
        scopes.declare("f", BindingKind::FunctionLexical, 0, true).unwrap();
        assert!(scopes.declare("f", BindingKind::FunctionLexical, 5, true).is_ok());
        assert!(scopes.declare("f", BindingKind::FunctionLexical, 9, false).is_err());
    }

    #[test]
    fn test_top_level_lookup() {
        let mut scopes = stack();
        scopes.declare("a", BindingKind::Const, 0, false).unwrap();
        scopes.push(ScopeKind::BLOCK);
        scopes.declare("b", BindingKind::Let, 3, false).unwrap();
        assert!(scopes.is_declared_top_level("a"));
        assert!(!scopes.is_declared_top_level("b"));
        assert!(scopes.declare("b", BindingKind::Var, 9, false).is_err());
    }
}

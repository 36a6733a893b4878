//! Export bookkeeping for module goal sources.

use rustc_hash::FxHashSet;
use sable_diagnostics::messages;

use crate::scope::{ScopeError, ScopeStack};

#[derive(Debug, Default)]
pub struct ModuleRecord {
    exported: FxHashSet<String>,
    /// Local names referenced by `export { name }` without `from`.
    local_exports: Vec<(String, u32)>,
}

impl ModuleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an exported name, which must be unique in the module.
    pub fn add_export(&mut self, name: &str, offset: u32) -> Result<(), ScopeError> {
        if self.exported.insert(name.to_string()) {
            Ok(())
        } else {
            Err(ScopeError::new(&messages::DUPLICATE_EXPORT, name, offset))
        }
    }

    pub fn add_local_export(&mut self, name: &str, offset: u32) {
        self.local_exports.push((name.to_string(), offset));
    }

    pub fn has_export(&self, name: &str) -> bool {
        self.exported.contains(name)
    }

    /// Check that every local export names a top-level binding.
    pub fn finish(&self, scopes: &ScopeStack) -> Result<(), ScopeError> {
        for (name, offset) in &self.local_exports {
            if !scopes.is_declared_top_level(name) {
                return Err(ScopeError::new(&messages::UNDECLARED_EXPORT, name, *offset));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::BindingKind;
    use sable_core::intern::StringInterner;

    #[test]
    fn test_duplicate_export() {
        let mut record = ModuleRecord::new();
        record.add_export("default", 0).unwrap();
        let err = record.add_export("default", 20).unwrap_err();
        assert_eq!(err.message, messages::DUPLICATE_EXPORT);
        assert!(record.has_export("default"));
    }

    #[test]
    fn test_local_exports_resolve_at_finish() {
        let mut scopes = ScopeStack::new(StringInterner::new());
        let mut record = ModuleRecord::new();
        record.add_local_export("later", 9);
        scopes.declare("later", BindingKind::Let, 30, false).unwrap();
        assert!(record.finish(&scopes).is_ok());

        record.add_local_export("missing", 40);
        let err = record.finish(&scopes).unwrap_err();
        assert_eq!(err.name, "missing");
    }
}

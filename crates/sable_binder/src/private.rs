//! Private names of class bodies.

use rustc_hash::FxHashMap;
use sable_diagnostics::messages;

use crate::scope::ScopeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateNameKind {
    Field,
    Method,
    Getter,
    Setter,
}

#[derive(Debug, Clone, Copy)]
struct Declared {
    kind: PrivateNameKind,
    is_static: bool,
    /// A getter and setter pair shares one name.
    paired: bool,
}

#[derive(Debug, Default)]
struct ClassNames {
    declared: FxHashMap<String, Declared>,
    unresolved: Vec<(String, u32)>,
}

/// One frame per enclosing class body. References are resolved when the
/// class closes, so a method may use a field declared below it.
#[derive(Debug, Default)]
pub struct PrivateNameTable {
    classes: Vec<ClassNames>,
}

impl PrivateNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_class(&self) -> bool {
        !self.classes.is_empty()
    }

    pub fn enter_class(&mut self) {
        self.classes.push(ClassNames::default());
    }

    pub fn declare(&mut self, name: &str, kind: PrivateNameKind, is_static: bool, offset: u32) -> Result<(), ScopeError> {
        if name == "constructor" {
            return Err(ScopeError::new(&messages::PRIVATE_CONSTRUCTOR, name, offset));
        }
        let Some(class) = self.classes.last_mut() else {
            return Err(ScopeError::new(&messages::UNEXPECTED_PRIVATE_NAME, name, offset));
        };
        match class.declared.get_mut(name) {
            None => {
                class.declared.insert(
                    name.to_string(),
                    Declared {
                        kind,
                        is_static,
                        paired: false,
                    },
                );
                Ok(())
            }
            Some(existing) => {
                let accessor_pair = matches!(
                    (existing.kind, kind),
                    (PrivateNameKind::Getter, PrivateNameKind::Setter)
                        | (PrivateNameKind::Setter, PrivateNameKind::Getter)
                );
                if accessor_pair && !existing.paired && existing.is_static == is_static {
                    existing.paired = true;
                    Ok(())
                } else {
                    Err(ScopeError::new(&messages::DUPLICATE_PRIVATE_NAME, name, offset))
                }
            }
        }
    }

    pub fn reference(&mut self, name: &str, offset: u32) -> Result<(), ScopeError> {
        match self.classes.last_mut() {
            Some(class) => {
                class.unresolved.push((name.to_string(), offset));
                Ok(())
            }
            None => Err(ScopeError::new(&messages::UNDECLARED_PRIVATE_NAME, name, offset)),
        }
    }

    /// Close the innermost class body. Names it does not declare move to the
    /// enclosing class, or fail at the outermost class.
    pub fn exit_class(&mut self) -> Result<(), ScopeError> {
        let Some(class) = self.classes.pop() else {
            return Ok(());
        };
        for (name, offset) in class.unresolved {
            if class.declared.contains_key(&name) {
                continue;
            }
            self.reference(&name, offset)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_reference_resolves() {
        let mut table = PrivateNameTable::new();
        table.enter_class();
        table.reference("x", 10).unwrap();
        table.declare("x", PrivateNameKind::Field, false, 20).unwrap();
        assert!(table.exit_class().is_ok());
    }

    #[test]
    fn test_undeclared_reference() {
        let mut table = PrivateNameTable::new();
        table.enter_class();
        table.reference("y", 10).unwrap();
        let err = table.exit_class().unwrap_err();
        assert_eq!(err.message, messages::UNDECLARED_PRIVATE_NAME);
        assert_eq!(err.offset, 10);
    }

    #[test]
    fn test_nested_class_sees_outer_names() {
        let mut table = PrivateNameTable::new();
        table.enter_class();
        table.declare("x", PrivateNameKind::Method, false, 0).unwrap();
        table.enter_class();
        table.reference("x", 30).unwrap();
        table.exit_class().unwrap();
        assert!(table.exit_class().is_ok());
    }

    #[test]
    fn test_accessor_pair() {
        let mut table = PrivateNameTable::new();
        table.enter_class();
        table.declare("p", PrivateNameKind::Getter, false, 0).unwrap();
        table.declare("p", PrivateNameKind::Setter, false, 5).unwrap();
        assert!(table.declare("p", PrivateNameKind::Setter, false, 9).is_err());
        table.declare("q", PrivateNameKind::Getter, true, 12).unwrap();
        assert!(table.declare("q", PrivateNameKind::Setter, false, 15).is_err());
    }

    #[test]
    fn test_private_constructor() {
        let mut table = PrivateNameTable::new();
        table.enter_class();
        let err = table.declare("constructor", PrivateNameKind::Method, false, 0).unwrap_err();
        assert_eq!(err.message, messages::PRIVATE_CONSTRUCTOR);
    }
}

//! sable_binder: Name tables populated while parsing.
//!
//! The parser declares bindings as it goes; the tables report conflicts as
//! [`ScopeError`] values carrying the catalog entry, the offending name and
//! its offset. Errors that only apply once more of the input is known are
//! parked on the owning scope as a [`DeferredError`].

mod labels;
mod module_record;
mod private;
mod scope;

pub use labels::LabelSet;
pub use module_record::ModuleRecord;
pub use private::{PrivateNameKind, PrivateNameTable};
pub use scope::{BindingKind, DeferredError, Scope, ScopeError, ScopeId, ScopeKind, ScopeStack};

//! Type descriptors.

use crate::qualifiers::requalify_spelling;
use std::fmt;

/// The CEL-facing shape of a Go type.
///
/// `Map` and `List` wrap their children; every other kind is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    String,
    Bool,
    Duration,
    Timestamp,
    Int,
    Uint,
    Double,
    Bytes,
    Map(Box<TypeDescriptor>, Box<TypeDescriptor>),
    List(Box<TypeDescriptor>),
    /// Any value; named types and interfaces land here.
    Dynamic,
    /// A Go type shape with no CEL counterpart.
    Unknown,
}

/// A mapped Go type: its kind, the Go spelling used in casts and overload
/// ids, and whether it was declared as a variadic `...T` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    pub spelling: String,
    /// Set for `...T`; `kind` and `spelling` then describe the element `T`.
    pub variadic: bool,
}

impl TypeDescriptor {
    pub fn new(kind: TypeKind, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            variadic: false,
        }
    }

    pub fn dynamic(spelling: impl Into<String>) -> Self {
        Self::new(TypeKind::Dynamic, spelling)
    }

    pub fn unknown() -> Self {
        Self::new(TypeKind::Unknown, "Unknown")
    }

    pub fn list(elem: TypeDescriptor, spelling: impl Into<String>) -> Self {
        Self::new(TypeKind::List(Box::new(elem)), spelling)
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        let spelling = format!("map[{}]{}", key.spelling, value.spelling);
        Self::new(TypeKind::Map(Box::new(key), Box::new(value)), spelling)
    }

    /// Mark this descriptor as the element of a variadic parameter.
    pub fn into_variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// `interface{}`, which `any` is also spelled as: the value can be passed
    /// on without a cast.
    pub fn is_empty_interface(&self) -> bool {
        self.kind == TypeKind::Dynamic && self.spelling == "interface{}"
    }

    /// Rewrite package qualifiers in this spelling and every child's.
    pub fn requalify(&mut self, renames: &[(String, String)]) {
        self.spelling = requalify_spelling(&self.spelling, renames);
        match &mut self.kind {
            TypeKind::List(elem) => elem.requalify(renames),
            TypeKind::Map(key, value) => {
                key.requalify(renames);
                value.requalify(renames);
            }
            _ => {}
        }
    }

    /// Whether the descriptor or one of its children needs the `time` package.
    pub fn uses_time(&self) -> bool {
        match &self.kind {
            TypeKind::Duration | TypeKind::Timestamp => true,
            TypeKind::List(elem) => elem.uses_time(),
            TypeKind::Map(key, value) => key.uses_time() || value.uses_time(),
            _ => false,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.variadic {
            f.write_str("...")?;
        }
        f.write_str(&self.spelling)
    }
}

//! Flag metadata collected from struct fields.

use proc_macro2::Span;
use syn::{Field, Ident, Type, spanned::Spanned};

use crate::attr::Attr;

/// Flag metadata.
pub struct MetaFlag {
    /// Flag span.
    pub span: Span,

    /// Flag identifier (i.e. field identifier).
    pub id: Ident,

    /// Field type.
    pub ty: Type,

    /// Attributes.
    pub attrs: Vec<Attr>,
}

impl MetaFlag {
    /// Create a new flag metadata.
    pub fn new(field: &Field, attrs: Vec<Attr>) -> Self {
        MetaFlag {
            span: field.span(),
            id: field.ident.clone().unwrap(),
            ty: field.ty.clone(),
            attrs,
        }
    }
}

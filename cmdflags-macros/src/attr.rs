//! Attribute helpers.

use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Ident, LitStr, Token};

/// Attribute kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttrKind {
    /// Top-level cmdflags attribute.
    Cmdflags,

    /// Flag attribute on a field.
    Flag,
}

/// Attribute name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttrName {
    /// Capacity of the underlying parser.
    Cap,

    /// Long flag.
    Long,

    /// Short flag.
    Short,
}

/// Attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    /// LitStr is a literal string.
    LitStr(LitStr),

    /// Expr is an expression.
    Expr(Expr),
}

/// This defines an attribute.
#[derive(Clone, Debug)]
pub struct Attr {
    /// The attribute kind.
    pub kind: AttrKind,

    /// The attribute identifier.
    pub id: Ident,

    /// The attribute optional name.
    pub name: Option<AttrName>,

    /// The attribute optional value.
    pub value: Option<AttrValue>,
}

impl Attr {
    /// Parse all attributes given as input.
    pub fn parse_all(attrs: &[Attribute]) -> Result<Vec<Self>, syn::Error> {
        let mut parsed = Vec::new();

        for attr in attrs {
            let kind = if attr.path().is_ident("cmdflags") {
                AttrKind::Cmdflags
            } else if attr.path().is_ident("flag") {
                AttrKind::Flag
            } else {
                continue;
            };

            let args = attr.parse_args_with(Punctuated::<Self, Token![,]>::parse_terminated)?;

            // Flatten all the attributes and keep their individual kind for further processing.
            for mut arg in args {
                arg.kind = kind;
                parsed.push(arg);
            }
        }

        Ok(parsed)
    }
}

impl Parse for Attr {
    fn parse(input: ParseStream<'_>) -> Result<Self, syn::Error> {
        let id: Ident = input.parse()?;
        let name = id.to_string();

        let name = match name.as_str() {
            "cap" => Some(AttrName::Cap),
            "long" => Some(AttrName::Long),
            "short" => Some(AttrName::Short),
            _ => None,
        };

        let value = if input.peek(Token![=]) {
            // Skip the assign sign.
            let assign = input.parse::<Token![=]>()?;

            if input.peek(LitStr) {
                Some(AttrValue::LitStr(input.parse::<LitStr>()?))
            } else if let Ok(expr) = input.parse::<Expr>() {
                Some(AttrValue::Expr(expr))
            } else {
                return Err(syn::Error::new(
                    assign.span,
                    "expected a string or an expression after `=`",
                ));
            }
        } else {
            None
        };

        let attr = Attr {
            kind: AttrKind::Cmdflags,
            id: id.clone(),
            name,
            value,
        };

        Ok(attr)
    }
}

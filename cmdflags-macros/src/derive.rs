//! Derive macro implementation.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::{
    Data, DataStruct, DeriveInput, Expr, ExprLit, Fields, FieldsNamed, Lit, LitStr,
    spanned::Spanned,
};

use crate::attr::{Attr, AttrKind, AttrName, AttrValue};
use crate::flag::MetaFlag;
use crate::helpers::{error, token_stream_with_error};
use crate::ty::is_simple_ty;

pub fn run(item: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(item.clone()) {
        Ok(x) => x,
        Err(e) => return token_stream_with_error(item, e),
    };

    try_run(&input).unwrap_or_else(|err| {
        let mut errors = TokenStream::new();
        error(&mut errors, &input, err.to_string());
        quote! {
            #errors
        }
    })
}

// This is the default value.
const PARSER_FLAG_COUNT_MAX: usize = 16;

pub fn try_run(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let ident = &input.ident;

    match input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(ref fields),
            ..
        }) => {
            let metas = collect_flags_meta(fields)?;
            let flags = resolve_flag_keys(&metas)?;

            let init = build_flags_init(&flags);
            let (defs_ty, defs) = build_flag_defs(&flags);

            let attrs = Attr::parse_all(&input.attrs)?;
            let cap = get_cmdflags_attr_cap_value(&attrs)?.unwrap_or(PARSER_FLAG_COUNT_MAX);

            Ok(quote! {
                impl #ident {
                    pub fn parse<'a>(__argv: &'a [&'a str]) -> Result<Self, cmdflags::Error> {
                        use cmdflags::parser::ParsedFlags;

                        let __flags = Self::flags();
                        let __tokens = cmdflags::parser::Tokens::new(__argv);
                        let __parsed: ParsedFlags<'_, #cap> = ParsedFlags::try_parse(__tokens, __flags)?;

                        Ok(#ident #init)
                    }

                    pub fn flags() -> &'static [cmdflags::parser::FlagDef<'static>] {
                        static DEFS: #defs_ty = #defs;
                        &DEFS
                    }
                }
            })
        }

        // FIXME: do not support unnamed struct or enum.
        _ => {
            let span = proc_macro2::Span::call_site();
            let error = syn::Error::new(span, "#[derive(Flags)] only supports named structs");
            Err(error)
        }
    }
}

fn collect_flags_meta(fields: &FieldsNamed) -> Result<Vec<MetaFlag>, syn::Error> {
    let meta = fields
        .named
        .iter()
        .map(|x| {
            let attrs = Attr::parse_all(&x.attrs)?;
            Result::<_, syn::Error>::Ok(MetaFlag::new(x, attrs))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(meta)
}

/// One field resolved to the flag forms it declares.
struct ResolvedFlag<'m> {
    meta: &'m MetaFlag,
    short: char,
    long: String,
}

fn resolve_flag_keys<'m>(metas: &'m [MetaFlag]) -> Result<Vec<ResolvedFlag<'m>>, syn::Error> {
    let mut short_keys: HashSet<char> = HashSet::new();
    let mut long_keys: HashSet<String> = HashSet::new();

    let mut resolved = Vec::new();

    for meta in metas {
        if !is_simple_ty(&meta.ty, "bool") {
            return Err(syn::Error::new(
                meta.ty.span(),
                "flag fields must be declared as plain `bool`",
            ));
        }

        let id = meta.id.unraw().to_string();

        let shorts = meta
            .attrs
            .iter()
            .filter(|x| x.kind == AttrKind::Flag && x.name == Some(AttrName::Short))
            .collect::<Vec<_>>();

        if let Some(extra) = shorts.get(1) {
            return Err(syn::Error::new(
                extra.id.span(),
                "must have at most one short flag",
            ));
        }

        // SAFETY: one can ensure that a field identifier has at least one character.
        let default_short = || id.chars().next().unwrap();

        let short = match shorts.first() {
            Some(attr) => parse_attr_flag_short_arg(attr)?.unwrap_or_else(default_short),
            None => default_short(),
        };

        if !short_keys.insert(short) {
            let span = shorts
                .first()
                .map(|x| x.id.span())
                .unwrap_or_else(|| meta.id.span());

            return Err(syn::Error::new(
                span,
                format!("short flag `{}` is already used elsewhere", short),
            ));
        }

        let longs = meta
            .attrs
            .iter()
            .filter(|x| x.kind == AttrKind::Flag && x.name == Some(AttrName::Long))
            .collect::<Vec<_>>();

        if let Some(extra) = longs.get(1) {
            return Err(syn::Error::new(
                extra.id.span(),
                "must have at most one long flag",
            ));
        }

        let long = match longs.first() {
            Some(attr) => parse_attr_flag_long_arg(attr)?.unwrap_or_else(|| id.clone()),
            None => id.clone(),
        };

        if !long_keys.insert(long.clone()) {
            let span = longs
                .first()
                .map(|x| x.id.span())
                .unwrap_or_else(|| meta.id.span());

            return Err(syn::Error::new(
                span,
                format!("long flag `{}` is already used elsewhere", long),
            ));
        }

        resolved.push(ResolvedFlag { meta, short, long });
    }

    Ok(resolved)
}

fn build_flags_init(flags: &[ResolvedFlag<'_>]) -> TokenStream {
    let fields = flags.iter().map(|flag| {
        let id = &flag.meta.id;
        let long = flag.long.as_str();

        quote! { #id: __parsed.was_passed(#long) }
    });

    quote! {{
        #(
            #fields
        ),*
    }}
}

fn build_flag_defs(flags: &[ResolvedFlag<'_>]) -> (TokenStream, TokenStream) {
    let mut items = TokenStream::new();

    for flag in flags {
        let long = flag.long.as_str();
        let short = flag.short;

        let def = quote!( cmdflags::parser::FlagDef::new(#long, #short), );
        def.to_tokens(&mut items);
    }

    let size = flags.len();

    let defs_ty = quote! { [cmdflags::parser::FlagDef<'static>; #size] };
    let defs = quote! { [ #items ] };

    (defs_ty, defs)
}

fn find_attr_with<P>(attrs: &[Attr], mut predicate: P) -> Option<&Attr>
where
    P: FnMut(&Attr) -> bool,
{
    attrs.iter().find(|&x| predicate(x))
}

fn parse_attr_of_literal_string_with<T, P>(attr: &Attr, parser: P) -> Result<Option<T>, syn::Error>
where
    P: FnOnce(&LitStr) -> Result<T, syn::Error>,
{
    let lit = match &attr.value {
        Some(AttrValue::LitStr(lit)) => lit,
        _ => return Ok(None),
    };

    parser(lit).map(Some)
}

fn parse_attr_of_literal_expr_with<T, P>(attr: &Attr, parser: P) -> Result<Option<T>, syn::Error>
where
    P: FnOnce(&Lit) -> Result<T, syn::Error>,
{
    let lit = match &attr.value {
        Some(AttrValue::Expr(Expr::Lit(ExprLit { lit, .. }))) => lit,
        _ => return Ok(None),
    };

    parser(lit).map(Some)
}

fn parse_cmdflags_attr_cap_arg(attr: &Attr) -> Result<usize, syn::Error> {
    parse_attr_of_literal_expr_with(attr, |lit| {
        if let Lit::Int(val) = lit {
            val.base10_parse()
                .map_err(|_| syn::Error::new(attr.id.span(), "expected an unsigned integer"))
        } else {
            Err(syn::Error::new(
                attr.id.span(),
                "expected arg `cap` as a literal integer",
            ))
        }
    })
    .and_then(|x| {
        x.ok_or_else(|| {
            syn::Error::new(attr.id.span(), "missing value of cap in `cmdflags` attribute")
        })
    })
}

fn get_cmdflags_attr_cap_value(attrs: &[Attr]) -> Result<Option<usize>, syn::Error> {
    if let Some(attr) = find_attr_with(attrs, |x| {
        x.kind == AttrKind::Cmdflags && x.name == Some(AttrName::Cap)
    }) {
        return Ok(Some(parse_cmdflags_attr_cap_arg(attr)?));
    }

    Ok(None)
}

fn parse_attr_flag_short_arg(attr: &Attr) -> Result<Option<char>, syn::Error> {
    parse_attr_of_literal_expr_with(attr, |lit| {
        if let Lit::Char(val) = lit {
            Ok(val.value())
        } else {
            Err(syn::Error::new(
                attr.id.span(),
                "expected `short` to be a character",
            ))
        }
    })
}

fn parse_attr_flag_long_arg(attr: &Attr) -> Result<Option<String>, syn::Error> {
    parse_attr_of_literal_string_with(attr, |lit| Ok(lit.value()))
}

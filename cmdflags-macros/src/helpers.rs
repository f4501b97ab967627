//! Code generation helpers.

use proc_macro2::TokenStream;
use quote::ToTokens;

pub(crate) fn error(out: &mut TokenStream, spanned: &impl ToTokens, message: impl AsRef<str>) {
    syn::Error::new_spanned(spanned, message.as_ref())
        .into_compile_error()
        .to_tokens(out);
}

pub(crate) fn token_stream_with_error(mut tokens: TokenStream, error: syn::Error) -> TokenStream {
    tokens.extend(error.into_compile_error());
    tokens
}

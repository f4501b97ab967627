use proc_macro::TokenStream;

mod attr;
mod derive;
mod flag;
mod helpers;
mod ty;

#[proc_macro_derive(Flags, attributes(flag, cmdflags))]
pub fn derive_flags(item: TokenStream) -> TokenStream {
    derive::run(item.into()).into()
}

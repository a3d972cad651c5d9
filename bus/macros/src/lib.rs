mod identify;

use proc_macro::TokenStream;

#[proc_macro_derive(Identify, attributes(identity))]
pub fn derive_identify(item: TokenStream) -> TokenStream {
    identify::derive_identify(item)
}

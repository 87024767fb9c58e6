//! Auto-detection of crate paths for generated code.
//!
//! The `#[derive(Injectable)]` macro needs to emit fully-qualified paths into
//! generated code.
//!
//! This module determines the correct path for `armature_core` by checking:
//! 1. If the consuming crate is `armature_core`, it uses a direct path.
//! 2. If the consuming crate depends on `armature_core`, it emits `armature_core::` paths.
//! 3. If the consuming crate depends on the `armature` umbrella, it emits `armature::armature_core::` paths.
//!
//! This allows the derive to work regardless of how the user imports Armature,
//! including when dependencies are renamed in `Cargo.toml`.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Returns the token path for `armature_core` in the consuming crate.
pub(crate) fn armature_core_path() -> TokenStream {
    match crate_name("armature_core") {
        Ok(FoundCrate::Itself) => quote!(armature_core),
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote!(#ident)
        }
        Err(_) => match crate_name("armature") {
            Ok(FoundCrate::Name(name)) => {
                let ident = format_ident!("{}", name);
                quote!(#ident::armature_core)
            }
            _ => quote!(armature_core),
        },
    }
}

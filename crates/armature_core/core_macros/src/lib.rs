//! Procedural macros for the `armature_core` crate.
//!
//! This crate provides the `#[derive(Injectable)]` macro for declaring
//! which fields of a framework object may be assigned through property
//! injection.
//!
//! # Example
//!
//! ```ignore
//! use armature_core::Injectable;
//!
//! #[derive(Default, Injectable)]
//! struct Button {
//!     #[inject]
//!     label: Option<String>,
//!     #[inject]
//!     color: Option<String>,
//!     clicks: u32, // not injectable
//! }
//! ```

mod crate_path;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, parse_macro_input};

/// Derives the `Injectable` capability for a struct.
///
/// Fields marked `#[inject]` become the declared-field whitelist; their
/// types must implement `armature_core::inject::FieldValue`. Every other
/// field is invisible to injection, and assigning an undeclared name routes
/// through `on_missing_field` (strict by default).
///
/// # Generated Code
///
/// For a struct like:
/// ```ignore
/// #[derive(Injectable)]
/// struct Button {
///     #[inject]
///     label: Option<String>,
/// }
/// ```
///
/// The macro generates:
/// ```ignore
/// impl Injectable for Button {
///     fn declared_fields(&self) -> &'static [&'static str] { &["label"] }
///     fn field(&self, name: &str) -> Option<Value> { /* match on name */ }
///     fn set_field(&mut self, name: &str, value: Value) -> Result<(), CoreError> {
///         /* match on name, FieldValue::assign */
///     }
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_injectable(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand_injectable(input: &DeriveInput) -> Result<proc_macro2::TokenStream, Error> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            input,
            "#[derive(Injectable)] only supports structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(Error::new_spanned(
            input,
            "#[derive(Injectable)] requires named fields",
        ));
    };

    let injected: Vec<_> = fields
        .named
        .iter()
        .filter(|field| field.attrs.iter().any(|attr| attr.path().is_ident("inject")))
        .collect();

    let idents: Vec<_> = injected
        .iter()
        .map(|field| field.ident.clone().expect("named field"))
        .collect();
    let names: Vec<String> = idents.iter().map(|ident| ident.to_string()).collect();

    let core = crate_path::armature_core_path();
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #core::inject::Injectable for #ident #ty_generics #where_clause {
            fn declared_fields(&self) -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn field(&self, name: &str) -> ::core::option::Option<#core::value::Value> {
                match name {
                    #(#names => ::core::option::Option::Some(
                        #core::inject::FieldValue::to_value(&self.#idents)
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set_field(
                &mut self,
                name: &str,
                value: #core::value::Value,
            ) -> ::core::result::Result<(), #core::error::CoreError> {
                match name {
                    #(#names => #core::inject::FieldValue::assign(&mut self.#idents, value),)*
                    _ => ::core::result::Result::Err(#core::error::CoreError::config(
                        ::std::format!("attempt to set undeclared property '{name}'"),
                    )),
                }
            }
        }
    })
}

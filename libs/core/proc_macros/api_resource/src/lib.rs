//! ApiResource derive macro for resource naming metadata.
//!
//! Defaults are derived from the struct name; each one can be overridden.
//!
//! ```ignore
//! use core_proc_macros::ApiResource;
//!
//! #[derive(ApiResource)]
//! pub struct Offer {
//!     id: String,
//! }
//!
//! assert_eq!(Offer::COLLECTION, "offers");
//! assert_eq!(Offer::URL, "/offers");
//! assert_eq!(Offer::LABEL, "Offer");
//! assert_eq!(Offer::TAG, "Offers");
//! ```
//!
//! ```ignore
//! #[derive(ApiResource)]
//! #[api_resource(collection = "people", url = "/users", label = "User", tag = "Accounts")]
//! pub struct Person {
//!     id: String,
//! }
//! ```

extern crate proc_macro;

use darling::FromDeriveInput;
use pluralizer::pluralize;
use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(api_resource), supports(struct_named))]
struct ApiResourceInput {
    ident: syn::Ident,
    #[darling(default)]
    collection: Option<String>,
    #[darling(default)]
    url: Option<String>,
    #[darling(default)]
    label: Option<String>,
    #[darling(default)]
    tag: Option<String>,
}

/// Derives `core_proc_macros::ApiResource`.
///
/// # Attributes
///
/// - `collection`: collection name (default: pluralized, lowercased struct name)
/// - `url`: mount path (default: `/{collection}`)
/// - `label`: singular name for messages (default: the struct name)
/// - `tag`: OpenAPI tag (default: capitalized collection)
///
/// Only named structs are supported.
#[proc_macro_derive(ApiResource, attributes(api_resource))]
pub fn api_resource_derive(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);
    let receiver = match ApiResourceInput::from_derive_input(&ast) {
        Ok(receiver) => receiver,
        Err(err) => return TokenStream::from(err.write_errors()),
    };
    impl_api_resource(receiver).into()
}

fn capitalize_first_letter(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn impl_api_resource(receiver: ApiResourceInput) -> proc_macro2::TokenStream {
    let ident = &receiver.ident;
    let name = ident.to_string();

    let collection = receiver
        .collection
        .unwrap_or_else(|| pluralize(&name.to_lowercase(), 2, false));
    let url = receiver.url.unwrap_or_else(|| format!("/{collection}"));
    let label = receiver.label.unwrap_or(name);
    let tag = receiver
        .tag
        .unwrap_or_else(|| capitalize_first_letter(&collection));

    quote! {
        impl core_proc_macros::ApiResource for #ident {
            const COLLECTION: &'static str = #collection;
            const URL: &'static str = #url;
            const LABEL: &'static str = #label;
            const TAG: &'static str = #tag;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn expand(input: proc_macro2::TokenStream) -> String {
        let ast: DeriveInput = syn::parse2(input).unwrap();
        let receiver = ApiResourceInput::from_derive_input(&ast).unwrap();
        impl_api_resource(receiver).to_string()
    }

    #[test]
    fn test_defaults() {
        let output = expand(quote! {
            pub struct Seller {
                id: String,
            }
        });

        assert!(output.contains("impl core_proc_macros :: ApiResource for Seller"));
        assert!(output.contains(r#"const COLLECTION : & 'static str = "sellers""#));
        assert!(output.contains(r#"const URL : & 'static str = "/sellers""#));
        assert!(output.contains(r#"const LABEL : & 'static str = "Seller""#));
        assert!(output.contains(r#"const TAG : & 'static str = "Sellers""#));
    }

    #[test]
    fn test_overrides() {
        let output = expand(quote! {
            #[api_resource(collection = "people", url = "/users", label = "User", tag = "Accounts")]
            pub struct Person {
                id: String,
            }
        });

        assert!(output.contains(r#"const COLLECTION : & 'static str = "people""#));
        assert!(output.contains(r#"const URL : & 'static str = "/users""#));
        assert!(output.contains(r#"const LABEL : & 'static str = "User""#));
        assert!(output.contains(r#"const TAG : & 'static str = "Accounts""#));
    }

    #[test]
    fn test_url_follows_custom_collection() {
        let output = expand(quote! {
            #[api_resource(collection = "purchase_orders")]
            pub struct Order {
                id: String,
            }
        });

        assert!(output.contains(r#"const URL : & 'static str = "/purchase_orders""#));
        assert!(output.contains(r#"const LABEL : & 'static str = "Order""#));
    }

    #[test]
    fn test_irregular_pluralization() {
        let output = expand(quote! {
            pub struct Category {
                id: String,
            }
        });

        assert!(output.contains(r#"const COLLECTION : & 'static str = "categories""#));
        assert!(output.contains(r#"const TAG : & 'static str = "Categories""#));
    }

    #[test]
    fn test_enum_rejected() {
        let ast: DeriveInput = syn::parse2(quote! {
            pub enum Status { Open }
        })
        .unwrap();
        assert!(ApiResourceInput::from_derive_input(&ast).is_err());
    }

    #[test]
    fn test_capitalize_first_letter() {
        assert_eq!(capitalize_first_letter(""), "");
        assert_eq!(capitalize_first_letter("offers"), "Offers");
        assert_eq!(capitalize_first_letter("API"), "API");
    }
}

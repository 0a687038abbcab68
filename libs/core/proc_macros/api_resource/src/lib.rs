//! ApiResource derive macro for REST resource metadata.
//!
//! Derives `core_proc_macros::ApiResource` for a named struct. Defaults are
//! computed from the struct name and can be overridden per attribute.
//!
//! ```ignore
//! use core_proc_macros::ApiResource;
//!
//! #[derive(ApiResource)]
//! pub struct Attendee {
//!     name: String,
//!     email: String,
//! }
//!
//! assert_eq!(Attendee::COLLECTION, "attendees");
//! assert_eq!(Attendee::URL, "/attendees");
//! assert_eq!(Attendee::TAG, "Attendees");
//! assert_eq!(Attendee::NAME, "Attendee");
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
    tag: Option<String>,
    #[darling(default)]
    name: Option<String>,
}

/// Derives the `ApiResource` trait implementation with automatic defaults.
///
/// # Attributes
///
/// - `collection`: collection name (default: pluralized, lowercased struct name)
/// - `url`: base URL path (default: `/{collection}`)
/// - `tag`: API docs tag (default: capitalized collection name)
/// - `name`: display name in messages (default: the struct name)
///
/// Only named structs are supported.
///
/// ```ignore
/// #[derive(ApiResource)]
/// #[api_resource(collection = "event_bookings", url = "/bookings", tag = "Ticketing")]
/// pub struct Booking {
///     event_id: String,
/// }
///
/// assert_eq!(Booking::COLLECTION, "event_bookings");
/// assert_eq!(Booking::URL, "/bookings");
/// assert_eq!(Booking::NAME, "Booking");
/// ```
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
    let lowercase = ident.to_string().to_lowercase();

    let collection = receiver
        .collection
        .unwrap_or_else(|| pluralize(&lowercase, 2, false));

    let url = receiver.url.unwrap_or_else(|| format!("/{}", collection));

    let tag = receiver
        .tag
        .unwrap_or_else(|| capitalize_first_letter(&collection));

    let name = receiver.name.unwrap_or_else(|| ident.to_string());

    quote! {
        impl core_proc_macros::ApiResource for #ident {
            const URL: &'static str = #url;
            const COLLECTION: &'static str = #collection;
            const TAG: &'static str = #tag;
            const NAME: &'static str = #name;
        }
    }
}

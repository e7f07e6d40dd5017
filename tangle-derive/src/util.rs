// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{parse_quote, Attribute, Fields, GenericParam, Generics, Index, Member};

/// Source field with its access path and pattern binding.
///
/// For tuple structs `member` is the positional index; for named structs it
/// is the field identifier.
pub struct SourceField {
    pub member: Member,
    pub binding: Ident,
    pub skip: bool,
}

impl SourceField {
    /// Field initialization syntax for struct construction.
    /// - tuple struct: just the value
    /// - named struct: `field_name: value`
    pub fn field_init(&self, value: TokenStream) -> TokenStream {
        match &self.member {
            Member::Named(ident) => quote! { #ident: #value },
            Member::Unnamed(_) => value,
        }
    }

    /// Pattern binding the field inside a variant match arm.
    pub fn field_pattern(&self) -> TokenStream {
        let binding = if self.skip {
            quote! { _ }
        } else {
            let binding = &self.binding;
            quote! { #binding }
        };
        match &self.member {
            Member::Named(ident) => quote! { #ident: #binding },
            Member::Unnamed(_) => binding,
        }
    }
}

/// Returns source fields in declaration order.
pub fn source_fields(fields: &Fields) -> syn::Result<Vec<SourceField>> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index::from(i)),
            };
            Ok(SourceField {
                member,
                binding: format_ident!("__tangle_f{}", i),
                skip: is_skipped(&field.attrs)?,
            })
        })
        .collect()
}

/// Whether `#[tangle(skip)]` is present.
pub fn is_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs {
        if !attr.path().is_ident("tangle") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported tangle attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

/// Generate Self construction syntax.
/// - unit struct: `Self`
/// - tuple struct: `Self(field0, field1, ...)`
/// - named struct: `Self { field0, field1, ... }`
pub fn self_construction(path: TokenStream, fields: &Fields, inits: &[TokenStream]) -> TokenStream {
    match fields {
        Fields::Named(_) => quote! { #path { #(#inits),* } },
        Fields::Unnamed(_) => quote! { #path( #(#inits),* ) },
        Fields::Unit => quote! { #path },
    }
}

/// Every type parameter must itself be encodable.
pub fn add_codec_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param
                .bounds
                .push(parse_quote!(::tangle_core::codec::Codec));
        }
    }
    generics
}

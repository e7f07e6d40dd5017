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

use super::read::gen_construct;
use super::write::gen_write_bindings;
use crate::util::{add_codec_bounds, source_fields};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DeriveInput, Fields, LitStr};

/// Enums write the variant index as `u32`, then the variant's fields.
pub fn derive_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let generics = add_codec_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let name_str = LitStr::new(&name.to_string(), name.span());

    let mut write_arms = Vec::with_capacity(data.variants.len());
    let mut read_arms = Vec::with_capacity(data.variants.len());
    for (index, variant) in data.variants.iter().enumerate() {
        let index = u32::try_from(index)
            .map_err(|_| syn::Error::new_spanned(variant, "too many variants"))?;
        let ident = &variant.ident;
        let fields = source_fields(&variant.fields)?;

        let patterns: Vec<TokenStream> = fields.iter().map(|f| f.field_pattern()).collect();
        let pattern = match &variant.fields {
            Fields::Named(_) => quote! { Self::#ident { #(#patterns),* } },
            Fields::Unnamed(_) => quote! { Self::#ident( #(#patterns),* ) },
            Fields::Unit => quote! { Self::#ident },
        };
        let writes = gen_write_bindings(&fields);
        write_arms.push(quote! {
            #pattern => {
                s.write_u32(#index)?;
                #(#writes)*
            }
        });

        let construct = gen_construct(quote! { Self::#ident }, &variant.fields, &fields);
        read_arms.push(quote! {
            #index => ::std::result::Result::Ok(#construct),
        });
    }

    Ok(quote! {
        #[allow(unused_variables)]
        impl #impl_generics ::tangle_core::codec::Object for #name #ty_generics #where_clause {
            fn serialize(
                &self,
                s: &mut ::tangle_core::resolver::context::Serializer<'_>,
            ) -> ::std::result::Result<(), ::tangle_core::error::Error> {
                match self {
                    #(#write_arms)*
                }
                ::std::result::Result::Ok(())
            }

            fn deserialize(
                &mut self,
                d: &mut ::tangle_core::resolver::context::Deserializer<'_>,
            ) -> ::std::result::Result<(), ::tangle_core::error::Error> {
                *self = <Self as ::tangle_core::codec::Codec>::read(d)?;
                ::std::result::Result::Ok(())
            }
        }

        #[allow(unused_variables)]
        impl #impl_generics ::tangle_core::codec::Codec for #name #ty_generics #where_clause {
            #[inline(always)]
            fn write(
                &self,
                s: &mut ::tangle_core::resolver::context::Serializer<'_>,
            ) -> ::std::result::Result<(), ::tangle_core::error::Error> {
                <Self as ::tangle_core::codec::Object>::serialize(self, s)
            }

            fn read(
                d: &mut ::tangle_core::resolver::context::Deserializer<'_>,
            ) -> ::std::result::Result<Self, ::tangle_core::error::Error> {
                match d.read_u32()? {
                    #(#read_arms)*
                    other => ::std::result::Result::Err(::tangle_core::error::Error::invalid_data(
                        ::std::format!("unknown variant index {} for enum {}", other, #name_str),
                    )),
                }
            }

            ::tangle_core::shared_object_views!();
        }
    })
}

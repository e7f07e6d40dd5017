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

use crate::util::{add_codec_bounds, source_fields};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DataStruct, DeriveInput};

mod derive_enum;
mod read;
mod write;

pub fn derive_object(input: &DeriveInput) -> proc_macro::TokenStream {
    let result = match &input.data {
        Data::Struct(data) => derive_struct(input, data),
        Data::Enum(data) => derive_enum::derive_enum(input, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Object)] is not supported for unions",
        )),
    };
    result.unwrap_or_else(|e| e.to_compile_error()).into()
}

fn derive_struct(input: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let generics = add_codec_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = source_fields(&data.fields)?;
    let write_fields = write::gen_write_fields(&fields);
    let read_in_place = read::gen_read_fields_in_place(&fields);
    let construct = read::gen_construct(quote! { Self }, &data.fields, &fields);

    Ok(quote! {
        #[allow(unused_variables)]
        impl #impl_generics ::tangle_core::codec::Object for #name #ty_generics #where_clause {
            fn serialize(
                &self,
                s: &mut ::tangle_core::resolver::context::Serializer<'_>,
            ) -> ::std::result::Result<(), ::tangle_core::error::Error> {
                #(#write_fields)*
                ::std::result::Result::Ok(())
            }

            fn deserialize(
                &mut self,
                d: &mut ::tangle_core::resolver::context::Deserializer<'_>,
            ) -> ::std::result::Result<(), ::tangle_core::error::Error> {
                #(#read_in_place)*
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
                ::std::result::Result::Ok(#construct)
            }

            #[inline(always)]
            fn read_in_place(
                &mut self,
                d: &mut ::tangle_core::resolver::context::Deserializer<'_>,
            ) -> ::std::result::Result<(), ::tangle_core::error::Error> {
                <Self as ::tangle_core::codec::Object>::deserialize(self, d)
            }

            ::tangle_core::shared_object_views!();
        }
    })
}

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

use crate::util::{self_construction, SourceField};
use proc_macro2::TokenStream;
use quote::quote;
use syn::Fields;

/// Fill every field of an existing value in declaration order. Skipped
/// fields are reset to their default.
pub fn gen_read_fields_in_place(fields: &[SourceField]) -> Vec<TokenStream> {
    fields
        .iter()
        .map(|f| {
            let member = &f.member;
            if f.skip {
                quote! {
                    self.#member = ::std::default::Default::default();
                }
            } else {
                quote! {
                    ::tangle_core::codec::Codec::read_in_place(&mut self.#member, d)?;
                }
            }
        })
        .collect()
}

/// Construction of `path` reading each field in declaration order.
pub fn gen_construct(path: TokenStream, shape: &Fields, fields: &[SourceField]) -> TokenStream {
    let inits: Vec<TokenStream> = fields
        .iter()
        .map(|f| {
            let value = if f.skip {
                quote! { ::std::default::Default::default() }
            } else {
                quote! { ::tangle_core::codec::Codec::read(d)? }
            };
            f.field_init(value)
        })
        .collect();
    self_construction(path, shape, &inits)
}

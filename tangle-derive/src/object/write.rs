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

use crate::util::SourceField;
use proc_macro2::TokenStream;
use quote::quote;

/// `Codec::write(&self.field, s)?;` for each written field of a struct.
pub fn gen_write_fields(fields: &[SourceField]) -> Vec<TokenStream> {
    fields
        .iter()
        .filter(|f| !f.skip)
        .map(|f| {
            let member = &f.member;
            quote! {
                ::tangle_core::codec::Codec::write(&self.#member, s)?;
            }
        })
        .collect()
}

/// `Codec::write(binding, s)?;` for each written field bound by a variant pattern.
pub fn gen_write_bindings(fields: &[SourceField]) -> Vec<TokenStream> {
    fields
        .iter()
        .filter(|f| !f.skip)
        .map(|f| {
            let binding = &f.binding;
            quote! {
                ::tangle_core::codec::Codec::write(#binding, s)?;
            }
        })
        .collect()
}

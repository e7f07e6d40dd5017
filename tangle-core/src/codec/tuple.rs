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

use crate::codec::{Codec, Object};
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};

// Elements back to back in positional order, no length.
macro_rules! impl_tuple_codec {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Codec),+> Codec for ($($name,)+) {
            fn write(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
                $( self.$idx.write(s)?; )+
                Ok(())
            }

            fn read(d: &mut Deserializer<'_>) -> Result<Self, Error> {
                Ok(($( $name::read(d)?, )+))
            }

            crate::shared_object_views!();
        }

        impl<$($name: Codec),+> Object for ($($name,)+) {
            fn serialize(&self, s: &mut Serializer<'_>) -> Result<(), Error> {
                Codec::write(self, s)
            }

            fn deserialize(&mut self, d: &mut Deserializer<'_>) -> Result<(), Error> {
                Codec::read_in_place(self, d)
            }
        }
    };
}

impl_tuple_codec!(A 0);
impl_tuple_codec!(A 0, B 1);
impl_tuple_codec!(A 0, B 1, C 2);
impl_tuple_codec!(A 0, B 1, C 2, D 3);
impl_tuple_codec!(A 0, B 1, C 2, D 3, E 4);
impl_tuple_codec!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple_codec!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple_codec!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

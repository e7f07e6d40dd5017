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

use crate::buffer::{Reader, Writer};
use crate::channel::{ByteSink, ByteSource};
use crate::codec::{Codec, Object};
use crate::config::Config;
use crate::error::Error;
use crate::resolver::context::{Deserializer, Serializer};
use crate::resolver::type_registry::TypeRegistry;

enum Registry {
    Owned(TypeRegistry),
    Global(&'static TypeRegistry),
}

/// The main tangle serialization engine.
///
/// `Tangle` holds the configuration and the type registry. Each call to
/// [`serialize`](Tangle::serialize) or [`deserialize`](Tangle::deserialize)
/// opens a fresh session, so pointer identity is preserved within one call
/// and nothing is carried over between calls.
///
/// # Examples
///
/// Basic usage:
///
/// ```rust
/// use tangle_core::Tangle;
/// use std::rc::Rc;
///
/// let tangle = Tangle::default();
/// let shared = Rc::new(String::from("shared"));
/// let pair = (shared.clone(), shared);
///
/// let bytes = tangle.serialize(&pair).unwrap();
/// let (a, b): (Rc<String>, Rc<String>) = tangle.deserialize(&bytes).unwrap();
/// assert!(Rc::ptr_eq(&a, &b));
/// ```
///
/// Custom configuration:
///
/// ```rust
/// use tangle_core::Tangle;
///
/// let tangle = Tangle::default()
///     .max_depth(64)
///     .check_trailing_bytes(false);
/// assert_eq!(tangle.config().max_depth, 64);
/// ```
pub struct Tangle {
    config: Config,
    registry: Registry,
}

impl Default for Tangle {
    fn default() -> Self {
        Tangle {
            config: Config::default(),
            registry: Registry::Owned(TypeRegistry::new()),
        }
    }
}

impl Tangle {
    /// Engine with its own, already populated registry.
    pub fn with_registry(registry: TypeRegistry) -> Self {
        Tangle {
            config: Config::default(),
            registry: Registry::Owned(registry),
        }
    }

    /// Engine over the process-wide registry installed with
    /// [`TypeRegistry::install`]. Its registry is frozen: the `register*`
    /// methods fail with [`Error::NotAllowed`].
    pub fn global() -> Result<Self, Error> {
        let registry = TypeRegistry::global()
            .ok_or_else(|| Error::not_allowed("no global type registry has been installed"))?;
        Ok(Tangle {
            config: Config::default(),
            registry: Registry::Global(registry),
        })
    }

    /// Sets the maximum nesting depth of pointer payloads.
    ///
    /// Deeper graphs fail with [`Error::DepthExceed`] instead of exhausting
    /// the stack. Default is 256.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Sets whether [`deserialize`](Tangle::deserialize) rejects input with
    /// bytes left after the root value. Default is `true`.
    pub fn check_trailing_bytes(mut self, check: bool) -> Self {
        self.config.check_trailing_bytes = check;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        match &self.registry {
            Registry::Owned(registry) => registry,
            Registry::Global(registry) => *registry,
        }
    }

    pub fn registry_mut(&mut self) -> Result<&mut TypeRegistry, Error> {
        match &mut self.registry {
            Registry::Owned(registry) => Ok(registry),
            Registry::Global(_) => Err(Error::not_allowed(
                "the global type registry is frozen after install",
            )),
        }
    }

    /// Registers `T` under its Rust type name so `Box<dyn Object>` and other
    /// trait object pointers can rebuild it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tangle_core::{Object, Tangle};
    ///
    /// let mut tangle = Tangle::default();
    /// tangle.register::<String>().unwrap();
    ///
    /// let value: Box<dyn Object> = Box::new(String::from("hi"));
    /// let bytes = tangle.serialize(&value).unwrap();
    /// let back: Box<dyn Object> = tangle.deserialize(&bytes).unwrap();
    /// assert_eq!(back.as_any().downcast_ref::<String>().unwrap(), "hi");
    /// ```
    pub fn register<T: Object + Default>(&mut self) -> Result<(), Error> {
        self.registry_mut()?.register::<T>()
    }

    /// Registers `T` under an explicit, stable name.
    pub fn register_by_name<T: Object + Default>(&mut self, name: &str) -> Result<(), Error> {
        self.registry_mut()?.register_by_name::<T>(name)
    }

    /// Registers `T` as an implementation of the trait object `D`.
    pub fn register_polymorphic<D, T>(&mut self, factory: fn() -> Box<D>) -> Result<(), Error>
    where
        D: ?Sized + 'static,
        T: Object + Default,
    {
        self.registry_mut()?.register_polymorphic::<D, T>(factory)
    }

    /// Serializes a value into a new byte vector.
    ///
    /// The encoding has no header: it is exactly the encoding of `value`.
    pub fn serialize<T: Codec>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let mut writer = Writer::default();
        self.serialize_into(value, &mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Serializes a value into any byte sink.
    pub fn serialize_into<T: Codec>(&self, value: &T, sink: &mut dyn ByteSink) -> Result<(), Error> {
        let mut s = Serializer::new(sink, self.registry(), &self.config);
        value.write(&mut s)?;
        s.finish();
        Ok(())
    }

    /// Deserializes a value from a byte slice.
    pub fn deserialize<T: Codec>(&self, bf: &[u8]) -> Result<T, Error> {
        let mut reader = Reader::new(bf);
        let value = self.deserialize_from(&mut reader)?;
        let trailing = reader.remaining_len();
        if self.config.check_trailing_bytes && trailing > 0 {
            log::warn!("rejecting input with {} trailing bytes", trailing);
            return Err(Error::invalid_data(format!(
                "{} trailing bytes after the root value",
                trailing
            )));
        }
        Ok(value)
    }

    /// Deserializes a value from any byte source, leaving later bytes unread.
    pub fn deserialize_from<T: Codec>(&self, source: &mut dyn ByteSource) -> Result<T, Error> {
        let mut d = Deserializer::new(source, self.registry(), &self.config);
        let value = T::read(&mut d)?;
        d.finish();
        Ok(value)
    }
}

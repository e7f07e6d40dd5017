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

//! Name to factory table used to rebuild polymorphic pointees.
//!
//! A pointer payload carries the concrete type name of its pointee. When the
//! reader only knows a trait object statically (`Box<dyn Shape>`,
//! `Rc<dyn Object>`), the registry turns that name back into a
//! default-constructed instance of the right concrete type, which the payload
//! then fills in place.

use crate::codec::Object;
use crate::error::Error;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Factory producing a default-constructed concrete type as `dyn Object`.
pub type ObjectFactory = fn() -> Box<dyn Object>;

static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();

struct TypeEntry {
    type_id: TypeId,
    factory: Option<ObjectFactory>,
    // TypeId of `dyn Trait` -> `fn() -> Box<dyn Trait>`
    views: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

/// Registry of constructible types, keyed by runtime-stable name.
///
/// Entries are only ever added. Build one per [`Tangle`](crate::tangle::Tangle)
/// or [`install`](TypeRegistry::install) a single process-wide instance
/// during startup.
///
/// ```rust
/// use tangle_core::resolver::type_registry::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<String>().unwrap();
/// let obj = registry.create("alloc::string::String").unwrap();
/// assert!(obj.as_any().is::<String>());
/// assert!(registry.create("no::such::Type").is_err());
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    entries: HashMap<String, TypeEntry>,
    names: HashMap<TypeId, String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `std::any::type_name::<T>()`.
    pub fn register<T: Object + Default>(&mut self) -> Result<(), Error> {
        self.register_by_name::<T>(type_name::<T>())
    }

    /// Register `T` under an explicit name, written in place of the default
    /// name for every pointee of type `T`.
    pub fn register_by_name<T: Object + Default>(&mut self, name: &str) -> Result<(), Error> {
        self.register_with::<T>(name, || -> Box<dyn Object> { Box::new(T::default()) })
    }

    /// Register `T` under `name` with a custom factory.
    pub fn register_with<T: Object>(
        &mut self,
        name: &str,
        factory: ObjectFactory,
    ) -> Result<(), Error> {
        let entry = self.entry_for::<T>(name)?;
        entry.factory = Some(factory);
        log::debug!("registered {} as {:?}", type_name::<T>(), name);
        Ok(())
    }

    /// Make `T` constructible through the trait object `D`, for pointers
    /// such as `Box<D>` and `Rc<D>`.
    ///
    /// `T` is registered under its default name first if it is not known yet.
    pub fn register_polymorphic<D, T>(&mut self, factory: fn() -> Box<D>) -> Result<(), Error>
    where
        D: ?Sized + 'static,
        T: Object + Default,
    {
        let name = match self.names.get(&TypeId::of::<T>()) {
            Some(name) => name.clone(),
            None => {
                self.register::<T>()?;
                type_name::<T>().to_string()
            }
        };
        let entry = self.entry_for::<T>(&name)?;
        entry.views.insert(TypeId::of::<D>(), Box::new(factory));
        log::debug!(
            "registered {} as implementation of {}",
            type_name::<T>(),
            type_name::<D>()
        );
        Ok(())
    }

    /// New default instance of the type registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn Object>, Error> {
        self.entries
            .get(name)
            .and_then(|entry| entry.factory)
            .map(|factory| factory())
            .ok_or_else(|| Error::unknown_type(name.to_string()))
    }

    /// New default instance of the type registered under `name`, viewed
    /// through the trait object `D`.
    pub fn create_as<D: ?Sized + 'static>(&self, name: &str) -> Result<Box<D>, Error> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| Error::unknown_type(name.to_string()))?;
        let view = entry.views.get(&TypeId::of::<D>()).ok_or_else(|| {
            Error::unknown_type(format!(
                "{} is not registered as {}",
                name,
                type_name::<D>()
            ))
        })?;
        match view.downcast_ref::<fn() -> Box<D>>() {
            Some(factory) => Ok(factory()),
            None => crate::bail!("corrupt factory for {} as {}", name, type_name::<D>()),
        }
    }

    /// Name registered for a concrete type.
    pub fn name_of(&self, type_id: TypeId) -> Option<&str> {
        self.names.get(&type_id).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze this registry as the process-wide instance.
    ///
    /// Only the first call succeeds; later calls fail with
    /// [`Error::NotAllowed`] and drop their registry.
    pub fn install(self) -> Result<&'static TypeRegistry, Error> {
        let len = self.len();
        GLOBAL
            .set(self)
            .map_err(|_| Error::not_allowed("a global type registry is already installed"))?;
        log::debug!("installed global type registry with {} types", len);
        Self::global()
            .ok_or_else(|| Error::unknown("global type registry vanished after install"))
    }

    /// The installed process-wide registry, if any.
    pub fn global() -> Option<&'static TypeRegistry> {
        GLOBAL.get()
    }

    fn entry_for<T: Any>(&mut self, name: &str) -> Result<&mut TypeEntry, Error> {
        let type_id = TypeId::of::<T>();
        if let Some(existing) = self.names.get(&type_id) {
            if existing != name {
                crate::not_allowed!(
                    "{} is already registered as {:?}",
                    type_name::<T>(),
                    existing
                );
            }
        }
        if let Some(entry) = self.entries.get(name) {
            if entry.type_id != type_id {
                crate::not_allowed!("name {:?} is already taken by another type", name);
            }
        }
        self.names.insert(type_id, name.to_string());
        Ok(self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| TypeEntry {
                type_id,
                factory: None,
                views: HashMap::new(),
            }))
    }
}

/// Register concrete types as implementations of a trait.
///
/// Works on anything with a `register_polymorphic` method, i.e. a
/// [`TypeRegistry`] or a [`Tangle`](crate::tangle::Tangle). Evaluates to a
/// `Result<(), Error>`.
///
/// ```rust,ignore
/// register_impls!(tangle, Shape, Circle, Square)?;
/// ```
#[macro_export]
macro_rules! register_impls {
    ($target:expr, $trait_name:ident, $($impl_type:ty),+ $(,)?) => {{
        let target = &mut $target;
        let mut result: ::std::result::Result<(), $crate::error::Error> = Ok(());
        $(
            if result.is_ok() {
                result = target.register_polymorphic::<dyn $trait_name, $impl_type>(
                    || -> ::std::boxed::Box<dyn $trait_name> {
                        ::std::boxed::Box::new(<$impl_type as ::std::default::Default>::default())
                    },
                );
            }
        )+
        result
    }};
}

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

use crate::error::Error;
use crate::types::{Handle, PointerKind};
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Identity of a shared allocation during one serialization session.
///
/// Built from the address of the pointee. The session borrows the whole
/// graph, so no allocation it has seen can be freed and reused before the
/// session ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerKey(usize);

impl PointerKey {
    #[inline(always)]
    pub fn of_rc<T: ?Sized>(rc: &Rc<T>) -> Self {
        PointerKey(Rc::as_ptr(rc) as *const () as usize)
    }

    #[inline(always)]
    pub fn of_arc<T: ?Sized>(arc: &Arc<T>) -> Self {
        PointerKey(Arc::as_ptr(arc) as *const () as usize)
    }
}

/// Handle table of a serialization session.
///
/// Maps pointer identity to the id assigned at its first occurrence, so
/// the payload behind an identity is written exactly once.
///
/// # Examples
///
/// ```rust
/// use tangle_core::resolver::ref_resolver::{HandleWriter, PointerKey};
/// use tangle_core::types::Handle;
/// use std::rc::Rc;
///
/// let mut handles = HandleWriter::new();
/// let rc = Rc::new(42);
/// let key = PointerKey::of_rc(&rc);
///
/// assert_eq!(handles.get_or_assign(Some(key)), Handle::Flesh(1));
/// assert_eq!(handles.get_or_assign(Some(key)), Handle::Reference(1));
/// assert_eq!(handles.get_or_assign(None), Handle::Null);
/// ```
#[derive(Default)]
pub struct HandleWriter {
    handles: HashMap<PointerKey, u32>,
    last_id: u32,
}

impl HandleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Null` for no pointer, `Reference` for an identity seen before,
    /// otherwise a fresh sequential `Flesh` id.
    pub fn get_or_assign(&mut self, key: Option<PointerKey>) -> Handle {
        let Some(key) = key else {
            return Handle::Null;
        };
        if let Some(&id) = self.handles.get(&key) {
            log::trace!("pointer {:?} seen again as handle {}", key, id);
            return Handle::Reference(id);
        }
        let id = self.next_id();
        self.handles.insert(key, id);
        log::trace!("pointer {:?} assigned handle {}", key, id);
        Handle::Flesh(id)
    }

    /// Fresh `Flesh` id that is never looked up again, for unique owners.
    pub fn next_unique(&mut self) -> Handle {
        Handle::Flesh(self.next_id())
    }

    /// Number of ids handed out so far.
    pub fn assigned(&self) -> u32 {
        self.last_id
    }

    pub fn clear(&mut self) {
        self.handles.clear();
        self.last_id = 0;
    }

    #[inline(always)]
    fn next_id(&mut self) -> u32 {
        self.last_id += 1;
        self.last_id
    }
}

/// Owner slot that lets every shared pointer decoded for one id alias the
/// same allocation.
///
/// While a sized owner is under construction only a weak handle to it is
/// known; weak pointers in its own payload are served from that.
#[derive(Default)]
pub struct SharedRecord {
    owner: Option<Box<dyn Any>>,
    pending: Option<Box<dyn Any>>,
    // `Rc<dyn Object>` or `Arc<dyn Object>` of the same allocation
    object_view: Option<Box<dyn Any>>,
}

impl SharedRecord {
    pub fn has_owner(&self) -> bool {
        self.owner.is_some()
    }

    /// Store the owner created at the first occurrence.
    pub fn set_owner<P: Any>(&mut self, owner: P) -> Result<(), Error> {
        if self.owner.is_some() {
            return Err(Error::ownership_conflict(format!(
                "owner already recorded, refusing second {}",
                type_name::<P>()
            )));
        }
        self.owner = Some(Box::new(owner));
        self.pending = None;
        Ok(())
    }

    /// Store the weak handle of an owner whose payload is being decoded.
    pub fn set_pending<W: Any>(&mut self, weak: W) -> Result<(), Error> {
        if self.owner.is_some() {
            return Err(Error::ownership_conflict(format!(
                "owner already recorded, refusing pending {}",
                type_name::<W>()
            )));
        }
        self.pending = Some(Box::new(weak));
        Ok(())
    }

    /// Store the `dyn Object` view of the owner.
    pub fn set_object_view<V: Any>(&mut self, view: V) {
        self.object_view = Some(Box::new(view));
    }

    /// Clone of the recorded owner, or of its `dyn Object` view when that is
    /// what `P` asks for. `Ok(None)` while the first occurrence is still
    /// being decoded.
    pub fn owner<P: Any + Clone>(&self) -> Result<Option<P>, Error> {
        let Some(owner) = &self.owner else {
            return Ok(None);
        };
        if let Some(owner) = owner.downcast_ref::<P>() {
            return Ok(Some(owner.clone()));
        }
        match self.object_view.as_ref().and_then(|v| v.downcast_ref::<P>()) {
            Some(view) => Ok(Some(view.clone())),
            None => Err(Error::ownership_conflict(format!(
                "handle owner is not a {}",
                type_name::<P>()
            ))),
        }
    }

    /// Clone of the weak handle stored by [`SharedRecord::set_pending`].
    pub fn pending<W: Any + Clone>(&self) -> Result<Option<W>, Error> {
        match &self.pending {
            None => Ok(None),
            Some(weak) => match weak.downcast_ref::<W>() {
                Some(weak) => Ok(Some(weak.clone())),
                None => Err(Error::ownership_conflict(format!(
                    "pending owner is not reachable as a {}",
                    type_name::<W>()
                ))),
            },
        }
    }
}

struct Registration {
    kind: PointerKind,
    record: SharedRecord,
}

/// Handle table of a deserialization session.
///
/// Ids are registered at their `Flesh` occurrence before the pointee's
/// payload is decoded, so back-references from inside that payload resolve.
///
/// # Examples
///
/// ```rust
/// use tangle_core::resolver::ref_resolver::HandleReader;
/// use tangle_core::types::{Handle, PointerKind};
/// use std::rc::Rc;
///
/// let mut handles = HandleReader::new();
/// handles.register(Handle::Flesh(1), PointerKind::Shared).unwrap();
///
/// let rc = Rc::new(42);
/// handles.shared_record(Handle::Reference(1)).unwrap().set_owner(rc.clone()).unwrap();
///
/// let alias = handles.shared_owner::<Rc<i32>>(Handle::Reference(1)).unwrap();
/// assert!(Rc::ptr_eq(&rc, &alias));
/// ```
#[derive(Default)]
pub struct HandleReader {
    registrations: HashMap<u32, Registration>,
}

impl HandleReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pointer kind behind a `Flesh` id.
    pub fn register(&mut self, handle: Handle, kind: PointerKind) -> Result<(), Error> {
        let Handle::Flesh(id) = handle else {
            return Err(Error::invalid_data(format!(
                "only a first occurrence can be registered, got {}",
                handle
            )));
        };
        if self.registrations.contains_key(&id) {
            return Err(Error::invalid_data(format!(
                "handle {} occurs as first occurrence twice",
                id
            )));
        }
        log::trace!("registered handle {} as {:?}", id, kind);
        self.registrations.insert(
            id,
            Registration {
                kind,
                record: SharedRecord::default(),
            },
        );
        Ok(())
    }

    /// Kind of pointer registered under the handle's id.
    pub fn resolve(&self, handle: Handle) -> Result<PointerKind, Error> {
        let id = Self::id_of(handle)?;
        self.registrations
            .get(&id)
            .map(|r| r.kind)
            .ok_or_else(|| Error::unknown_handle(id))
    }

    /// Shared record of a registered id.
    ///
    /// Fails with [`Error::UnknownHandle`] for ids never registered and with
    /// [`Error::OwnershipConflict`] when the id belongs to a unique owner.
    pub fn shared_record(&mut self, handle: Handle) -> Result<&mut SharedRecord, Error> {
        let id = Self::id_of(handle)?;
        let registration = self
            .registrations
            .get_mut(&id)
            .ok_or_else(|| Error::unknown_handle(id))?;
        if registration.kind != PointerKind::Shared {
            return Err(Error::ownership_conflict(format!(
                "handle {} is uniquely owned and cannot be shared",
                id
            )));
        }
        Ok(&mut registration.record)
    }

    /// Alias of the owner recorded for the handle's id.
    pub fn shared_owner<P: Any + Clone>(&mut self, handle: Handle) -> Result<P, Error> {
        let record = self.shared_record(handle)?;
        match record.owner::<P>()? {
            Some(owner) => Ok(owner),
            None => Err(Error::not_allowed(format!(
                "{} refers back into a {} that is still being decoded; \
                 strong cycles must pass through RefCell, Mutex, RwLock or a Weak",
                handle,
                type_name::<P>()
            ))),
        }
    }

    /// Weak alias for the handle's id. Unlike [`HandleReader::shared_owner`]
    /// this also succeeds while a sized owner is still being decoded.
    pub fn shared_weak<S, W>(
        &mut self,
        handle: Handle,
        downgrade: impl FnOnce(&S) -> W,
    ) -> Result<W, Error>
    where
        S: Any + Clone,
        W: Any + Clone,
    {
        let record = self.shared_record(handle)?;
        if let Some(owner) = record.owner::<S>()? {
            return Ok(downgrade(&owner));
        }
        match record.pending::<W>()? {
            Some(weak) => Ok(weak),
            None => Err(Error::not_allowed(format!(
                "{} refers back into a {} whose weak handle is not available yet",
                handle,
                type_name::<S>()
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn clear(&mut self) {
        self.registrations.clear();
    }

    #[inline(always)]
    fn id_of(handle: Handle) -> Result<u32, Error> {
        handle
            .id()
            .ok_or_else(|| Error::invalid_data("null handle has no registration"))
    }
}

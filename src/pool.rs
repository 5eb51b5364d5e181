//! Reuse pool for information objects.
//!
//! Objects own nothing beyond their inline fields, so reuse is about keeping
//! instances and list storage alive between messages. A decoded list is
//! appended to a caller-owned `Vec` with
//! [`decode_objects_into`](crate::parser::decode_objects_into); once handled,
//! [`ObjectPool::recycle_all`] drains it into the pool and leaves the `Vec`
//! with its capacity for the next message. Objects built for sending are
//! taken from the pool and overwritten in place with `reset`.
//!
//! ```rust
//! use voltage_iec60870::{parser, MeasuredValueScaled, ObjectPool, QualityDescriptor, TypeId};
//!
//! let mut pool = ObjectPool::new(16);
//! let mut objects = Vec::with_capacity(parser::MAX_OBJECTS);
//!
//! let data = [100, 0, 0, 0xE8, 0x03, 0x00];
//! parser::decode_objects_into(TypeId::MeasuredScaled, 1, false, &data, &mut objects)?;
//! pool.recycle_all(&mut objects);
//! assert!(objects.is_empty());
//!
//! let mut mv = pool.take::<MeasuredValueScaled>().unwrap_or_else(|| {
//!     MeasuredValueScaled::new(0, 0, QualityDescriptor::GOOD)
//! });
//! mv.reset(101, 4711, QualityDescriptor::GOOD);
//! assert_eq!(mv.value(), 4711);
//! # Ok::<(), voltage_iec60870::Iec60870Error>(())
//! ```

use std::collections::HashMap;

use crate::objects::{InformationObject, ObjectVariant};
use crate::types::TypeId;

/// Default number of retained instances per type identifier.
pub const DEFAULT_MAX_PER_TYPE: usize = 64;

/// Caller-managed pool of information objects keyed by [`TypeId`].
#[derive(Debug, Clone)]
pub struct ObjectPool {
    free: HashMap<TypeId, Vec<InformationObject>>,
    max_per_type: usize,
}

impl ObjectPool {
    /// Create a pool retaining at most `max_per_type` instances per type.
    pub fn new(max_per_type: usize) -> Self {
        Self {
            free: HashMap::new(),
            max_per_type,
        }
    }

    /// Take a pooled instance of `T`, or `None` if none is available.
    ///
    /// The instance still holds its previous contents; overwrite it with
    /// `reset` before use.
    pub fn take<T: ObjectVariant>(&mut self) -> Option<T> {
        let object = self.take_object(T::TYPE_ID)?;
        T::from_object(object).ok()
    }

    /// Take a pooled object of `type_id`, or `None` if none is available.
    pub fn take_object(&mut self, type_id: TypeId) -> Option<InformationObject> {
        let object = self.free.get_mut(&type_id).and_then(Vec::pop);

        #[cfg(feature = "tracing-support")]
        if object.is_none() {
            tracing::debug!(%type_id, "Object pool miss");
        }

        object
    }

    /// Return an object to the pool.
    ///
    /// Returns `false` (and drops the object) when the pool already holds
    /// `max_per_type` instances of its type.
    pub fn recycle(&mut self, object: impl Into<InformationObject>) -> bool {
        let object = object.into();
        let free = self.free.entry(object.type_id()).or_default();
        if free.len() >= self.max_per_type {
            return false;
        }
        free.push(object);
        true
    }

    /// Return every object of a list to the pool, leaving the list empty.
    pub fn recycle_all(&mut self, objects: &mut Vec<InformationObject>) {
        for object in objects.drain(..) {
            self.recycle(object);
        }
    }

    /// Number of pooled instances of `type_id`.
    pub fn available(&self, type_id: TypeId) -> usize {
        self.free.get(&type_id).map_or(0, Vec::len)
    }

    /// Total number of pooled instances.
    pub fn len(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_per_type(&self) -> usize {
        self.max_per_type
    }

    /// Drop every pooled instance.
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

impl Default for ObjectPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PER_TYPE)
    }
}

//! Object reference resolution.
//!
//! Serializing an intent requires pinning every referenced object to its
//! current `(version, digest)`. The ledger fullnode client implements this
//! trait over RPC; tests use [`StaticResolver`] with pre-seeded refs.

use crate::error::TxError;
use std::collections::HashMap;
use tanda_types::{ObjectId, ObjectRef};

/// Source of live object references.
#[allow(async_fn_in_trait)]
pub trait ObjectResolver {
    async fn resolve(&self, id: &ObjectId) -> Result<ObjectRef, TxError>;
}

/// In-memory resolver over a fixed set of object refs.
#[derive(Clone, Debug, Default)]
pub struct StaticResolver {
    objects: HashMap<ObjectId, ObjectRef>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object_ref: ObjectRef) {
        self.objects.insert(object_ref.id, object_ref);
    }

    pub fn with_objects(refs: impl IntoIterator<Item = ObjectRef>) -> Self {
        let mut r = Self::new();
        for object_ref in refs {
            r.insert(object_ref);
        }
        r
    }
}

impl ObjectResolver for StaticResolver {
    async fn resolve(&self, id: &ObjectId) -> Result<ObjectRef, TxError> {
        self.objects
            .get(id)
            .cloned()
            .ok_or(TxError::UnknownObject(*id))
    }
}

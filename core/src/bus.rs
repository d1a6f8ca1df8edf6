//! Bus - Request-Scoped Resource Injection
//!
//! Every page request gets a fresh `Bus`. The ingress puts the session
//! handle and the request id on it; transitions read what they need.
//!
//! Resources are keyed by type, so there are no string keys to misspell.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::error::BandError;

/// Type-keyed resource container (TypeMap pattern).
#[derive(Default)]
pub struct Bus {
    resources: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Bus {
    /// Create a new empty Bus
    pub fn new() -> Self {
        Bus {
            resources: HashMap::new(),
        }
    }

    /// Insert a resource into the Bus.
    ///
    /// If a resource of this type already exists, it is replaced.
    pub fn insert<T: Send + Sync + 'static>(&mut self, resource: T) {
        self.resources.insert(TypeId::of::<T>(), Box::new(resource));
    }

    /// Builder-style variant of [`Bus::insert`].
    pub fn with<T: Send + Sync + 'static>(mut self, resource: T) -> Self {
        self.insert(resource);
        self
    }

    /// Get a reference to a resource.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref())
    }

    /// Get a reference to a resource a transition cannot run without.
    pub fn require<T: 'static>(&self) -> Result<&T, BandError> {
        self.get::<T>()
            .ok_or(BandError::MissingResource(std::any::type_name::<T>()))
    }

    /// Check if a resource type is present.
    pub fn contains<T: 'static>(&self) -> bool {
        self.resources.contains_key(&TypeId::of::<T>())
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("resource_count", &self.resources.len())
            .finish()
    }
}

/// Correlates log lines of one HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

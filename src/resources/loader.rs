//! Typed resource table
//!
//! Resources are registered under string keys (`"image.node.light"`) and looked
//! up by key and type. Nodes only hold keys; resolving them is always a lookup
//! against this table, never a cached copy on the node.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

/// Key under which a resource is registered
pub type ResourceKey = String;

type StoredResource = Arc<dyn Any + Send + Sync>;

/// Errors raised when resolving a resource key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("resource '{key}' is not registered")]
    NotFound { key: String },

    #[error("resource '{key}' is not of type {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}

/// Centralized storage for editor resources
///
/// Mirrors the engine's material manager: one table, shared values handed out
/// as `Arc`s so several tree-view rows can point at the same icon.
#[derive(Default)]
pub struct ResourceLoader {
    resources: HashMap<ResourceKey, StoredResource>,
}

impl ResourceLoader {
    /// Creates an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource, replacing any previous value under the same key
    pub fn register<T>(&mut self, key: impl Into<ResourceKey>, resource: T)
    where
        T: Any + Send + Sync,
    {
        let key = key.into();
        if self.resources.insert(key.clone(), Arc::new(resource)).is_some() {
            log::debug!("Replaced resource '{}'", key);
        }
    }

    /// Resolves `key` as a resource of type `T`
    ///
    /// # Errors
    /// [`ResourceError::NotFound`] for unregistered keys and
    /// [`ResourceError::TypeMismatch`] when the stored value has another type.
    /// No default is substituted; callers decide on a fallback.
    pub fn get<T>(&self, key: &str) -> Result<Arc<T>, ResourceError>
    where
        T: Any + Send + Sync,
    {
        let stored = self
            .resources
            .get(key)
            .ok_or_else(|| ResourceError::NotFound {
                key: key.to_string(),
            })?;

        Arc::clone(stored)
            .downcast::<T>()
            .map_err(|_| ResourceError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Whether anything is registered under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.resources.contains_key(key)
    }

    /// Removes a resource, returning whether it existed
    pub fn remove(&mut self, key: &str) -> bool {
        self.resources.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Lists all registered keys
    pub fn keys(&self) -> Vec<&ResourceKey> {
        self.resources.keys().collect()
    }
}

impl std::fmt::Debug for ResourceLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceLoader")
            .field("keys", &self.resources.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut loader = ResourceLoader::new();
        loader.register("greeting", String::from("hello"));

        let value = loader.get::<String>("greeting").unwrap();
        assert_eq!(value.as_str(), "hello");
        assert!(loader.contains("greeting"));
        assert_eq!(loader.len(), 1);
    }

    #[test]
    fn test_unregistered_key_fails() {
        let loader = ResourceLoader::new();
        assert_eq!(
            loader.get::<String>("missing").unwrap_err(),
            ResourceError::NotFound {
                key: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_type_fails() {
        let mut loader = ResourceLoader::new();
        loader.register("number", 42_u32);

        let err = loader.get::<String>("number").unwrap_err();
        assert!(matches!(err, ResourceError::TypeMismatch { ref key, .. } if key == "number"));
    }

    #[test]
    fn test_get_returns_shared_value() {
        let mut loader = ResourceLoader::new();
        loader.register("shared", vec![1_u8, 2, 3]);

        let a = loader.get::<Vec<u8>>("shared").unwrap();
        let b = loader.get::<Vec<u8>>("shared").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_remove() {
        let mut loader = ResourceLoader::new();
        loader.register("temp", 1_i32);
        assert!(loader.remove("temp"));
        assert!(!loader.remove("temp"));
        assert!(loader.is_empty());
    }
}

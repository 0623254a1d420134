//! Registry of named resource transformers.

use crate::JsonResource;
use arcana_core::{ArcanaError, ArcanaResult};
use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Wraps a record of type `M` into a resource.
pub type Transformer<M> = Arc<dyn Fn(M) -> Box<dyn JsonResource> + Send + Sync>;

/// Maps resource type names to the transformer that builds them from a
/// record of type `M`.
///
/// Collections look up the type they collect here, either by its explicit
/// name or by the name derived from the collection's own type name.
pub struct ResourceRegistry<M> {
    transformers: HashMap<String, Transformer<M>>,
}

impl<M: 'static> ResourceRegistry<M> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transformers: HashMap::new(),
        }
    }

    /// Registers `R` under its full type name.
    pub fn register<R>(&mut self) -> &mut Self
    where
        R: JsonResource + From<M> + 'static,
    {
        self.register_as(type_name::<R>(), |record| Box::new(R::from(record)))
    }

    /// Registers a transformer under an arbitrary name.
    pub fn register_as<F>(&mut self, name: impl Into<String>, transformer: F) -> &mut Self
    where
        F: Fn(M) -> Box<dyn JsonResource> + Send + Sync + 'static,
    {
        self.transformers.insert(name.into(), Arc::new(transformer));
        self
    }

    /// Returns true if a transformer is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.transformers.contains_key(name)
    }

    /// Returns the transformer registered under `name`.
    pub fn transformer(&self, name: &str) -> ArcanaResult<Transformer<M>> {
        self.transformers.get(name).cloned().ok_or_else(|| {
            ArcanaError::Configuration(format!("No resource is registered as [{}].", name))
        })
    }

    /// Wraps a single record with the transformer registered under `name`.
    pub fn transform(&self, name: &str, record: M) -> ArcanaResult<Box<dyn JsonResource>> {
        let transformer = self.transformer(name)?;
        Ok(transformer(record))
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.transformers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<M: 'static> Default for ResourceRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for ResourceRegistry<M> {
    fn clone(&self) -> Self {
        Self {
            transformers: self.transformers.clone(),
        }
    }
}

impl<M> fmt::Debug for ResourceRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("resources", &self.transformers.keys().collect::<Vec<_>>())
            .finish()
    }
}

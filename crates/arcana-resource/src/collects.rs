//! Resolution of the resource type a collection maps its records into.

use arcana_core::{ArcanaError, ArcanaResult};
use std::any::type_name;

/// Suffix a collection type name carries when its element resource can be
/// inferred from it.
pub const COLLECTION_SUFFIX: &str = "Collection";

/// Declares a collection type and, optionally, the resource it collects.
///
/// Leave [`Collects::COLLECTS`] unset to infer the element resource from
/// the type name: `app::http::UserCollection` collects `app::http::User`.
pub trait Collects {
    /// Name of the resource each element is mapped through.
    const COLLECTS: Option<&'static str> = None;
}

/// How a collection names itself and the resource it collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectsSpec {
    collection: String,
    collects: Option<String>,
}

impl CollectsSpec {
    /// Describes a collection by name, with nothing configured explicitly.
    #[must_use]
    pub fn named(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            collects: None,
        }
    }

    /// Describes a collection by its Rust type name.
    #[must_use]
    pub fn for_type<C: ?Sized>() -> Self {
        Self::named(type_name::<C>())
    }

    /// Describes a collection type together with what it declares.
    #[must_use]
    pub fn declared_by<C: Collects + ?Sized>() -> Self {
        let spec = Self::for_type::<C>();
        match C::COLLECTS {
            Some(collects) => spec.collects(collects),
            None => spec,
        }
    }

    /// Sets the collected resource explicitly.
    #[must_use]
    pub fn collects(mut self, resource: impl Into<String>) -> Self {
        self.collects = Some(resource.into());
        self
    }

    /// Sets the collected resource to the type name of `R`.
    #[must_use]
    pub fn collects_type<R: ?Sized>(self) -> Self {
        self.collects(type_name::<R>())
    }

    /// Returns the collection name.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// Returns the explicitly configured resource, if any.
    #[must_use]
    pub fn explicit(&self) -> Option<&str> {
        self.collects.as_deref()
    }

    /// Returns the resource name implied by the collection name, whether
    /// or not such a resource exists.
    #[must_use]
    pub fn conventional(&self) -> Option<&str> {
        let base = strip_generics(&self.collection);
        let short = short_name(base);
        if short.len() > COLLECTION_SUFFIX.len() && short.ends_with(COLLECTION_SUFFIX) {
            Some(&base[..base.len() - COLLECTION_SUFFIX.len()])
        } else {
            None
        }
    }

    /// Determines the collected resource name.
    ///
    /// An explicit name wins and is returned verbatim. Otherwise the name
    /// implied by the `Collection` suffix is used when `is_known` accepts
    /// it. Anything else is a configuration error.
    pub fn resolve(&self, is_known: impl Fn(&str) -> bool) -> ArcanaResult<String> {
        if let Some(collects) = self.explicit() {
            return Ok(collects.to_string());
        }

        match self.conventional() {
            Some(candidate) if is_known(candidate) => Ok(candidate.to_string()),
            _ => Err(ArcanaError::Configuration(format!(
                "The [{}] resource must specify the models it collects.",
                self.collection
            ))),
        }
    }
}

/// Returns a type name without its generic arguments.
fn strip_generics(name: &str) -> &str {
    name.split('<').next().unwrap_or(name)
}

/// Returns the last path segment of a type name, without generic arguments.
#[must_use]
pub fn short_name(name: &str) -> &str {
    let base = strip_generics(name);
    base.rsplit("::").next().unwrap_or(base)
}

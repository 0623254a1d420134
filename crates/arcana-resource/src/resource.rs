//! Singular JSON resources.

use crate::RequestContext;
use arcana_core::ArcanaResult;
use serde::Serialize;
use serde_json::{Map, Value};

/// Converts a single domain record into its JSON representation.
///
/// Implementors usually wrap the record they transform and are built from
/// it with `From`, which is what lets collections map records into them:
///
/// ```
/// use arcana_core::ArcanaResult;
/// use arcana_resource::{JsonResource, RequestContext};
/// use serde_json::{json, Value};
///
/// struct Tag { name: String }
///
/// struct TagResource(Tag);
///
/// impl From<Tag> for TagResource {
///     fn from(tag: Tag) -> Self {
///         Self(tag)
///     }
/// }
///
/// impl JsonResource for TagResource {
///     fn to_json(&self, _ctx: &RequestContext) -> ArcanaResult<Value> {
///         Ok(json!({ "name": self.0.name }))
///     }
/// }
/// ```
pub trait JsonResource: Send + Sync {
    /// Transforms the resource into a JSON value.
    fn to_json(&self, ctx: &RequestContext) -> ArcanaResult<Value>;

    /// Top-level members merged into the response next to the wrapped data.
    fn with(&self, _ctx: &RequestContext) -> Map<String, Value> {
        Map::new()
    }
}

impl<R: JsonResource + ?Sized> JsonResource for Box<R> {
    fn to_json(&self, ctx: &RequestContext) -> ArcanaResult<Value> {
        (**self).to_json(ctx)
    }

    fn with(&self, ctx: &RequestContext) -> Map<String, Value> {
        (**self).with(ctx)
    }
}

/// Resource that emits a record through its `Serialize` impl as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Serialized<T>(pub T);

impl<T> From<T> for Serialized<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: Serialize + Send + Sync> JsonResource for Serialized<T> {
    fn to_json(&self, _ctx: &RequestContext) -> ArcanaResult<Value> {
        Ok(serde_json::to_value(&self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    struct Versioned;

    impl JsonResource for Versioned {
        fn to_json(&self, _ctx: &RequestContext) -> ArcanaResult<Value> {
            Ok(json!({ "ok": true }))
        }

        fn with(&self, _ctx: &RequestContext) -> Map<String, Value> {
            let mut with = Map::new();
            with.insert("version".to_string(), json!("1.0"));
            with
        }
    }

    #[test]
    fn test_serialized_resource() {
        let ctx = RequestContext::default();
        let resource = Serialized::from(Point { x: 1, y: 2 });
        assert_eq!(resource.to_json(&ctx).unwrap(), json!({ "x": 1, "y": 2 }));
        assert!(resource.with(&ctx).is_empty());
    }

    #[test]
    fn test_boxed_resource_delegates() {
        let ctx = RequestContext::default();
        let boxed: Box<dyn JsonResource> = Box::new(Versioned);
        assert_eq!(boxed.to_json(&ctx).unwrap(), json!({ "ok": true }));
        assert_eq!(boxed.with(&ctx).get("version"), Some(&json!("1.0")));
    }
}

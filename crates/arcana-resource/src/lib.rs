//! # Arcana Resource
//!
//! Transforms domain records into JSON responses.
//! A [`JsonResource`] converts one record; a [`ResourceCollection`] maps a
//! plain or paginated set of records through a resource type and builds
//! the matching response, keeping pagination `links` and `meta` intact.

pub mod collection;
pub mod collects;
pub mod context;
pub mod extractors;
pub mod registry;
pub mod resource;
pub mod response;

pub use collection::*;
pub use collects::*;
pub use context::*;
pub use extractors::*;
pub use registry::*;
pub use resource::*;
pub use response::*;

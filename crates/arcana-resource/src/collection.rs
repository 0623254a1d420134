//! Resource collections.

use crate::{
    Collects, CollectsSpec, DefaultResponse, JsonResource, PaginatedResponse, RequestContext,
    ResourceRegistry, ResourceResponse,
};
use arcana_config::ResourceConfig;
use arcana_core::{ArcanaResult, Page, PageInfo};
use serde_json::{Map, Value};
use std::any::type_name;
use tracing::{debug, trace};

/// Records a collection is built from.
#[derive(Debug, Clone)]
pub enum CollectionSource<M> {
    /// A plain list of records.
    Plain(Vec<M>),
    /// One page of records with its pagination metadata.
    Paginated(Page<M>),
}

impl<M> CollectionSource<M> {
    /// Maps every record, keeping pagination metadata when present.
    fn map_into<F>(self, f: F) -> Collected
    where
        F: FnMut(M) -> Box<dyn JsonResource>,
    {
        match self {
            Self::Plain(records) => Collected::Plain(records.into_iter().map(f).collect()),
            Self::Paginated(mut page) => {
                let records = std::mem::take(&mut page.content);
                let mapped: Vec<Box<dyn JsonResource>> = records.into_iter().map(f).collect();
                Collected::Paginated(page.with_content(mapped))
            }
        }
    }
}

impl<M> From<Vec<M>> for CollectionSource<M> {
    fn from(records: Vec<M>) -> Self {
        Self::Plain(records)
    }
}

impl<M> From<Page<M>> for CollectionSource<M> {
    fn from(page: Page<M>) -> Self {
        Self::Paginated(page)
    }
}

/// Records after mapping through the collected resource.
pub enum Collected {
    /// Mapped records of a plain list.
    Plain(Vec<Box<dyn JsonResource>>),
    /// Mapped records on a page, keeping the source page's metadata.
    Paginated(Page<Box<dyn JsonResource>>),
}

impl Collected {
    /// Returns the mapped resources in order.
    #[must_use]
    pub fn items(&self) -> &[Box<dyn JsonResource>] {
        match self {
            Self::Plain(items) => items,
            Self::Paginated(page) => &page.content,
        }
    }
}

impl std::fmt::Debug for Collected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(items) => f.debug_struct("Plain").field("len", &items.len()).finish(),
            Self::Paginated(page) => f
                .debug_struct("Paginated")
                .field("len", &page.len())
                .field("info", &page.info)
                .finish(),
        }
    }
}

/// A collection of records mapped through a single resource type.
///
/// The mapping happens once, at construction. A paginated source keeps
/// its metadata, so the built response carries `links` and `meta` for
/// the same page.
#[derive(Debug)]
pub struct ResourceCollection {
    collects: String,
    resource: Collected,
    wrap: Option<String>,
    additional: Map<String, Value>,
}

impl ResourceCollection {
    /// Maps `source` through the resource described by `spec`, looked up
    /// in `registry`.
    ///
    /// Fails with a configuration error when the collected resource can
    /// neither be read from `spec` nor inferred from the collection name.
    pub fn new<M: 'static>(
        source: impl Into<CollectionSource<M>>,
        spec: &CollectsSpec,
        registry: &ResourceRegistry<M>,
    ) -> ArcanaResult<Self> {
        let collects = spec.resolve(|name| registry.contains(name))?;
        let transformer = registry.transformer(&collects)?;

        debug!(
            collection = %spec.collection_name(),
            collects = %collects,
            "Resolved collected resource"
        );

        let source: CollectionSource<M> = source.into();
        Ok(Self::from_mapped(
            collects,
            source.map_into(|record| transformer(record)),
        ))
    }

    /// Maps `source` through the resource declared by the collection type
    /// `C`.
    pub fn for_collection<C, M>(
        source: impl Into<CollectionSource<M>>,
        registry: &ResourceRegistry<M>,
    ) -> ArcanaResult<Self>
    where
        C: Collects + ?Sized,
        M: 'static,
    {
        Self::new(source, &CollectsSpec::declared_by::<C>(), registry)
    }

    /// Maps `source` through `R`, fixed at compile time.
    #[must_use]
    pub fn of<R, M>(source: impl Into<CollectionSource<M>>) -> Self
    where
        R: JsonResource + From<M> + 'static,
    {
        let source: CollectionSource<M> = source.into();
        Self::from_mapped(
            type_name::<R>().to_string(),
            source.map_into(|record| Box::new(R::from(record)) as Box<dyn JsonResource>),
        )
    }

    fn from_mapped(collects: String, resource: Collected) -> Self {
        debug!(
            collects = %collects,
            count = resource.items().len(),
            paginated = matches!(resource, Collected::Paginated(_)),
            "Collected resources"
        );

        Self {
            collects,
            resource,
            wrap: Some("data".to_string()),
            additional: Map::new(),
        }
    }

    /// Sets the key the data is wrapped in. `None` leaves plain collections
    /// unwrapped.
    #[must_use]
    pub fn wrap(mut self, wrap: Option<impl Into<String>>) -> Self {
        self.wrap = wrap.map(Into::into);
        self
    }

    /// Applies the configured wrap key.
    #[must_use]
    pub fn configured(self, config: &ResourceConfig) -> Self {
        self.wrap(config.wrap_key())
    }

    /// Adds a top-level member to the built response.
    #[must_use]
    pub fn additional(mut self, key: impl Into<String>, value: Value) -> Self {
        self.additional.insert(key.into(), value);
        self
    }

    /// Returns the name of the collected resource.
    #[must_use]
    pub fn collects(&self) -> &str {
        &self.collects
    }

    /// Returns the mapped resources.
    #[must_use]
    pub fn resource(&self) -> &Collected {
        &self.resource
    }

    /// Returns true if the collection was built from a page.
    #[must_use]
    pub fn is_paginated(&self) -> bool {
        matches!(self.resource, Collected::Paginated(_))
    }

    /// Returns the pagination metadata of a paginated collection.
    #[must_use]
    pub fn page_info(&self) -> Option<&PageInfo> {
        match &self.resource {
            Collected::Plain(_) => None,
            Collected::Paginated(page) => Some(&page.info),
        }
    }

    /// Returns the number of mapped resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resource.items().len()
    }

    /// Returns true if there are no mapped resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resource.items().is_empty()
    }

    /// Returns an iterator over the mapped resources.
    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn JsonResource>> {
        self.resource.items().iter()
    }

    /// Converts every mapped resource to JSON, in order.
    ///
    /// The first failing element aborts the whole conversion.
    pub fn to_json_array(&self, ctx: &RequestContext) -> ArcanaResult<Vec<Value>> {
        self.iter().map(|item| item.to_json(ctx)).collect()
    }

    /// Builds the response: paginated when the source was a page, the
    /// default resource response otherwise.
    pub fn build_response(&self, ctx: &RequestContext) -> ArcanaResult<ResourceResponse> {
        let data = self.to_json_array(ctx)?;

        trace!(
            collects = %self.collects,
            count = data.len(),
            paginated = self.is_paginated(),
            "Building collection response"
        );

        let response = match &self.resource {
            Collected::Plain(_) => ResourceResponse::Default(DefaultResponse::new(
                Value::Array(data),
                self.wrap.as_deref(),
                self.additional.clone(),
            )),
            Collected::Paginated(page) => {
                let mut info = page.info.clone();
                if info.path.is_none() {
                    info.path = Some(ctx.path().to_string());
                }
                ResourceResponse::Paginated(PaginatedResponse::new(
                    data,
                    &info,
                    self.wrap.as_deref(),
                    self.additional.clone(),
                ))
            }
        };

        Ok(response)
    }
}

impl<'a> IntoIterator for &'a ResourceCollection {
    type Item = &'a Box<dyn JsonResource>;
    type IntoIter = std::slice::Iter<'a, Box<dyn JsonResource>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! # content: published-content reads for page templates
//!
//! [`ContentReader`] exposes one operation per read use case. Each issues
//! exactly one request through a [`ContentApi`] and returns an explicit
//! `Result`, so a caller can tell "nothing published" from "fetch failed".
//! Page code that only wants an empty state uses
//! [`crate::presentation::OrEmpty`].
//!
//! Visibility rules differ per collection:
//! - tires and mags hide only drafts (`status != draft`), so out-of-stock items still show;
//! - branches, services, gallery and testimonials need `status = published`;
//! - featured variants also need `is_featured = true` and are capped
//!   ([`FEATURED_SERVICES_LIMIT`], [`FEATURED_TIRES_LIMIT`], [`FEATURED_TESTIMONIALS_LIMIT`]).
//!
//! Records returned by the server are re-checked against the query's filter
//! and cut to its limit before decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::client::DirectusClient;
use crate::config::CmsConfig;
use crate::contract::ContentApi;
use crate::error::CmsError;
use crate::format::image_url;
use crate::models::{
    Branch, GalleryCategory, GalleryItem, Mag, Service, SiteSettings, Testimonial, Tire, TireBrand,
};
use crate::query::{Filter, ItemQuery};

pub const FEATURED_SERVICES_LIMIT: usize = 6;
pub const FEATURED_TIRES_LIMIT: usize = 8;
pub const FEATURED_TESTIMONIALS_LIMIT: usize = 6;

const PUBLISHED: &str = "published";
const DRAFT: &str = "draft";

/// Optional narrowing of the tire catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TireFilters {
    pub brand: Option<String>,
    pub rim_size: Option<String>,
}

/// Optional narrowing of the mag/wheel catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MagFilters {
    pub brand: Option<String>,
    pub size: Option<String>,
}

pub struct ContentReader<A> {
    api: A,
    base_url: String,
}

impl ContentReader<DirectusClient> {
    /// Reader over a real client built from `config`.
    pub fn connect(config: &CmsConfig) -> Result<Self, CmsError> {
        let client = DirectusClient::new(config)?;
        Ok(Self::new(client, config.base_url.clone()))
    }
}

impl<A: ContentApi> ContentReader<A> {
    pub fn new(api: A, base_url: impl Into<String>) -> Self {
        Self {
            api,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Asset URL for an image id on this reader's CMS.
    pub fn image_url(&self, image_id: Option<&str>) -> String {
        image_url(&self.base_url, image_id)
    }

    pub async fn site_settings(&self) -> Result<Option<SiteSettings>, CmsError> {
        let record = self.api.read_singleton("site_settings").await.map_err(|e| {
            error!(error = %e, "Error fetching site settings");
            e
        })?;
        record
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                error!(error = %e, "Error decoding site settings");
                CmsError::from(e)
            })
    }

    pub async fn branches(&self) -> Result<Vec<Branch>, CmsError> {
        let query = ItemQuery::new(Filter::new().eq("status", PUBLISHED)).sort_by("sort_order");
        self.read("branches", query).await
    }

    pub async fn services(&self) -> Result<Vec<Service>, CmsError> {
        let query = ItemQuery::new(Filter::new().eq("status", PUBLISHED)).sort_by("sort_order");
        self.read("services", query).await
    }

    pub async fn featured_services(&self) -> Result<Vec<Service>, CmsError> {
        let query = ItemQuery::new(
            Filter::new()
                .eq("status", PUBLISHED)
                .eq("is_featured", true),
        )
        .sort_by("sort_order")
        .limit(FEATURED_SERVICES_LIMIT);
        self.read("services", query).await
    }

    pub async fn tires(&self, filters: &TireFilters) -> Result<Vec<Tire>, CmsError> {
        let filter = Filter::new()
            .neq("status", DRAFT)
            .eq_opt("brand", filters.brand.as_deref())
            .eq_opt("rim_size", filters.rim_size.as_deref());
        self.read("tires", ItemQuery::new(filter).sort_by("sort_order"))
            .await
    }

    pub async fn featured_tires(&self) -> Result<Vec<Tire>, CmsError> {
        let query = ItemQuery::new(Filter::new().neq("status", DRAFT).eq("is_featured", true))
            .sort_by("sort_order")
            .limit(FEATURED_TIRES_LIMIT);
        self.read("tires", query).await
    }

    pub async fn mags(&self, filters: &MagFilters) -> Result<Vec<Mag>, CmsError> {
        let filter = Filter::new()
            .neq("status", DRAFT)
            .eq_opt("brand", filters.brand.as_deref())
            .eq_opt("size", filters.size.as_deref());
        self.read("mags", ItemQuery::new(filter).sort_by("sort_order"))
            .await
    }

    pub async fn tire_brands(&self) -> Result<Vec<TireBrand>, CmsError> {
        let query = ItemQuery::new(Filter::new().eq("is_featured", true)).sort_by("sort_order");
        self.read("tire_brands", query).await
    }

    pub async fn gallery_items(
        &self,
        category: Option<GalleryCategory>,
    ) -> Result<Vec<GalleryItem>, CmsError> {
        let filter = Filter::new()
            .eq("status", PUBLISHED)
            .eq_opt("category", category.map(GalleryCategory::value));
        self.read("gallery", ItemQuery::new(filter).sort_by("sort_order"))
            .await
    }

    /// Featured testimonials, newest first.
    pub async fn testimonials(&self) -> Result<Vec<Testimonial>, CmsError> {
        let query = ItemQuery::new(
            Filter::new()
                .eq("status", PUBLISHED)
                .eq("is_featured", true),
        )
        .sort_by("-date_created")
        .limit(FEATURED_TESTIMONIALS_LIMIT);
        self.read("testimonials", query).await
    }

    async fn read<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: ItemQuery,
    ) -> Result<Vec<T>, CmsError> {
        debug!(collection, query = ?query, "Reading published content");
        let rows = self
            .api
            .read_items(collection, &query)
            .await
            .map_err(|e| {
                error!(collection, error = %e, "Error fetching {collection}");
                e
            })?;

        let mut rows: Vec<Value> = rows
            .into_iter()
            .filter(|row| query.filter.matches(row))
            .collect();
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        rows.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| {
                error!(collection, error = %e, "Error decoding {collection}");
                CmsError::from(e)
            })
    }
}

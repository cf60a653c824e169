//! Thin presentation layer: collapses read failures into empty states.

use tracing::error;

use crate::contract::ContentApi;
use crate::content::ContentReader;
use crate::error::CmsError;
use crate::models::{Branch, Service, SiteSettings, Testimonial, Tire, TireBrand};

/// Turns a failed read into the content type's empty value.
///
/// `Vec<T>` collapses to an empty list and `Option<T>` to `None`; the error is
/// logged, never returned.
pub trait OrEmpty<T> {
    fn or_empty(self, what: &str) -> T;
}

impl<T: Default> OrEmpty<T> for Result<T, CmsError> {
    fn or_empty(self, what: &str) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                error!(content = what, error = %e, "Falling back to empty {what}");
                T::default()
            }
        }
    }
}

/// Everything the homepage renders. Each part degrades on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomePage {
    pub settings: Option<SiteSettings>,
    pub branches: Vec<Branch>,
    pub featured_services: Vec<Service>,
    pub featured_tires: Vec<Tire>,
    pub tire_brands: Vec<TireBrand>,
    pub testimonials: Vec<Testimonial>,
}

impl HomePage {
    /// Sequential reads; one failing part leaves the others intact.
    pub async fn load<A: ContentApi>(reader: &ContentReader<A>) -> Self {
        Self {
            settings: reader.site_settings().await.or_empty("site settings"),
            branches: reader.branches().await.or_empty("branches"),
            featured_services: reader
                .featured_services()
                .await
                .or_empty("featured services"),
            featured_tires: reader.featured_tires().await.or_empty("featured tires"),
            tire_brands: reader.tire_brands().await.or_empty("tire brands"),
            testimonials: reader.testimonials().await.or_empty("testimonials"),
        }
    }

    /// Hero image URL, falling back to the placeholder when none is configured.
    pub fn hero_background_url<A: ContentApi>(&self, reader: &ContentReader<A>) -> String {
        let id = self
            .settings
            .as_ref()
            .and_then(|s| s.hero_background.as_deref());
        reader.image_url(id)
    }
}

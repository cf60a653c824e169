//! Typed content records as the public API returns them.
//!
//! Directus leaves unset fields as `null`, returns decimals as strings and
//! file fields as asset ids, so most fields are optional and decoded leniently.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::format::{stock_status, StockBadge};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub site_name: String,
    pub tagline: Option<String>,
    pub logo: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub hero_background: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_main_branch: bool,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub operating_hours: Option<String>,
    pub map_embed_url: Option<String>,
    pub image: Option<String>,
    pub sort_order: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_featured: bool,
    pub sort_order: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tire {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub rim_size: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub status: Option<String>,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_featured: bool,
    pub sort_order: Option<i64>,
}

impl Tire {
    pub fn stock_badge(&self) -> StockBadge {
        stock_status(self.status.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mag {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub finish: Option<String>,
    #[serde(default, deserialize_with = "decimal")]
    pub price: Option<f64>,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_featured: bool,
    pub status: Option<String>,
    pub sort_order: Option<i64>,
}

impl Mag {
    pub fn stock_badge(&self) -> StockBadge {
        stock_status(self.status.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TireBrand {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_featured: bool,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_featured: bool,
    pub sort_order: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub customer_name: String,
    pub location: Option<String>,
    pub rating: Option<i64>,
    #[serde(default, deserialize_with = "text")]
    pub content: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_featured: bool,
    pub status: Option<String>,
    pub date_created: Option<String>,
}

/// Gallery filter categories, matching the dropdown configured on `gallery.category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    Tires,
    Wheels,
    Services,
    Shop,
    Customers,
}

impl GalleryCategory {
    pub const ALL: [GalleryCategory; 5] = [
        GalleryCategory::Tires,
        GalleryCategory::Wheels,
        GalleryCategory::Services,
        GalleryCategory::Shop,
        GalleryCategory::Customers,
    ];

    pub fn value(self) -> &'static str {
        match self {
            GalleryCategory::Tires => "tires",
            GalleryCategory::Wheels => "wheels",
            GalleryCategory::Services => "services",
            GalleryCategory::Shop => "shop",
            GalleryCategory::Customers => "customers",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GalleryCategory::Tires => "Tires",
            GalleryCategory::Wheels => "Wheels & Mags",
            GalleryCategory::Services => "Services",
            GalleryCategory::Shop => "Our Shop",
            GalleryCategory::Customers => "Happy Customers",
        }
    }
}

impl std::str::FromStr for GalleryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GalleryCategory::ALL
            .into_iter()
            .find(|c| c.value() == s)
            .ok_or_else(|| format!("Unknown gallery category: {s}"))
    }
}

// Decimal columns come back as strings ("1500.00") unless the server is told otherwise.
fn decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a decimal, got {other}"
        ))),
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tire_decodes_string_price_and_null_flags() {
        let tire: Tire = serde_json::from_value(json!({
            "id": 4,
            "name": "Ecopia EP150",
            "brand": "Bridgestone",
            "size": "185/65 R15",
            "rim_size": "15",
            "price": "3450.00",
            "quantity": 12,
            "status": "limited",
            "image": null,
            "is_featured": null,
            "sort_order": 1
        }))
        .unwrap();
        assert_eq!(tire.price, Some(3450.0));
        assert!(!tire.is_featured);
        assert_eq!(tire.stock_badge().label, "Limited Stock");
    }

    #[test]
    fn missing_fields_decode_to_defaults() {
        let mag: Mag = serde_json::from_value(json!({ "name": "RPF1" })).unwrap();
        assert_eq!(mag.price, None);
        assert_eq!(mag.status, None);
        assert_eq!(mag.stock_badge().label, "In Stock");
    }

    #[test]
    fn numeric_price_is_accepted() {
        let mag: Mag = serde_json::from_value(json!({ "name": "TE37", "price": 42000 })).unwrap();
        assert_eq!(mag.price, Some(42000.0));
    }

    #[test]
    fn garbage_price_is_a_decode_error() {
        let res = serde_json::from_value::<Tire>(json!({ "name": "X", "price": "call us" }));
        assert!(res.is_err());
    }

    #[test]
    fn gallery_category_round_trips_through_its_value() {
        for category in GalleryCategory::ALL {
            assert_eq!(category.value().parse::<GalleryCategory>(), Ok(category));
        }
        assert!("cars".parse::<GalleryCategory>().is_err());
    }
}

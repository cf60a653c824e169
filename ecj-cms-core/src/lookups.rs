//! Static option lists the site uses for filters and decoration.

use crate::models::GalleryCategory;

/// Tire brands the shop carries, in display order.
pub const TIRE_BRANDS: &[&str] = &[
    "Bridgestone",
    "Michelin",
    "Goodyear",
    "Continental",
    "Dunlop",
    "Yokohama",
    "Toyo",
    "BFGoodrich",
    "Pirelli",
    "Hankook",
    "Kumho",
    "Sailun",
    "Westlake",
    "CST",
    "Radar",
    "Maxxis",
    "Nitto",
    "Falken",
];

pub const MAG_BRANDS: &[&str] = &[
    "Rota", "Lenso", "Work", "Rays", "Enkei", "XXR", "Konig", "Vossen", "BBS", "OZ Racing",
];

/// Rim diameters offered in the tire filter, in inches.
pub const RIM_SIZES: &[&str] = &["12", "13", "14", "15", "16", "17", "18", "19", "20", "21", "22"];

const DEFAULT_SERVICE_ICON: &str = "🔧";

/// Icon for a service, keyed by the service's `icon` (or `slug`) value.
pub fn service_icon(key: &str) -> &'static str {
    match key {
        "tire-installation" => "🔧",
        "wheel-alignment" => "🎯",
        "tire-balancing" => "⚖️",
        "vulcanizing" => "🔥",
        "change-oil" => "🛢️",
        "brake-service" => "🛑",
        "underchassis" => "🔩",
        "battery" => "🔋",
        "aircon" => "❄️",
        _ => DEFAULT_SERVICE_ICON,
    }
}

/// `(value, label)` pairs for the gallery category tabs.
pub fn gallery_categories() -> Vec<(&'static str, &'static str)> {
    GalleryCategory::ALL
        .iter()
        .map(|c| (c.value(), c.label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_service_falls_back_to_wrench() {
        assert_eq!(service_icon("aircon"), "❄️");
        assert_eq!(service_icon("detailing"), "🔧");
    }

    #[test]
    fn gallery_categories_follow_dropdown_order() {
        let categories = gallery_categories();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0], ("tires", "Tires"));
        assert_eq!(categories[1], ("wheels", "Wheels & Mags"));
        assert_eq!(categories[4], ("customers", "Happy Customers"));
    }

    #[test]
    fn rim_sizes_cover_twelve_to_twenty_two_inches() {
        assert_eq!(RIM_SIZES.first(), Some(&"12"));
        assert_eq!(RIM_SIZES.last(), Some(&"22"));
        assert_eq!(RIM_SIZES.len(), 11);
        assert_eq!(TIRE_BRANDS.len(), 18);
        assert_eq!(MAG_BRANDS.len(), 10);
    }
}

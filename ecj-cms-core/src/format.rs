//! Pure helpers page templates use to render CMS values.

/// Shown instead of an image when a record has none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// Shown instead of a price when a product has none (or zero).
pub const PRICE_FALLBACK: &str = "Contact for price";

/// Public URL of an uploaded asset.
pub fn image_url(base_url: &str, image_id: Option<&str>) -> String {
    match image_id {
        Some(id) if !id.is_empty() => format!("{}/assets/{}", base_url.trim_end_matches('/'), id),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Philippine peso, no decimals, grouped thousands: `1500.0` renders as `₱1,500`.
///
/// Amounts are rounded half away from zero. A missing, zero or non-finite price
/// renders as [`PRICE_FALLBACK`].
pub fn format_price(price: Option<f64>) -> String {
    let price = match price {
        Some(p) if p != 0.0 && p.is_finite() => p,
        _ => return PRICE_FALLBACK.to_string(),
    };

    let rounded = price.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}₱{}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Display label and CSS class for a stock status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockBadge {
    pub label: &'static str,
    pub class: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    Limited,
    OutOfStock,
}

impl StockStatus {
    /// Unknown keys are treated as in stock.
    pub fn from_key(key: &str) -> Self {
        match key {
            "limited" => StockStatus::Limited,
            "out_of_stock" => StockStatus::OutOfStock,
            _ => StockStatus::InStock,
        }
    }

    pub fn badge(self) -> StockBadge {
        match self {
            StockStatus::InStock => StockBadge {
                label: "In Stock",
                class: "badge-success",
            },
            StockStatus::Limited => StockBadge {
                label: "Limited Stock",
                class: "badge-warning",
            },
            StockStatus::OutOfStock => StockBadge {
                label: "Out of Stock",
                class: "badge-danger",
            },
        }
    }
}

pub fn stock_status(key: &str) -> StockBadge {
    StockStatus::from_key(key).badge()
}

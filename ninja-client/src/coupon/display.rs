//! Coupon card rendering
//!
//! Turns a coupon into the `(label, value)` rows shown on its card. Which
//! rows appear depends only on which fields are populated, so every coupon
//! type shares one renderer.

use shared::models::{Coupon, FieldValue, MenuItem, find_menu_item_name};
use shared::util::parse_iso_date;

/// Shown for a referenced menu item that is not in the loaded menu
pub const UNKNOWN_ITEM: &str = "Unknown Item";

/// Card image for coupons without an uploaded image
pub const PLACEHOLDER_IMAGE: &str = "/images/coupon-placeholder.png";

/// Array fields holding menu item ids
const ITEM_REFERENCE_FIELDS: [&str; 3] = ["purchasedItemIds", "comboItems", "freeItemIds"];

/// Fields holding ISO dates
const DATE_FIELDS: [&str; 3] = ["expirationDate", "createdAt", "updatedAt"];

/// Hour 0 is midnight, not "unset"
const ZERO_IS_MEANINGFUL: &str = "startHour";

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayField {
    pub name: String,
    pub label: String,
    pub value: String,
}

impl std::fmt::Display for DisplayField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Everything a coupon card shows
#[derive(Debug, Clone, PartialEq)]
pub struct CouponCard {
    pub id: String,
    pub code: String,
    pub image: String,
    pub is_active: bool,
    pub fields: Vec<DisplayField>,
}

impl CouponCard {
    pub fn new(coupon: &Coupon, menu_items: &[MenuItem]) -> Self {
        Self {
            id: coupon.id.clone(),
            code: coupon.code.clone(),
            image: coupon
                .image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            is_active: coupon.is_active,
            fields: render_fields(coupon, menu_items),
        }
    }

    /// Look up a row by label
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// Render the displayable fields of a coupon in the order the backend sent
/// them, including fields the coupon model does not declare.
///
/// Structural fields never appear. Absent, empty and zero values are
/// skipped, except a zero start hour.
pub fn render_fields(coupon: &Coupon, menu_items: &[MenuItem]) -> Vec<DisplayField> {
    coupon
        .display_candidates()
        .into_iter()
        .filter_map(|(name, value)| {
            let value = value?;
            if is_blank(&name, &value) {
                return None;
            }
            Some(DisplayField {
                label: field_label(&name),
                value: format_value(&name, &value, menu_items),
                name,
            })
        })
        .collect()
}

fn is_blank(name: &str, value: &FieldValue) -> bool {
    match value {
        FieldValue::Text(s) => s.is_empty(),
        FieldValue::List(items) => items.is_empty(),
        FieldValue::Number(n) => *n == 0.0 && name != ZERO_IS_MEANINGFUL,
        FieldValue::Integer(n) => *n == 0 && name != ZERO_IS_MEANINGFUL,
        FieldValue::Flag(_) => false,
    }
}

/// Format one field value for display
pub fn format_value(name: &str, value: &FieldValue, menu_items: &[MenuItem]) -> String {
    match value {
        FieldValue::List(ids) if ITEM_REFERENCE_FIELDS.contains(&name) => ids
            .iter()
            .map(|id| find_menu_item_name(menu_items, id).unwrap_or(UNKNOWN_ITEM))
            .collect::<Vec<_>>()
            .join(", "),
        FieldValue::List(items) => items.join(", "),
        FieldValue::Flag(true) => "Yes".to_string(),
        FieldValue::Flag(false) => "No".to_string(),
        FieldValue::Text(raw) if DATE_FIELDS.contains(&name) => format_date(raw),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Integer(n) => n.to_string(),
    }
}

/// Format a stored date as `DD, Mon, YYYY`; unparsable input is shown as-is
pub fn format_date(raw: &str) -> String {
    match parse_iso_date(raw) {
        Some(date) => date.format("%d, %b, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Turn a camelCase field name into a label: `discountValue` -> `Discount Value`
pub fn field_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else {
            if ch.is_ascii_uppercase() {
                label.push(' ');
            }
            label.push(ch);
        }
    }
    label
}

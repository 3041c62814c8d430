//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Sellable dish at a location
///
/// Coupons reference menu items by id; the coupon flow only reads them
/// to resolve display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_available: bool,
    pub location_id: String,
}

/// Resolve a menu item name by id
pub fn find_menu_item_name<'a>(items: &'a [MenuItem], id: &str) -> Option<&'a str> {
    items
        .iter()
        .find(|item| item.id == id)
        .map(|item| item.name.as_str())
}

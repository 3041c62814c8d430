//! Coupon Model

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Coupon type enum
///
/// Which optional fields a coupon carries is implied by its type but is
/// not enforced: every optional field is legal for every type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CouponType {
    #[default]
    #[serde(rename = "BOGO")]
    Bogo,
    FreeItem,
    FreeItemWithPurchase,
    DiscountOnSpecificItems,
    SpendMoreSaveMore,
    StorewideFlatDiscount,
    ComboDeal,
    FamilyPack,
    LimitedTime,
    HappyHour,
}

impl CouponType {
    pub const ALL: [CouponType; 10] = [
        CouponType::Bogo,
        CouponType::FreeItem,
        CouponType::FreeItemWithPurchase,
        CouponType::DiscountOnSpecificItems,
        CouponType::SpendMoreSaveMore,
        CouponType::StorewideFlatDiscount,
        CouponType::ComboDeal,
        CouponType::FamilyPack,
        CouponType::LimitedTime,
        CouponType::HappyHour,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponType::Bogo => "BOGO",
            CouponType::FreeItem => "FreeItem",
            CouponType::FreeItemWithPurchase => "FreeItemWithPurchase",
            CouponType::DiscountOnSpecificItems => "DiscountOnSpecificItems",
            CouponType::SpendMoreSaveMore => "SpendMoreSaveMore",
            CouponType::StorewideFlatDiscount => "StorewideFlatDiscount",
            CouponType::ComboDeal => "ComboDeal",
            CouponType::FamilyPack => "FamilyPack",
            CouponType::LimitedTime => "LimitedTime",
            CouponType::HappyHour => "HappyHour",
        }
    }
}

impl std::fmt::Display for CouponType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields that never take part in dynamic display
pub const STRUCTURAL_FIELDS: [&str; 5] = ["id", "locationId", "isActive", "code", "image"];

/// Check whether a wire field name is structural
pub fn is_structural_field(name: &str) -> bool {
    STRUCTURAL_FIELDS.contains(&name)
}

/// Raw value of one coupon field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Flag(bool),
    List(Vec<String>),
}

impl FieldValue {
    /// Convert an untyped backend value. `null` is treated as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(FieldValue::Flag(*b)),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Number(n.as_f64().unwrap_or_default()),
            }),
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Array(items) => Some(FieldValue::List(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            Value::Object(_) => Some(FieldValue::Text(value.to_string())),
        }
    }
}

/// Coupon entity
///
/// Besides the typed fields, a coupon received from the backend remembers
/// the order its keys arrived in and keeps any field this model does not
/// declare, so both can be shown and sent back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub location_id: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<f64>,
    /// Percentage off (30 = 30%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    /// Hosted image URL, assigned by the backend after upload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// ISO date (YYYY-MM-DD or RFC 3339)
    pub expiration_date: String,
    pub is_active: bool,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased_item_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_item_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_spend: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portion_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_pack_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_pack_price: Option<f64>,
    /// Hour of day, 0 = midnight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_hour: Option<u32>,
    /// HH:MM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Backend fields without a typed counterpart, in received order
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Wire keys in the order the backend sent them; empty for coupons
    /// built locally
    #[serde(skip)]
    pub key_order: Vec<String>,
}

/// Wire layout of [`Coupon`]
#[derive(Deserialize)]
#[serde(remote = "Coupon", rename_all = "camelCase")]
struct CouponRecord {
    #[serde(alias = "_id")]
    id: String,
    location_id: String,
    #[serde(rename = "type")]
    coupon_type: CouponType,
    code: String,
    #[serde(default)]
    discount_value: Option<f64>,
    #[serde(default)]
    discount_percentage: Option<f64>,
    #[serde(default)]
    image: Option<String>,
    expiration_date: String,
    #[serde(default)]
    is_active: bool,
    #[serde(default)]
    quantity: u32,
    #[serde(default)]
    purchased_item_ids: Option<Vec<String>>,
    #[serde(default)]
    free_item_ids: Option<Vec<String>>,
    #[serde(default)]
    minimum_spend: Option<f64>,
    #[serde(default)]
    combo_items: Option<Vec<String>>,
    #[serde(default)]
    combo_price: Option<f64>,
    #[serde(default)]
    portion_size: Option<String>,
    #[serde(default)]
    family_pack_items: Option<Vec<String>>,
    #[serde(default)]
    family_pack_price: Option<f64>,
    #[serde(default)]
    start_hour: Option<u32>,
    #[serde(default)]
    end_hour: Option<u32>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
    #[serde(skip)]
    key_order: Vec<String>,
}

impl<'de> Deserialize<'de> for Coupon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = Map::<String, Value>::deserialize(deserializer)?;
        let key_order = record
            .keys()
            .map(|key| if key == "_id" { "id".to_string() } else { key.clone() })
            .collect();

        let mut coupon =
            CouponRecord::deserialize(Value::Object(record)).map_err(de::Error::custom)?;
        coupon.key_order = key_order;
        Ok(coupon)
    }
}

impl Coupon {
    /// All fields keyed by wire name, in the order the backend sent them.
    /// Fields the backend did not send (or a locally built coupon) follow
    /// in declaration order. `None` marks an absent optional field.
    pub fn fields(&self) -> Vec<(String, Option<FieldValue>)> {
        let text = |s: &Option<String>| s.clone().map(FieldValue::Text);
        let list = |l: &Option<Vec<String>>| l.clone().map(FieldValue::List);
        let hour = |h: Option<u32>| h.map(|h| FieldValue::Integer(i64::from(h)));

        let declared = [
            ("id", Some(FieldValue::Text(self.id.clone()))),
            ("locationId", Some(FieldValue::Text(self.location_id.clone()))),
            ("type", Some(FieldValue::Text(self.coupon_type.as_str().to_string()))),
            ("code", Some(FieldValue::Text(self.code.clone()))),
            ("discountValue", self.discount_value.map(FieldValue::Number)),
            ("discountPercentage", self.discount_percentage.map(FieldValue::Number)),
            ("image", text(&self.image)),
            ("expirationDate", Some(FieldValue::Text(self.expiration_date.clone()))),
            ("isActive", Some(FieldValue::Flag(self.is_active))),
            ("quantity", Some(FieldValue::Integer(i64::from(self.quantity)))),
            ("purchasedItemIds", list(&self.purchased_item_ids)),
            ("freeItemIds", list(&self.free_item_ids)),
            ("minimumSpend", self.minimum_spend.map(FieldValue::Number)),
            ("comboItems", list(&self.combo_items)),
            ("comboPrice", self.combo_price.map(FieldValue::Number)),
            ("portionSize", text(&self.portion_size)),
            ("familyPackItems", list(&self.family_pack_items)),
            ("familyPackPrice", self.family_pack_price.map(FieldValue::Number)),
            ("startHour", hour(self.start_hour)),
            ("endHour", hour(self.end_hour)),
            ("startTime", text(&self.start_time)),
            ("endTime", text(&self.end_time)),
            ("createdAt", text(&self.created_at)),
            ("updatedAt", text(&self.updated_at)),
        ];

        let mut fields: Vec<(String, Option<FieldValue>)> = declared
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .chain(
                self.extra
                    .iter()
                    .map(|(name, value)| (name.clone(), FieldValue::from_json(value))),
            )
            .collect();

        // Stable sort: keys the backend never sent keep declaration order
        if !self.key_order.is_empty() {
            fields.sort_by_key(|(name, _)| {
                self.key_order
                    .iter()
                    .position(|key| key == name)
                    .unwrap_or(usize::MAX)
            });
        }
        fields
    }

    /// Fields eligible for dynamic display (structural fields removed)
    pub fn display_candidates(&self) -> Vec<(String, Option<FieldValue>)> {
        self.fields()
            .into_iter()
            .filter(|(name, _)| !is_structural_field(name))
            .collect()
    }
}

/// Create coupon payload
///
/// `location_id` is filled in from the active location when the payload is
/// submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    #[serde(default)]
    pub location_id: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    #[validate(length(min = 1, max = 32, message = "code must be 1-32 characters"))]
    pub code: String,
    #[validate(length(min = 1, message = "expiration date is required"))]
    pub expiration_date: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchased_item_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_item_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_spend: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portion_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_pack_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_pack_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl NewCoupon {
    /// Payload with the fields every coupon type needs
    pub fn new(
        coupon_type: CouponType,
        code: impl Into<String>,
        expiration_date: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            coupon_type,
            code: code.into(),
            expiration_date: expiration_date.into(),
            quantity,
            ..Default::default()
        }
    }

    /// Materialize the payload as a stored coupon under a backend id.
    /// New coupons start active.
    pub fn into_coupon(self, id: impl Into<String>) -> Coupon {
        Coupon {
            id: id.into(),
            location_id: self.location_id,
            coupon_type: self.coupon_type,
            code: self.code,
            discount_value: self.discount_value,
            discount_percentage: self.discount_percentage,
            image: None,
            expiration_date: self.expiration_date,
            is_active: true,
            quantity: self.quantity,
            purchased_item_ids: self.purchased_item_ids,
            free_item_ids: self.free_item_ids,
            minimum_spend: self.minimum_spend,
            combo_items: self.combo_items,
            combo_price: self.combo_price,
            portion_size: self.portion_size,
            family_pack_items: self.family_pack_items,
            family_pack_price: self.family_pack_price,
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            start_time: self.start_time,
            end_time: self.end_time,
            created_at: None,
            updated_at: None,
            extra: Map::new(),
            key_order: Vec::new(),
        }
    }
}

/// Body returned by coupon mutations
///
/// Activate/deactivate wrap the coupon under `coupon`; create and update
/// return it bare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MutationResponse {
    Wrapped { coupon: Coupon },
    Bare(Coupon),
}

impl MutationResponse {
    pub fn into_coupon(self) -> Coupon {
        match self {
            MutationResponse::Wrapped { coupon } | MutationResponse::Bare(coupon) => coupon,
        }
    }
}

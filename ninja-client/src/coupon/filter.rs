//! Active/inactive coupon filter

use std::str::FromStr;

use shared::models::Coupon;

/// Coupon list filter selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CouponFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl CouponFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponFilter::All => "all",
            CouponFilter::Active => "active",
            CouponFilter::Inactive => "inactive",
        }
    }

    pub fn matches(&self, coupon: &Coupon) -> bool {
        match self {
            CouponFilter::All => true,
            CouponFilter::Active => coupon.is_active,
            CouponFilter::Inactive => !coupon.is_active,
        }
    }

    /// Subset of `coupons` matching this selector, in list order
    pub fn apply<'a>(&self, coupons: &'a [Coupon]) -> Vec<&'a Coupon> {
        coupons.iter().filter(|c| self.matches(c)).collect()
    }
}

impl std::fmt::Display for CouponFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coupon filter: {0}")]
pub struct ParseFilterError(pub String);

impl FromStr for CouponFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CouponFilter::All),
            "active" => Ok(CouponFilter::Active),
            "inactive" => Ok(CouponFilter::Inactive),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

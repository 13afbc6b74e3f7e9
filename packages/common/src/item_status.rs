#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the owner intends to do with a closet item.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum ItemStatus {
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Keep"))]
    Keep,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Sell"))]
    Sell,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Donate"))]
    Donate,
}

impl ItemStatus {
    pub const ALL: &'static [ItemStatus] = &[Self::Keep, Self::Sell, Self::Donate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keep => "Keep",
            Self::Sell => "Sell",
            Self::Donate => "Donate",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse body placement of a clothing category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum BodyArea {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Top"))]
    Top,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Bottom"))]
    Bottom,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Footwear"))]
    Footwear,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Accessory"))]
    Accessory,
}

impl BodyArea {
    pub const ALL: &'static [BodyArea] = &[Self::Top, Self::Bottom, Self::Footwear, Self::Accessory];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Footwear => "Footwear",
            Self::Accessory => "Accessory",
        }
    }
}

impl fmt::Display for BodyArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unknown enum label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLabelError {
    kind: &'static str,
    invalid: String,
    valid: Vec<&'static str>,
}

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {} '{}'. Valid values: {}",
            self.kind,
            self.invalid,
            self.valid.join(", ")
        )
    }
}

impl std::error::Error for ParseLabelError {}

impl FromStr for ItemStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError {
                kind: "status",
                invalid: s.to_string(),
                valid: Self::ALL.iter().map(|s| s.as_str()).collect(),
            })
    }
}

impl FromStr for BodyArea {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|area| area.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError {
                kind: "body area",
                invalid: s.to_string(),
                valid: Self::ALL.iter().map(|a| a.as_str()).collect(),
            })
    }
}

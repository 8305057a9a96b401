use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Product lifecycle state, persisted as an integer code
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ProductStatus {
    Inactive,
    #[default]
    Active,
    Discontinued,
    OutOfStock,
}

impl ProductStatus {
    /// Integer stored in the `products.status` column
    pub const fn code(self) -> i32 {
        match self {
            ProductStatus::Inactive => 0,
            ProductStatus::Active => 1,
            ProductStatus::Discontinued => 2,
            ProductStatus::OutOfStock => 3,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ProductStatus::Inactive),
            1 => Some(ProductStatus::Active),
            2 => Some(ProductStatus::Discontinued),
            3 => Some(ProductStatus::OutOfStock),
            _ => None,
        }
    }
}

/// Translates between `ProductStatus` and its stored column value.
///
/// Reads never fail: codes that do not map to a variant (legacy rows, manual
/// edits) come back as [`ProductStatusConverter::FALLBACK`].
pub struct ProductStatusConverter;

impl ProductStatusConverter {
    pub const FALLBACK: ProductStatus = ProductStatus::Active;

    pub fn to_database_column(status: Option<ProductStatus>) -> Option<i32> {
        status.map(ProductStatus::code)
    }

    pub fn to_entity_attribute(code: Option<i32>) -> Option<ProductStatus> {
        code.map(|raw| {
            ProductStatus::from_code(raw).unwrap_or_else(|| {
                tracing::warn!(
                    code = raw,
                    fallback = %Self::FALLBACK,
                    "Unknown product status code in database"
                );
                Self::FALLBACK
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn every_variant_round_trips_through_its_code() {
        for status in ProductStatus::iter() {
            let code = ProductStatusConverter::to_database_column(Some(status));
            assert_eq!(ProductStatusConverter::to_entity_attribute(code), Some(status));
        }
    }

    #[test]
    fn codes_are_distinct() {
        let mut codes: Vec<i32> = ProductStatus::iter().map(ProductStatus::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ProductStatus::iter().count());
    }

    #[test]
    fn null_maps_to_null_both_ways() {
        assert_eq!(ProductStatusConverter::to_database_column(None), None);
        assert_eq!(ProductStatusConverter::to_entity_attribute(None), None);
    }

    #[test]
    fn unknown_codes_fall_back_to_active() {
        for code in [-1, 4, 42, i32::MAX, i32::MIN] {
            assert_eq!(
                ProductStatusConverter::to_entity_attribute(Some(code)),
                Some(ProductStatus::Active)
            );
        }
    }

    #[test]
    fn json_and_string_forms_are_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::OutOfStock).unwrap(),
            "\"OUT_OF_STOCK\""
        );
        assert_eq!(ProductStatus::OutOfStock.to_string(), "OUT_OF_STOCK");
        assert_eq!(
            ProductStatus::from_str("discontinued").unwrap(),
            ProductStatus::Discontinued
        );
    }

    proptest! {
        #[test]
        fn any_code_reads_without_error(code in any::<i32>()) {
            let status = ProductStatusConverter::to_entity_attribute(Some(code)).unwrap();
            match ProductStatus::from_code(code) {
                Some(known) => prop_assert_eq!(status, known),
                None => prop_assert_eq!(status, ProductStatus::Active),
            }
        }

        #[test]
        fn valid_codes_survive_a_full_round_trip(code in 0i32..=3) {
            let status = ProductStatusConverter::to_entity_attribute(Some(code));
            prop_assert_eq!(ProductStatusConverter::to_database_column(status), Some(code));
        }
    }
}

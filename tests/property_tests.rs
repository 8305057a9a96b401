//! Property-based tests for status conversion, checklist maths and the backorder model.
//!
//! These tests use proptest to verify invariants across a wide range of inputs.

use logistics_api::{
    dto::{category_distributions, checklist_percentage, CreateVehicleRequest},
    entities::{ProductStatus, ProductStatusConverter},
    ml::{self, backorder::coverage_ratio, backorder::heuristic_probability},
};
use proptest::prelude::*;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

fn status_strategy() -> impl Strategy<Value = ProductStatus> {
    prop_oneof![
        Just(ProductStatus::Inactive),
        Just(ProductStatus::Active),
        Just(ProductStatus::Discontinued),
        Just(ProductStatus::OutOfStock),
    ]
}

// Property: stored status codes never fail to read
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn known_statuses_survive_storage(status in status_strategy()) {
        let code = ProductStatusConverter::to_database_column(Some(status));
        prop_assert_eq!(ProductStatusConverter::to_entity_attribute(code), Some(status));
    }

    #[test]
    fn unknown_codes_read_as_fallback(code in any::<i32>().prop_filter("unmapped", |c| !(0..=3).contains(c))) {
        prop_assert_eq!(
            ProductStatusConverter::to_entity_attribute(Some(code)),
            Some(ProductStatusConverter::FALLBACK)
        );
    }
}

// Property: checklist percentage stays in range and is monotonic
proptest! {
    #[test]
    fn percentage_is_bounded(total in 0u64..50, completed in 0u64..50) {
        let completed = completed.min(total);
        let pct = checklist_percentage(completed, total);
        prop_assert!((0.0..=100.0).contains(&pct));
        if total == 0 {
            prop_assert_eq!(pct, 0.0);
        }
        if completed == total && total > 0 {
            prop_assert_eq!(pct, 100.0);
        }
    }

    #[test]
    fn more_steps_never_lowers_percentage(total in 1u64..50, completed in 0u64..49) {
        let completed = completed.min(total - 1);
        prop_assert!(
            checklist_percentage(completed + 1, total) >= checklist_percentage(completed, total)
        );
    }
}

// Property: backorder model outputs stay in their domains
proptest! {
    #[test]
    fn heuristic_probability_is_a_probability(
        stock in -1_000i32..100_000,
        transit in 0i32..10_000,
        forecast in 0i32..100_000,
    ) {
        let p = heuristic_probability(coverage_ratio(stock, transit, forecast));
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn pearson_is_bounded(pairs in prop::collection::vec((-1e4f64..1e4, -1e4f64..1e4), 2..40)) {
        let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        if let Some(r) = ml::pearson(&xs, &ys) {
            prop_assert!(r.abs() <= 1.0 + 1e-9, "r = {}", r);
        }
    }
}

// Property: loosely typed category rows never fail to project
proptest! {
    #[test]
    fn category_rows_tolerate_any_count(count in any::<i64>(), text in "\\PC{0,8}") {
        let rows = vec![
            json!({ "category": "A", "count": count, "backorderCount": text }),
            json!({ "category": null, "count": text }),
        ];
        let dists = category_distributions(Some(rows.as_slice()));
        prop_assert_eq!(dists.len(), 2);
        for d in dists {
            prop_assert!(d.backorder_rate >= 0.0);
        }
    }
}

// Property: vehicle plates are accepted exactly when non-blank and short enough
proptest! {
    #[test]
    fn plate_validation_matches_rules(plate in "[ A-Z0-9-]{0,25}") {
        let request = CreateVehicleRequest {
            owner_id: Uuid::new_v4(),
            license_plate: plate.clone(),
            vehicle_type: "van".to_string(),
            capacity: None,
            volume: None,
        };
        let expected = !plate.trim().is_empty() && plate.chars().count() <= 20;
        prop_assert_eq!(request.validate().is_ok(), expected);
    }
}

//! Property-based tests using proptest
//!
//! Invariants of the value objects and of the partial product merge that
//! must hold for arbitrary input.

use proptest::prelude::*;
use uuid::Uuid;

use catalog_service::domain::entities::{Product, ProductUpdate};
use catalog_service::domain::value_objects::{
    BlobName, Category, ContainerDefinition, ContainerName, Price, ProductId,
};

/// Non-blank categories within the length limit
fn category_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 _-]{0,31}"
}

fn price_strategy() -> impl Strategy<Value = f64> {
    (0u32..1_000_000).prop_map(|cents| f64::from(cents) / 100.0)
}

fn product_strategy() -> impl Strategy<Value = Product> {
    (
        category_strategy(),
        "[a-zA-Z][a-zA-Z0-9 ]{0,63}",
        price_strategy(),
        "[a-zA-Z][a-zA-Z0-9 .,]{0,200}",
    )
        .prop_map(|(category, name, price, description)| {
            Product::new(
                Category::new(category).unwrap(),
                name,
                Price::new(price).unwrap(),
                description,
            )
            .unwrap()
        })
}

proptest! {
    #[test]
    fn category_accepts_non_blank_within_limit(value in category_strategy()) {
        let category = Category::new(value.clone()).unwrap();
        prop_assert_eq!(category.as_str(), value.as_str());
    }

    #[test]
    fn category_rejects_overlong(value in "[a-z]{33,80}") {
        prop_assert!(Category::new(value).is_err());
    }

    #[test]
    fn category_rejects_whitespace_only(value in "[ \t]{0,10}") {
        prop_assert!(Category::new(value).is_err());
    }

    #[test]
    fn price_rejects_negative(value in -1.0e9f64..-0.001) {
        prop_assert!(Price::new(value).is_err());
    }

    #[test]
    fn price_keeps_non_negative_value(value in price_strategy()) {
        prop_assert_eq!(Price::new(value).unwrap().value(), value);
    }

    #[test]
    fn upload_names_are_always_valid_blob_names(
        bytes in any::<[u8; 16]>(),
        file_name in ".{0,300}",
    ) {
        let prefix = Uuid::from_bytes(bytes);
        let name = BlobName::for_upload(prefix, &file_name);

        let expected_prefix = format!("{}-", prefix);
        prop_assert!(name.as_str().starts_with(&expected_prefix));
        prop_assert!(BlobName::new(name.as_str()).is_ok());
        prop_assert!(!name.as_str().contains('/'));
    }

    #[test]
    fn container_names_are_normalized(value in "[a-z0-9][a-z0-9-]{1,60}[a-z0-9]") {
        let upper = value.to_uppercase();
        let name = ContainerName::new(&upper).unwrap();
        prop_assert_eq!(name.as_str(), value.as_str());
    }

    #[test]
    fn container_size_check_matches_limit(max_kb in 1i64..10_000, size in 1u64..20_000_000) {
        let container = ContainerDefinition::from_kb(ContainerName::new("catalog").unwrap(), max_kb).unwrap();
        let limit = max_kb as u64 * 1024;

        prop_assert_eq!(container.check_size(size).is_ok(), size <= limit);
    }

    #[test]
    fn failed_merge_leaves_product_untouched(
        mut product in product_strategy(),
        name in "[a-z]{1,10}",
        bad_price in -1000.0f64..-0.01,
    ) {
        let before = product.clone();

        let result = product.apply_update(ProductUpdate {
            name: Some(name),
            price: Some(bad_price),
            ..Default::default()
        });

        prop_assert!(result.is_err());
        prop_assert_eq!(product, before);
    }

    #[test]
    fn merging_current_values_changes_nothing(mut product in product_strategy()) {
        let update = ProductUpdate {
            category: Some(product.category().to_string()),
            name: Some(product.name().to_string()),
            price: Some(product.price().value()),
            description: Some(product.description().to_string()),
        };

        let merge = product.apply_update(update).unwrap();

        prop_assert!(!merge.changed);
        prop_assert!(!merge.requires_rekey());
    }

    #[test]
    fn rekey_required_only_for_a_different_category(
        mut product in product_strategy(),
        category in category_strategy(),
    ) {
        let previous = product.category().clone();
        let id = *product.id();

        let merge = product
            .apply_update(ProductUpdate {
                category: Some(category.clone()),
                ..Default::default()
            })
            .unwrap();

        prop_assert_eq!(merge.requires_rekey(), category != previous.as_str());
        prop_assert_eq!(product.category().as_str(), category.as_str());
        prop_assert_eq!(*product.id(), id);
        if merge.requires_rekey() {
            prop_assert_eq!(merge.previous_category, Some(previous));
        }
    }

    #[test]
    fn product_ids_round_trip_through_strings(bytes in any::<[u8; 16]>()) {
        let id = ProductId::from_uuid(Uuid::from_bytes(bytes));
        let parsed: ProductId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }
}

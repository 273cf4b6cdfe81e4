//! Property tests for transient unit naming.

use chrono::NaiveDate;
use proptest::prelude::*;

use selfdeploy::infrastructure::launch::unit_name::{slugify, unit_name, MAX_SLUG_LEN};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Slugs are non-empty, bounded, lowercase and never start or end with '-'.
    #[test]
    fn property_slug_is_well_formed(s in "(?s).{0,128}") {
        let slug = slugify(&s);

        prop_assert!(!slug.is_empty());
        prop_assert!(slug.len() <= MAX_SLUG_LEN);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    /// PROPERTY: Slugifying a slug changes nothing.
    #[test]
    fn property_slug_is_idempotent(s in "[A-Za-z0-9 ._-]{0,64}") {
        let once = slugify(&s);
        prop_assert_eq!(slugify(&once), once);
    }

    /// PROPERTY: Unit names always carry the prefix and the launch time.
    #[test]
    fn property_unit_name_shape(
        s in "[A-Za-z0-9._-]{1,64}",
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let now = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(hour, minute, 5))
            .unwrap();
        let name = unit_name(&s, now);

        prop_assert!(name.starts_with("selfdeploy-"));
        let suffix = format!("-20240309-{:02}{:02}05", hour, minute);
        prop_assert!(name.ends_with(&suffix));
    }
}

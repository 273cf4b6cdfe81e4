//! Property tests for fragment placeholder substitution.

use proptest::prelude::*;

use selfdeploy::domain::entities::Variables;
use selfdeploy::infrastructure::template::{placeholders, substitute};

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z_][a-z0-9_]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Substitution never panics on arbitrary fragments.
    #[test]
    fn property_substitute_never_panics(source in "(?s).{0,256}") {
        let _ = substitute("prop", &source, &Variables::new());
    }

    /// PROPERTY: Text without braces passes through unchanged.
    #[test]
    fn property_plain_text_is_untouched(source in "[^{}]{0,256}") {
        let out = substitute("prop", &source, &Variables::new()).unwrap();
        prop_assert_eq!(out, source);
    }

    /// PROPERTY: Values are inserted verbatim and never re-scanned.
    #[test]
    fn property_values_are_inserted_once(
        key in name(),
        value in "(?s).{0,64}",
    ) {
        let mut vars = Variables::new();
        vars.insert(key.as_str(), value.as_str());
        let source = format!("before {{{{ {} }}}} after", key);

        let out = substitute("prop", &source, &vars).unwrap();

        prop_assert_eq!(out, format!("before {} after", value));
    }

    /// PROPERTY: Every reported placeholder is required, and defining them all suffices.
    #[test]
    fn property_placeholders_are_exactly_the_requirements(
        keys in proptest::collection::vec(name(), 1..6),
    ) {
        let source: String = keys.iter().map(|k| format!("x {{{{{}}}}} ", k)).collect();
        let found = placeholders(&source);

        let mut vars = Variables::new();
        for name in &found {
            vars.insert(*name, "v");
        }
        prop_assert!(substitute("prop", &source, &vars).is_ok());

        let mut partial = Variables::new();
        for name in found.iter().skip(1) {
            partial.insert(*name, "v");
        }
        prop_assert!(substitute("prop", &source, &partial).is_err());
    }
}

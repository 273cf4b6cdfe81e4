//! Property tests for shell quoting.

use proptest::prelude::*;

use selfdeploy::domain::value_objects::shell_quote;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A quoted word reaches the program as exactly one argument.
    #[cfg(unix)]
    #[test]
    fn property_quoted_word_round_trips_through_sh(word in "[^\\x00]{0,48}") {
        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("printf '%s' {}", shell_quote(&word)))
            .output()
            .unwrap();

        prop_assert!(output.status.success());
        prop_assert_eq!(String::from_utf8_lossy(&output.stdout), word);
    }

    /// PROPERTY: Words made only of safe characters are left as they are.
    #[test]
    fn property_plain_words_are_not_quoted(word in "[A-Za-z0-9_./=:,@%+-]{1,64}") {
        prop_assert_eq!(shell_quote(&word), word);
    }
}

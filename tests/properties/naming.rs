//! Property tests for service names, derived paths and port mappings.

use proptest::prelude::*;

use mastermind::domain::services::host_port;
use mastermind::domain::value_objects::sanitize;
use mastermind::{derive_paths, ServiceName};

fn word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9][A-Za-z0-9_]{0,7}").unwrap()
}

fn whitespace_run() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ \t]{1,3}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: sanitizing never leaves whitespace and is idempotent.
    #[test]
    fn property_sanitize_is_idempotent(raw in "(?s).{0,64}") {
        let once = sanitize(&raw);
        prop_assert!(!once.chars().any(char::is_whitespace));
        prop_assert_eq!(sanitize(&once), once);
    }

    /// PROPERTY: every whitespace run between words becomes exactly one hyphen.
    #[test]
    fn property_sanitize_joins_words_with_single_hyphens(
        words in proptest::collection::vec(word(), 1..5),
        gap in whitespace_run(),
        pad in whitespace_run(),
    ) {
        let raw = format!("{pad}{}{pad}", words.join(&gap));
        prop_assert_eq!(sanitize(&raw), words.join("-"));
    }

    /// PROPERTY: compose keys are derived from the sanitized name.
    #[test]
    fn property_container_and_volume_keys(words in proptest::collection::vec(word(), 1..4)) {
        let name = ServiceName::parse(&words.join(" ")).unwrap();
        let base = words.join("-");
        prop_assert_eq!(name.container_key(), format!("{}-db", base));
        prop_assert_eq!(name.volume_key(), format!("{}-data", base));
        prop_assert!(!name.database_name().contains('-'));
    }

    /// PROPERTY: the three ORM directories are siblings under root/service/orm.
    #[test]
    fn property_derived_paths_share_one_base(
        root in "\\./[a-z]{1,8}",
        service in "[a-z][a-z0-9_-]{0,10}",
    ) {
        let paths = derive_paths(&service, "Sequelize", &root);
        let base = format!("{}/{}/sequelize", root, service);
        prop_assert_eq!(paths.migrations_dir, format!("{}/migrations", base));
        prop_assert_eq!(paths.models_dir, format!("{}/models", base));
        prop_assert_eq!(paths.seeders_dir, format!("{}/seeders", base));
    }

    /// PROPERTY: the host side of `host:container` is always recovered.
    #[test]
    fn property_host_port_reads_host_side(host in any::<u16>(), container in any::<u16>()) {
        prop_assert_eq!(host_port(&format!("{}:{}", host, container)), Some(host));
        prop_assert_eq!(host_port(&format!("127.0.0.1:{}:{}", host, container)), Some(host));
    }

    /// PROPERTY: accepted names always yield container keys Docker can use.
    #[test]
    fn property_accepted_names_are_container_safe(raw in "(?s).{0,32}") {
        if let Ok(name) = ServiceName::parse(&raw) {
            let key = name.container_key();
            prop_assert!(key.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()));
            prop_assert!(key.chars().all(|c| c.is_ascii_alphanumeric() || "_.-".contains(c)));
        }
    }

    /// PROPERTY: parsing arbitrary input never panics.
    #[test]
    fn property_service_name_parse_never_panics(raw in "(?s).{0,64}") {
        let _ = ServiceName::parse(&raw);
    }
}

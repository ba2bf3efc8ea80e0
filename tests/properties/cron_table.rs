//! Property tests for cron table edits.

use proptest::prelude::*;

use mastermind::domain::services::cron_table::{jobs_for, with_line, without_jobs_for};
use mastermind::domain::services::backup_tag;

fn foreign_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9]{1,2} \\* \\* \\* \\* [a-z/]{1,16}").unwrap()
}

fn tagged(service: &str, n: usize) -> String {
    format!("0 {} * * * bash /backup.sh {} {}", n % 24, service, backup_tag(service))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: removing a service's jobs keeps every other line in order.
    #[test]
    fn property_without_jobs_keeps_foreign_lines(
        foreign in proptest::collection::vec(foreign_line(), 0..6),
        jobs in 0usize..4,
    ) {
        let mut table = foreign.join("\n");
        for n in 0..jobs {
            table = with_line(&table, &tagged("auth", n));
            table = with_line(&table, &tagged("billing", n));
        }

        prop_assert_eq!(jobs_for(&table, "auth").len(), jobs);

        let pruned = without_jobs_for(&table, "auth");
        prop_assert!(jobs_for(&pruned, "auth").is_empty());
        prop_assert_eq!(jobs_for(&pruned, "billing").len(), jobs);

        let kept: Vec<&str> = pruned
            .lines()
            .filter(|l| !l.contains("# Backup for"))
            .collect();
        prop_assert_eq!(kept, foreign.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// PROPERTY: an appended line is always listed for its service.
    #[test]
    fn property_with_line_is_listed(foreign in proptest::collection::vec(foreign_line(), 0..6)) {
        let line = tagged("auth", 3);
        let table = with_line(&foreign.join("\n"), &line);
        prop_assert_eq!(jobs_for(&table, "auth"), vec![line]);
    }
}

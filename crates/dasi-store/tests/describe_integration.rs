//! Summary rendering over stored events, against the shared wire cases.

use chrono::{NaiveDate, NaiveTime};
use dasi_store::event::{EventCategory, EventDraft};
use dasi_store::store::EventStore;

include!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../dasi-core/tests/describe_cases_data/mod.rs"
));

fn draft_with(title: &str, rule: RecurrenceRule) -> EventDraft {
    EventDraft {
        title: title.into(),
        date: NaiveDate::from_ymd_opt(2024, 10, 15).expect("valid date"),
        start_time: NaiveTime::from_hms_opt(14, 0, 0).expect("valid time"),
        end_time: NaiveTime::from_hms_opt(15, 0, 0).expect("valid time"),
        description: String::new(),
        location: String::new(),
        category: EventCategory::Work,
        repeat: rule,
        notification_time: 10,
    }
}

/// ## Summary
/// Integration-level validation of rule summaries using shared cases:
/// each wire rule must keep its exact summary after a round trip
/// through the store.
#[test_log::test]
fn describe_cases_integration() {
    let mut store = EventStore::new();
    for case in describe_cases() {
        assert_case(&case);

        let rule: RecurrenceRule = serde_json::from_str(case.repeat)
            .unwrap_or_else(|err| panic!("Failed to parse {}: {}", case.name, err));
        let event = store
            .create(draft_with(case.name, rule))
            .unwrap_or_else(|err| panic!("Failed to store {}: {}", case.name, err));
        let stored = store.get(event.id).expect("just created");
        assert_eq!(
            stored.repeat.describe().as_deref(),
            case.expected,
            "Case {} changed after storage",
            case.name
        );
    }
}

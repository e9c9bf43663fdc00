use dasi_core::recur::RecurrenceRule;

pub struct DescribeCase {
    pub name: &'static str,
    /// Wire JSON of the event's `repeat` object.
    pub repeat: &'static str,
    pub expected: Option<&'static str>,
}

pub fn describe_cases() -> Vec<DescribeCase> {
    vec![
        DescribeCase {
            name: "daily_every_2",
            repeat: r#"{"type": "daily", "interval": 2}"#,
            expected: Some("반복: 2일마다"),
        },
        DescribeCase {
            name: "daily_every_1_until",
            repeat: r#"{"type": "daily", "interval": 1, "endDate": "2025-04-01"}"#,
            expected: Some("반복: 1일마다 (종료: 2025-04-01)"),
        },
        DescribeCase {
            name: "weekly_every_3_until",
            repeat: r#"{"type": "weekly", "interval": 3, "endDate": "2024-12-01"}"#,
            expected: Some("반복: 3주마다 (종료: 2024-12-01)"),
        },
        DescribeCase {
            name: "weekly_every_2_count",
            repeat: r#"{"type": "weekly", "interval": 2, "count": 10}"#,
            expected: Some("반복: 2주마다 (10회)"),
        },
        DescribeCase {
            name: "monthly_every_2",
            repeat: r#"{"type": "monthly", "interval": 2}"#,
            expected: Some("반복: 2월마다"),
        },
        DescribeCase {
            name: "monthly_every_1",
            repeat: r#"{"type": "monthly", "interval": 1}"#,
            expected: Some("반복: 1월마다"),
        },
        DescribeCase {
            name: "yearly_every_1",
            repeat: r#"{"type": "yearly", "interval": 1}"#,
            expected: Some("반복: 1년마다"),
        },
        DescribeCase {
            name: "yearly_count_3",
            repeat: r#"{"type": "yearly", "interval": 1, "count": 3}"#,
            expected: Some("반복: 1년마다 (3회)"),
        },
        DescribeCase {
            name: "none_has_no_summary",
            repeat: r#"{"type": "none", "interval": 0}"#,
            expected: None,
        },
        DescribeCase {
            name: "single_digit_day_is_padded",
            repeat: r#"{"type": "monthly", "interval": 1, "endDate": "2025-01-05"}"#,
            expected: Some("반복: 1월마다 (종료: 2025-01-05)"),
        },
    ]
}

pub fn assert_case(case: &DescribeCase) {
    let rule: RecurrenceRule = serde_json::from_str(case.repeat)
        .unwrap_or_else(|err| panic!("Failed to parse {}: {}", case.name, err));
    assert_eq!(
        rule.describe().as_deref(),
        case.expected,
        "Case {} did not match",
        case.name
    );
}

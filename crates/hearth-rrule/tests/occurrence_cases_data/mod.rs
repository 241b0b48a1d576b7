pub struct OccurrenceCase {
    pub name: &'static str,
    pub rule: &'static str,
    /// Series anchor, `YYYY-MM-DDTHH:MM:SS`.
    pub anchor: &'static str,
    pub limit: usize,
    /// Lower bound, `YYYY-MM-DDTHH:MM:SS`.
    pub after: Option<&'static str>,
    /// Expected dates, `YYYY-MM-DD`.
    pub expected: &'static [&'static str],
    /// Whether an RFC 5545 engine produces the same dates for this rule.
    pub rfc_compatible: bool,
}

#[expect(clippy::too_many_lines)]
pub fn occurrence_cases() -> Vec<OccurrenceCase> {
    vec![
        OccurrenceCase {
            name: "daily_count",
            rule: "FREQ=DAILY;COUNT=3",
            anchor: "2025-02-01T09:30:00",
            limit: 100,
            after: None,
            expected: &["2025-02-01", "2025-02-02", "2025-02-03"],
            rfc_compatible: true,
        },
        OccurrenceCase {
            name: "daily_interval_until",
            rule: "FREQ=DAILY;INTERVAL=3;UNTIL=20250110T235959Z",
            anchor: "2025-01-01T07:00:00",
            limit: 100,
            after: None,
            expected: &["2025-01-01", "2025-01-04", "2025-01-07", "2025-01-10"],
            rfc_compatible: true,
        },
        OccurrenceCase {
            name: "weekly_byday_until",
            rule: "FREQ=WEEKLY;BYDAY=MO,WE;UNTIL=20250131T235959Z",
            anchor: "2025-01-06T09:00:00",
            limit: 50,
            after: Some("2025-01-01T00:00:00"),
            expected: &[
                "2025-01-06",
                "2025-01-08",
                "2025-01-13",
                "2025-01-15",
                "2025-01-20",
                "2025-01-22",
                "2025-01-27",
                "2025-01-29",
            ],
            rfc_compatible: true,
        },
        OccurrenceCase {
            name: "weekly_byday_count",
            rule: "FREQ=WEEKLY;COUNT=3;BYDAY=TU,TH",
            anchor: "1997-09-02T09:00:00",
            limit: 100,
            after: None,
            expected: &["1997-09-02", "1997-09-04", "1997-09-09"],
            rfc_compatible: true,
        },
        OccurrenceCase {
            name: "biweekly_byday_count",
            rule: "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR;COUNT=5",
            anchor: "2025-03-03T18:00:00",
            limit: 100,
            after: None,
            expected: &[
                "2025-03-03",
                "2025-03-07",
                "2025-03-17",
                "2025-03-21",
                "2025-03-31",
            ],
            rfc_compatible: true,
        },
        OccurrenceCase {
            name: "monthly_bymonthday_count",
            rule: "FREQ=MONTHLY;COUNT=3;BYMONTHDAY=15",
            anchor: "2025-01-15T09:00:00",
            limit: 100,
            after: None,
            expected: &["2025-01-15", "2025-02-15", "2025-03-15"],
            rfc_compatible: true,
        },
        OccurrenceCase {
            name: "monthly_last_day_clamp",
            rule: "FREQ=MONTHLY;BYMONTHDAY=31;COUNT=4",
            anchor: "2025-01-31T09:00:00",
            limit: 100,
            after: None,
            expected: &["2025-01-31", "2025-02-28", "2025-03-31", "2025-04-30"],
            rfc_compatible: false,
        },
        OccurrenceCase {
            name: "yearly_count",
            rule: "FREQ=YEARLY;COUNT=3",
            anchor: "2012-01-01T09:00:00",
            limit: 100,
            after: None,
            expected: &["2012-01-01", "2013-01-01", "2014-01-01"],
            rfc_compatible: true,
        },
        OccurrenceCase {
            name: "count_spans_lower_bound",
            rule: "FREQ=DAILY;COUNT=3",
            anchor: "2025-02-01T09:30:00",
            limit: 100,
            after: Some("2025-02-01T10:00:00"),
            expected: &["2025-02-02", "2025-02-03"],
            rfc_compatible: true,
        },
        OccurrenceCase {
            name: "limit_caps_open_series",
            rule: "FREQ=WEEKLY",
            anchor: "2025-01-05T12:00:00",
            limit: 2,
            after: None,
            expected: &["2025-01-05", "2025-01-12"],
            rfc_compatible: true,
        },
        OccurrenceCase {
            name: "until_wins_over_count",
            rule: "FREQ=DAILY;COUNT=2;UNTIL=20250104T000000Z",
            anchor: "2025-01-01T09:00:00",
            limit: 100,
            after: None,
            expected: &["2025-01-01", "2025-01-02", "2025-01-03", "2025-01-04"],
            rfc_compatible: false,
        },
        OccurrenceCase {
            name: "unknown_frequency",
            rule: "FREQ=HOURLY;COUNT=3",
            anchor: "2025-01-01T09:00:00",
            limit: 100,
            after: None,
            expected: &[],
            rfc_compatible: false,
        },
    ]
}

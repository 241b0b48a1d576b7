use chrono::{NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use hearth_rrule::rule::occurrences;
use rrule::{RRule, Tz, Unvalidated};

include!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../hearth-rrule/tests/occurrence_cases_data/mod.rs"
));

/// ## Summary
/// Integration-level validation of the generator using the shared cases.
#[test_log::test]
fn occurrence_cases_integration() {
    for case in occurrence_cases() {
        let actual = generate(&case);
        let expected: Vec<NaiveDate> = case.expected.iter().map(|d| parse_case_date(d)).collect();
        assert_eq!(actual, expected, "Case {} did not match", case.name);
    }
}

/// ## Summary
/// Every case an RFC 5545 engine can express must produce the same dates there.
#[test_log::test]
fn occurrence_cases_agree_with_rrule() {
    for case in occurrence_cases().iter().filter(|case| case.rfc_compatible) {
        assert_eq!(
            generate(case),
            rrule_dates(case),
            "Case {} disagrees with rrule",
            case.name
        );
    }
}

fn generate(case: &OccurrenceCase) -> Vec<NaiveDate> {
    occurrences(
        case.rule,
        parse_case_datetime(case.anchor),
        case.limit,
        case.after.map(parse_case_datetime),
    )
}

fn rrule_dates(case: &OccurrenceCase) -> Vec<NaiveDate> {
    let rule: RRule<Unvalidated> = case
        .rule
        .parse()
        .unwrap_or_else(|err| panic!("Failed to parse {}: {}", case.name, err));
    let dt_start = Tz::UTC.from_utc_datetime(&parse_case_datetime(case.anchor));
    let mut rrule_set = rule
        .build(dt_start)
        .unwrap_or_else(|err| panic!("Failed to build {}: {}", case.name, err));

    if let Some(after) = case.after {
        let inclusive_start = parse_case_datetime(after) - TimeDelta::seconds(1);
        rrule_set = rrule_set.after(Tz::UTC.from_utc_datetime(&inclusive_start));
    }

    let limit = u16::try_from(case.limit).unwrap_or(u16::MAX);
    rrule_set
        .all(limit)
        .dates
        .iter()
        .map(chrono::DateTime::date_naive)
        .collect()
}

fn parse_case_datetime(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .unwrap_or_else(|err| panic!("Failed to parse datetime {value}: {err}"))
}

fn parse_case_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap_or_else(|err| panic!("Failed to parse date {value}: {err}"))
}

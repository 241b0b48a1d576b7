//! End-to-end expansion of household calendars.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use hearth_calendar::{BaseEvent, DisplayWindow, EventInstance, Materializer, expand_events};
use hearth_core::config::Settings;
use hearth_rrule::rule::{RecurrencePattern, Weekday};
use hearth_test::{Chore, at, chore_event};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn january() -> DisplayWindow {
    DisplayWindow::days(date(2025, 1, 1), date(2025, 1, 31)).expect("valid window")
}

fn starts(instances: &[EventInstance<Chore>]) -> Vec<NaiveDateTime> {
    instances.iter().map(|instance| instance.start).collect()
}

#[test_log::test]
fn weekly_chore_fills_january() {
    let pattern = RecurrencePattern::weekly()
        .on_days([Weekday::Monday, Weekday::Wednesday])
        .until(date(2025, 1, 31));
    let event = chore_event("Water plants", at(2025, 1, 6, 9, 0))
        .with_pattern(&pattern)
        .expect("valid pattern");
    assert_eq!(
        event.rule(),
        Some("FREQ=WEEKLY;BYDAY=MO,WE;UNTIL=20250131T235959Z")
    );

    let instances = expand_events(std::slice::from_ref(&event), &january(), at(2025, 1, 1, 0, 0));

    let expected: Vec<NaiveDateTime> = [6, 8, 13, 15, 20, 22, 27, 29]
        .into_iter()
        .map(|day| at(2025, 1, day, 9, 0))
        .collect();
    assert_eq!(starts(&instances), expected);
    assert!(instances.iter().all(|instance| instance.payload == event.payload));
    assert!(instances.iter().all(|instance| instance.id.origin_id == event.id));
}

#[test_log::test]
fn month_end_chore_lands_on_last_days() {
    let event = chore_event("Pay rent", at(2025, 1, 31, 10, 0))
        .with_end(at(2025, 1, 31, 10, 30))
        .with_pattern(&RecurrencePattern::monthly().on_month_day(31))
        .expect("valid pattern");
    let window = DisplayWindow::days(date(2025, 1, 1), date(2025, 4, 30)).expect("valid window");

    let instances = expand_events(&[event], &window, at(2025, 1, 1, 0, 0));

    assert_eq!(
        starts(&instances),
        vec![
            at(2025, 1, 31, 10, 0),
            at(2025, 2, 28, 10, 0),
            at(2025, 3, 31, 10, 0),
            at(2025, 4, 30, 10, 0),
        ]
    );
    for instance in &instances {
        assert_eq!(
            instance.end.map(|end| end - instance.start),
            Some(TimeDelta::minutes(30))
        );
    }
}

#[test_log::test]
fn household_calendar_merges_series_and_one_offs() {
    let events = vec![
        chore_event("Bins", at(2024, 11, 7, 19, 0))
            .with_rule("FREQ=WEEKLY")
            .with_end(at(2024, 11, 7, 19, 10)),
        chore_event("Boiler service", at(2025, 1, 14, 8, 0)),
        chore_event("Swimming lessons", at(2024, 9, 1, 17, 0)).with_rule("FREQ=WEEKLY;COUNT=10"),
        chore_event("Legacy import", at(2025, 1, 20, 12, 0)).with_rule("FREQ=FORTNIGHTLY"),
    ];

    let instances = expand_events(&events, &january(), at(2025, 1, 1, 0, 0));

    let titles: Vec<(&str, NaiveDateTime)> = instances
        .iter()
        .map(|instance| (instance.payload.title.as_str(), instance.start))
        .collect();
    assert_eq!(
        titles,
        vec![
            ("Bins", at(2025, 1, 2, 19, 0)),
            ("Bins", at(2025, 1, 9, 19, 0)),
            ("Boiler service", at(2025, 1, 14, 8, 0)),
            ("Bins", at(2025, 1, 16, 19, 0)),
            ("Legacy import", at(2025, 1, 20, 12, 0)),
            ("Bins", at(2025, 1, 23, 19, 0)),
            ("Bins", at(2025, 1, 30, 19, 0)),
        ]
    );
}

#[test_log::test]
fn configured_cap_bounds_each_series() {
    let settings = Settings::from_toml_str("[recurrence]\nexpansion_cap = 3\n").expect("valid settings");
    let materializer = Materializer::from_config(&settings.recurrence).expect("valid bounds");
    let events = [
        chore_event("Feed cat", at(2025, 1, 1, 7, 0)).with_rule("FREQ=DAILY"),
        chore_event("Walk dog", at(2025, 1, 1, 18, 0)).with_rule("FREQ=DAILY"),
    ];

    let instances = materializer.expand(&events, &january(), at(2025, 1, 1, 0, 0));

    assert_eq!(instances.len(), 6);
}

#[test]
fn instances_serialize_with_flattened_payload() {
    let event = BaseEvent::new(
        "laundry",
        at(2025, 1, 4, 10, 0),
        Chore::new("Laundry").assigned_to("Sam"),
    )
    .with_rule("FREQ=WEEKLY;COUNT=1");

    let instances = expand_events(&[event], &january(), at(2025, 1, 1, 0, 0));
    let json = serde_json::to_value(&instances).expect("serializable");

    assert_eq!(
        json,
        serde_json::json!([{
            "id": "laundry@1735984800000",
            "start": "2025-01-04T10:00:00",
            "rule": "FREQ=WEEKLY;COUNT=1",
            "title": "Laundry",
            "assignee": "Sam",
        }])
    );
}

#[test]
fn concurrent_expansions_agree() {
    let events: Vec<BaseEvent<Chore>> = (0..20_u32)
        .map(|i| {
            chore_event("Chore", at(2024, 12, 1 + i, 8, 0))
                .with_rule(if i % 2 == 0 {
                    "FREQ=DAILY;INTERVAL=3"
                } else {
                    "FREQ=WEEKLY;BYDAY=TU,SA"
                })
        })
        .collect();
    let window = january();
    let now = at(2025, 1, 1, 0, 0);
    let expected = expand_events(&events, &window, now);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| expand_events(&events, &window, now)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("expansion thread"), expected);
        }
    });
}

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::models::{DaySchedule, TimeSlot, WeeklySchedule};

/// Fixed booking granularity. Every slot is a half-open 30-minute interval
/// starting at the emitted time.
pub const SLOT_MINUTES: u32 = 30;

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Full weekday name for a calendar date (Gregorian, locale-independent).
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => WEEKDAY_NAMES[0],
        Weekday::Mon => WEEKDAY_NAMES[1],
        Weekday::Tue => WEEKDAY_NAMES[2],
        Weekday::Wed => WEEKDAY_NAMES[3],
        Weekday::Thu => WEEKDAY_NAMES[4],
        Weekday::Fri => WEEKDAY_NAMES[5],
        Weekday::Sat => WEEKDAY_NAMES[6],
    }
}

/// Compute the bookable start times for `date` from a doctor's weekly
/// schedule. A day that is absent, disabled, or carries missing or
/// unparseable times yields no slots; there is no error path. Only full
/// 30-minute slots that fit before the closing time are emitted, so a
/// window shorter than one slot produces nothing and `start >= end` is
/// treated as misconfigured rather than wrapping past midnight.
pub fn available_slots(schedule: &WeeklySchedule, date: NaiveDate) -> Vec<TimeSlot> {
    let day_name = weekday_name(date);

    let Some(day) = schedule.day(day_name) else {
        return Vec::new();
    };
    if !day.enabled {
        return Vec::new();
    }

    let (Some(start_raw), Some(end_raw)) = (day.start.as_deref(), day.end.as_deref()) else {
        return Vec::new();
    };
    let (Some(start), Some(end)) = (parse_minutes(start_raw), parse_minutes(end_raw)) else {
        debug!("Unparseable schedule times for {}: treating as closed", day_name);
        return Vec::new();
    };

    let mut slots = Vec::new();
    let mut current = start;
    while current + SLOT_MINUTES <= end {
        slots.push(format_minutes(current));
        current += SLOT_MINUTES;
    }

    slots
}

/// Validate a schedule before persisting it: day names must be real weekday
/// names, and every enabled day needs parseable times with `start < end`.
pub fn validate_schedule(schedule: &WeeklySchedule) -> Result<(), String> {
    for (day_name, day) in &schedule.0 {
        if !WEEKDAY_NAMES.contains(&day_name.as_str()) {
            return Err(format!("Unknown weekday name: {}", day_name));
        }
        if !day.enabled {
            continue;
        }

        let (Some(start_raw), Some(end_raw)) = (day.start.as_deref(), day.end.as_deref()) else {
            return Err(format!("{} is enabled but missing start or end time", day_name));
        };
        let (Some(start), Some(end)) = (parse_minutes(start_raw), parse_minutes(end_raw)) else {
            return Err(format!("{} has unparseable times", day_name));
        };
        if start >= end {
            return Err(format!("{} start time must be before end time", day_name));
        }
    }
    Ok(())
}

/// Parse "HH:MM" into minutes since midnight. Minute-of-day arithmetic keeps
/// the enumeration loop free of midnight wrap-around.
fn parse_minutes(raw: &str) -> Option<u32> {
    let (hours, minutes) = raw.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

fn format_minutes(total: u32) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DaySchedule;
    use std::collections::HashMap;

    fn schedule_for(day: &str, enabled: bool, start: &str, end: &str) -> WeeklySchedule {
        let mut days = HashMap::new();
        days.insert(
            day.to_string(),
            DaySchedule {
                enabled,
                start: Some(start.to_string()),
                end: Some(end.to_string()),
            },
        );
        WeeklySchedule(days)
    }

    // 2026-08-03 is a Monday.
    const MONDAY: &str = "2026-08-03";

    fn monday() -> NaiveDate {
        MONDAY.parse().unwrap()
    }

    #[test]
    fn full_working_day_yields_sixteen_slots() {
        let schedule = schedule_for("Monday", true, "09:00", "17:00");
        let slots = available_slots(&schedule, monday());

        assert_eq!(slots.len(), 16);
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("16:30"));
        assert!(!slots.contains(&"17:00".to_string()));
    }

    #[test]
    fn disabled_day_yields_no_slots() {
        let schedule = schedule_for("Monday", false, "09:00", "17:00");
        assert!(available_slots(&schedule, monday()).is_empty());
    }

    #[test]
    fn absent_day_yields_no_slots() {
        let schedule = schedule_for("Tuesday", true, "09:00", "17:00");
        assert!(available_slots(&schedule, monday()).is_empty());
    }

    #[test]
    fn window_shorter_than_one_slot_yields_nothing() {
        let schedule = schedule_for("Monday", true, "09:00", "09:15");
        assert!(available_slots(&schedule, monday()).is_empty());
    }

    #[test]
    fn partial_final_period_is_not_emitted() {
        let schedule = schedule_for("Monday", true, "09:00", "17:15");
        let slots = available_slots(&schedule, monday());

        assert_eq!(slots.last().map(String::as_str), Some("16:30"));
        assert!(!slots.contains(&"17:00".to_string()));
    }

    #[test]
    fn equal_start_and_end_yields_nothing() {
        let schedule = schedule_for("Monday", true, "09:00", "09:00");
        assert!(available_slots(&schedule, monday()).is_empty());
    }

    #[test]
    fn inverted_window_does_not_wrap_past_midnight() {
        let schedule = schedule_for("Monday", true, "17:00", "09:00");
        assert!(available_slots(&schedule, monday()).is_empty());
    }

    #[test]
    fn unparseable_times_degrade_to_closed() {
        let schedule = schedule_for("Monday", true, "nine", "17:00");
        assert!(available_slots(&schedule, monday()).is_empty());
    }

    #[test]
    fn missing_times_degrade_to_closed() {
        let mut days = HashMap::new();
        days.insert(
            "Monday".to_string(),
            DaySchedule {
                enabled: true,
                start: None,
                end: None,
            },
        );
        assert!(available_slots(&WeeklySchedule(days), monday()).is_empty());
    }

    #[test]
    fn slots_are_ordered_and_duplicate_free() {
        let schedule = schedule_for("Monday", true, "08:30", "12:00");
        let slots = available_slots(&schedule, monday());

        let mut sorted = slots.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(slots, sorted);
        assert_eq!(slots.first().map(String::as_str), Some("08:30"));
        assert_eq!(slots.last().map(String::as_str), Some("11:30"));
    }

    #[test]
    fn weekday_resolution_follows_the_calendar() {
        assert_eq!(weekday_name(monday()), "Monday");
        assert_eq!(weekday_name("2026-08-09".parse().unwrap()), "Sunday");
        assert_eq!(weekday_name("2026-08-08".parse().unwrap()), "Saturday");
    }

    #[test]
    fn validate_rejects_inverted_window() {
        let schedule = schedule_for("Monday", true, "17:00", "09:00");
        assert!(validate_schedule(&schedule).is_err());
    }

    #[test]
    fn validate_rejects_unknown_day_name() {
        let schedule = schedule_for("Moonday", true, "09:00", "17:00");
        assert!(validate_schedule(&schedule).is_err());
    }

    #[test]
    fn validate_accepts_disabled_day_without_times() {
        let mut days = HashMap::new();
        days.insert(
            "Friday".to_string(),
            DaySchedule {
                enabled: false,
                start: None,
                end: None,
            },
        );
        assert!(validate_schedule(&WeeklySchedule(days)).is_ok());
    }
}

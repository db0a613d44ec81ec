//! Booking window rules and appointment flow tests

use assert_matches::assert_matches;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use pretty_assertions::assert_eq;
use test_log::test;

use hemora::booking::{
    date_bookable, next_bookable_date, BookingError, BookingStep, BookingWizard, TIME_SLOTS,
};

use crate::common::test_data;

fn monday() -> NaiveDate {
    let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    assert_eq!(date.weekday(), Weekday::Mon);
    date
}

#[test]
fn test_past_dates_not_bookable() {
    let today = monday();
    assert!(!date_bookable(today - Duration::days(1), today, 30));
    assert!(date_bookable(today, today, 30));
}

#[test]
fn test_window_boundary() {
    let today = monday();
    // Day 30 is a Wednesday, day 31 falls outside the window
    assert!(date_bookable(today + Duration::days(30), today, 30));
    assert!(!date_bookable(today + Duration::days(31), today, 30));
}

#[test]
fn test_sundays_closed() {
    let today = monday();
    for offset in 0..30 {
        let date = today + Duration::days(offset);
        if date.weekday() == Weekday::Sun {
            assert!(!date_bookable(date, today, 30), "{} is a Sunday", date);
        }
    }
}

#[test]
fn test_next_bookable_from_saturday_is_monday() {
    let today = monday();
    let saturday = today + Duration::days(5);
    assert_eq!(saturday.weekday(), Weekday::Sat);
    assert_eq!(
        next_bookable_date(saturday + Duration::days(1), today, 30),
        Some(saturday + Duration::days(2))
    );
}

#[test]
fn test_scheduling_requires_center_first() {
    let mut wizard = BookingWizard::new(vec![test_data::sample_center()], 30);
    assert_matches!(
        wizard.choose_date(monday(), monday()),
        Err(BookingError::CenterRequired)
    );
}

#[test]
fn test_unavailable_date_rejected_with_window() {
    let mut wizard = BookingWizard::new(vec![test_data::sample_center()], 30);
    wizard.select_center(0).unwrap();

    let sunday = monday() + Duration::days(6);
    assert_eq!(sunday.weekday(), Weekday::Sun);
    assert_matches!(
        wizard.choose_date(sunday, monday()),
        Err(BookingError::DateUnavailable { window_days: 30, .. })
    );
}

#[test]
fn test_full_booking_flow() {
    let mut wizard = BookingWizard::new(vec![test_data::sample_center()], 30);
    assert_eq!(wizard.step(), BookingStep::Center);

    wizard.select_center(0).unwrap();
    assert_eq!(wizard.step(), BookingStep::Schedule);

    wizard.choose_date(monday() + Duration::days(2), monday()).unwrap();
    wizard.choose_slot(3).unwrap();
    wizard.confirm_schedule().unwrap();
    assert_eq!(wizard.step(), BookingStep::Confirmation);

    let confirmation = wizard.confirm(987_654_321).unwrap();
    assert_eq!(confirmation.booking_id, "BD654321");
    assert_eq!(confirmation.time_slot, TIME_SLOTS[3]);
    assert_eq!(confirmation.center.name, "Test Community Blood Center");
}

#[test]
fn test_back_navigation_through_booking() {
    let mut wizard = BookingWizard::new(vec![test_data::sample_center()], 30);
    wizard.select_center(0).unwrap();
    wizard.choose_date(monday() + Duration::days(1), monday()).unwrap();
    wizard.choose_slot(0).unwrap();
    wizard.confirm_schedule().unwrap();

    assert_eq!(wizard.back(), Some(BookingStep::Schedule));
    assert_eq!(wizard.back(), Some(BookingStep::Center));
    assert_eq!(wizard.back(), None);
}

#[test]
fn test_out_of_range_slot_rejected() {
    let mut wizard = BookingWizard::new(vec![test_data::sample_center()], 30);
    wizard.select_center(0).unwrap();
    assert_matches!(
        wizard.choose_slot(TIME_SLOTS.len()),
        Err(BookingError::UnknownSlot(_))
    );
}

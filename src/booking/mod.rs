//! Appointment booking flow: pick a donation center, then a date and
//! time slot within the booking window, then confirm. Confirmation
//! emits a `BookingConfirmation` with a mock "BD" booking id.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use thiserror::Error;

use crate::models::{confirmation_id, BookingConfirmation, DonationCenter};

/// Appointment slots offered at every center
pub const TIME_SLOTS: [&str; 9] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
    "5:00 PM",
];

/// How far ahead appointments can be booked, in days
pub const DEFAULT_BOOKING_WINDOW_DAYS: i64 = 30;

/// The booking flow's three sequential steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    Center,
    Schedule,
    Confirmation,
}

impl BookingStep {
    pub fn title(&self) -> &'static str {
        match self {
            BookingStep::Center => "Select Center",
            BookingStep::Schedule => "Date & Time",
            BookingStep::Confirmation => "Confirmation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    #[error("no donation center with index {0}")]
    UnknownCenter(usize),
    #[error("no time slot with index {0}")]
    UnknownSlot(usize),
    #[error("{date} is not bookable (closed Sundays; book up to {window_days} days ahead)")]
    DateUnavailable { date: NaiveDate, window_days: i64 },
    #[error("select a center before scheduling")]
    CenterRequired,
    #[error("select a date and time before confirming")]
    ScheduleIncomplete,
}

/// A date is bookable if it is not in the past, lies within the booking
/// window, and is not a Sunday (centers are closed)
pub fn date_bookable(date: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
    date >= today && date <= today + Duration::days(window_days) && date.weekday() != Weekday::Sun
}

/// First bookable date on or after `from`
pub fn next_bookable_date(from: NaiveDate, today: NaiveDate, window_days: i64) -> Option<NaiveDate> {
    let mut date = from.max(today);
    while date <= today + Duration::days(window_days) {
        if date_bookable(date, today, window_days) {
            return Some(date);
        }
        date += Duration::days(1);
    }
    None
}

/// Appointment booking state machine. The center roster comes from the
/// host; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    centers: Vec<DonationCenter>,
    window_days: i64,
    step: BookingStep,
    selected_center: Option<usize>,
    date: Option<NaiveDate>,
    time_slot: Option<usize>,
}

impl BookingWizard {
    pub fn new(centers: Vec<DonationCenter>, window_days: i64) -> Self {
        Self {
            centers,
            window_days,
            step: BookingStep::Center,
            selected_center: None,
            date: None,
            time_slot: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn centers(&self) -> &[DonationCenter] {
        &self.centers
    }

    pub fn window_days(&self) -> i64 {
        self.window_days
    }

    pub fn selected_center(&self) -> Option<&DonationCenter> {
        self.selected_center.and_then(|i| self.centers.get(i))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time_slot(&self) -> Option<&'static str> {
        self.time_slot.map(|i| TIME_SLOTS[i])
    }

    /// Choose a center and move on to scheduling
    pub fn select_center(&mut self, index: usize) -> Result<(), BookingError> {
        if index >= self.centers.len() {
            return Err(BookingError::UnknownCenter(index));
        }
        self.selected_center = Some(index);
        self.step = BookingStep::Schedule;
        Ok(())
    }

    pub fn choose_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), BookingError> {
        if self.selected_center.is_none() {
            return Err(BookingError::CenterRequired);
        }
        if !date_bookable(date, today, self.window_days) {
            return Err(BookingError::DateUnavailable {
                date,
                window_days: self.window_days,
            });
        }
        self.date = Some(date);
        Ok(())
    }

    pub fn choose_slot(&mut self, index: usize) -> Result<(), BookingError> {
        if index >= TIME_SLOTS.len() {
            return Err(BookingError::UnknownSlot(index));
        }
        self.time_slot = Some(index);
        Ok(())
    }

    /// Move to the confirmation step once both date and slot are chosen
    pub fn confirm_schedule(&mut self) -> Result<(), BookingError> {
        if self.date.is_none() || self.time_slot.is_none() {
            return Err(BookingError::ScheduleIncomplete);
        }
        self.step = BookingStep::Confirmation;
        Ok(())
    }

    /// Move back one step; `None` from the first step
    pub fn back(&mut self) -> Option<BookingStep> {
        let prev = match self.step {
            BookingStep::Center => return None,
            BookingStep::Schedule => BookingStep::Center,
            BookingStep::Confirmation => BookingStep::Schedule,
        };
        self.step = prev;
        Some(prev)
    }

    /// Emit the confirmed appointment. `timestamp_millis` feeds the mock
    /// booking id.
    pub fn confirm(&self, timestamp_millis: i64) -> Result<BookingConfirmation, BookingError> {
        let center = self
            .selected_center()
            .ok_or(BookingError::CenterRequired)?
            .clone();
        let (date, slot) = match (self.date, self.time_slot) {
            (Some(date), Some(slot)) => (date, slot),
            _ => return Err(BookingError::ScheduleIncomplete),
        };

        Ok(BookingConfirmation {
            center,
            date,
            time_slot: TIME_SLOTS[slot].to_string(),
            booking_id: confirmation_id("BD", timestamp_millis),
        })
    }
}

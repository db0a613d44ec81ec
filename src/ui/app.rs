use anyhow::Result;
use chrono::{NaiveDate, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use tracing::info;

use crate::booking::{next_bookable_date, BookingStep, BookingWizard, TIME_SLOTS};
use crate::models::{
    BloodGroup, BookingConfirmation, Config, DonationCenter, DonorRecord, ScreeningQuestion,
};
use crate::registration::{RegistrationWizard, SessionOutcome, Step};
use crate::request::{BloodRequest, BloodRequestForm, UrgencyLevel};
use crate::ui::input::{apply_key, FieldCursor};
use crate::ui::screens;

/// Number of editable text fields on the personal-info step
pub const PERSONAL_FIELDS: usize = 6;
/// Rows on the blood-request form: patient, hospital, blood types,
/// units, urgency, phone, additional info
pub const REQUEST_FIELDS: usize = 7;

/// Focus positions of the request form's two picker rows
pub const REQUEST_BLOOD_ROW: usize = 2;
pub const REQUEST_URGENCY_ROW: usize = 4;

/// Top-level screens, mirroring the donor journey: the home menu leads
/// into registration, which chains into booking, which ends on the
/// success page; the request form is a separate branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Registration,
    Booking,
    BookingSuccess,
    RequestBlood,
    RequestSuccess,
}

const MENU_ITEMS: [&str; 3] = ["Donate Now", "Request Blood", "Quit"];

pub struct HemoraApp {
    pub config: Config,
    pub screen: Screen,
    pub menu_index: usize,

    pub registration: RegistrationWizard,
    pub personal_focus: FieldCursor,
    pub blood_index: usize,
    pub question_index: usize,

    pub booking: Option<BookingWizard>,
    pub center_index: usize,
    pub schedule_date: Option<NaiveDate>,
    pub slot_index: usize,

    pub donor: Option<DonorRecord>,
    pub confirmation: Option<BookingConfirmation>,

    pub request_form: BloodRequestForm,
    pub request_focus: FieldCursor,
    pub request_blood_index: usize,
    pub request: Option<BloodRequest>,

    pub status: Option<String>,
    pub should_quit: bool,
}

impl HemoraApp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            screen: Screen::Home,
            menu_index: 0,
            registration: RegistrationWizard::new(),
            personal_focus: FieldCursor::new(PERSONAL_FIELDS),
            blood_index: 0,
            question_index: 0,
            booking: None,
            center_index: 0,
            schedule_date: None,
            slot_index: 0,
            donor: None,
            confirmation: None,
            request_form: BloodRequestForm::new(),
            request_focus: FieldCursor::new(REQUEST_FIELDS),
            request_blood_index: 0,
            request: None,
            status: None,
            should_quit: false,
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        match self.screen {
            Screen::Home => screens::render_home(self, f),
            Screen::Registration => screens::render_registration(self, f),
            Screen::Booking => screens::render_booking(self, f),
            Screen::BookingSuccess => screens::render_booking_success(self, f),
            Screen::RequestBlood => screens::render_request(self, f),
            Screen::RequestSuccess => screens::render_request_success(self, f),
        }
    }

    pub fn handle_key_event(&mut self, key: KeyCode) -> Result<()> {
        self.status = None;
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Registration => self.handle_registration_key(key),
            Screen::Booking => self.handle_booking_key(key),
            Screen::BookingSuccess => self.handle_booking_success_key(key)?,
            Screen::RequestBlood => self.handle_request_key(key),
            Screen::RequestSuccess => {
                if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                    self.reset_journey();
                }
            }
        }
        Ok(())
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Up => {
                self.menu_index = if self.menu_index == 0 {
                    MENU_ITEMS.len() - 1
                } else {
                    self.menu_index - 1
                };
            }
            KeyCode::Down => {
                self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
            }
            KeyCode::Enter => match self.menu_index {
                0 => {
                    self.registration = RegistrationWizard::new();
                    self.personal_focus.reset();
                    self.screen = Screen::Registration;
                }
                1 => {
                    self.request_form = BloodRequestForm::new();
                    self.request_focus.reset();
                    self.screen = Screen::RequestBlood;
                }
                _ => self.should_quit = true,
            },
            _ => {}
        }
    }

    fn handle_registration_key(&mut self, key: KeyCode) {
        if key == KeyCode::Esc {
            if self.registration.back().is_none() {
                // Leaving from the first step abandons the session
                let outcome = SessionOutcome::Cancelled;
                info!("registration session ended: {:?}", outcome);
                self.screen = Screen::Home;
            }
            return;
        }

        let today = Utc::now().date_naive();
        match self.registration.step() {
            Step::PersonalInfo => match key {
                KeyCode::Tab | KeyCode::Down => self.personal_focus.next(),
                KeyCode::BackTab | KeyCode::Up => self.personal_focus.prev(),
                KeyCode::Enter => {
                    let _ = self.registration.advance(today);
                }
                other => {
                    let index = self.personal_focus.index();
                    let personal = &mut self.registration.draft_mut().personal;
                    let field = match index {
                        0 => &mut personal.first_name,
                        1 => &mut personal.last_name,
                        2 => &mut personal.age,
                        3 => &mut personal.phone,
                        4 => &mut personal.email,
                        _ => &mut personal.location,
                    };
                    apply_key(field, other);
                }
            },
            Step::BloodGroup => match key {
                KeyCode::Up | KeyCode::Left => {
                    self.blood_index = if self.blood_index == 0 {
                        BloodGroup::ALL.len() - 1
                    } else {
                        self.blood_index - 1
                    };
                }
                KeyCode::Down | KeyCode::Right => {
                    self.blood_index = (self.blood_index + 1) % BloodGroup::ALL.len();
                }
                KeyCode::Char(' ') => {
                    self.registration.draft_mut().blood_group =
                        Some(BloodGroup::ALL[self.blood_index]);
                }
                KeyCode::Enter => {
                    let _ = self.registration.advance(today);
                }
                _ => {}
            },
            Step::HealthScreening => match key {
                KeyCode::Up => {
                    self.question_index = if self.question_index == 0 {
                        ScreeningQuestion::ALL.len() - 1
                    } else {
                        self.question_index - 1
                    };
                }
                KeyCode::Down => {
                    self.question_index = (self.question_index + 1) % ScreeningQuestion::ALL.len();
                }
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    let question = ScreeningQuestion::ALL[self.question_index];
                    self.registration.draft_mut().screening.answer(question, true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    let question = ScreeningQuestion::ALL[self.question_index];
                    self.registration
                        .draft_mut()
                        .screening
                        .answer(question, false);
                }
                KeyCode::Enter => {
                    let _ = self.registration.advance(today);
                }
                _ => {}
            },
            Step::Consent => match key {
                KeyCode::Char(' ') | KeyCode::Char('c') | KeyCode::Char('C') => {
                    let draft = self.registration.draft_mut();
                    draft.consent = !draft.consent;
                }
                KeyCode::Enter => match self.registration.submit(today) {
                    Ok(record) => {
                        info!(
                            "registration completed for {} {}",
                            record.personal_info.first_name, record.personal_info.last_name
                        );
                        self.donor = Some(record);
                        self.start_booking(today);
                    }
                    Err(err) => {
                        self.status = Some(err.to_string());
                    }
                },
                _ => {}
            },
        }
    }

    fn start_booking(&mut self, today: NaiveDate) {
        let window = self.config.booking_window_days;
        self.booking = Some(BookingWizard::new(sample_centers(), window));
        self.center_index = 0;
        self.slot_index = 0;
        self.schedule_date = next_bookable_date(today, today, window);
        self.screen = Screen::Booking;
    }

    fn handle_booking_key(&mut self, key: KeyCode) {
        let today = Utc::now().date_naive();
        let window = self.config.booking_window_days;
        let Some(booking) = self.booking.as_mut() else {
            self.screen = Screen::Home;
            return;
        };

        if key == KeyCode::Esc {
            if booking.back().is_none() {
                // Back out of booking into the completed registration
                self.screen = Screen::Registration;
            }
            return;
        }

        match booking.step() {
            BookingStep::Center => match key {
                KeyCode::Up => {
                    let count = booking.centers().len();
                    self.center_index = if self.center_index == 0 {
                        count - 1
                    } else {
                        self.center_index - 1
                    };
                }
                KeyCode::Down => {
                    self.center_index = (self.center_index + 1) % booking.centers().len();
                }
                KeyCode::Enter => {
                    if let Err(err) = booking.select_center(self.center_index) {
                        self.status = Some(err.to_string());
                    }
                }
                _ => {}
            },
            BookingStep::Schedule => match key {
                KeyCode::Left => {
                    if let Some(date) = self.schedule_date {
                        self.schedule_date = Some(date - chrono::Duration::days(1));
                    }
                }
                KeyCode::Right => {
                    if let Some(date) = self.schedule_date {
                        self.schedule_date = Some(date + chrono::Duration::days(1));
                    }
                }
                KeyCode::Up => {
                    self.slot_index = if self.slot_index == 0 {
                        TIME_SLOTS.len() - 1
                    } else {
                        self.slot_index - 1
                    };
                }
                KeyCode::Down => {
                    self.slot_index = (self.slot_index + 1) % TIME_SLOTS.len();
                }
                KeyCode::Enter => {
                    let chosen = self
                        .schedule_date
                        .or_else(|| next_bookable_date(today, today, window));
                    let Some(date) = chosen else {
                        self.status = Some("no bookable date in the window".to_string());
                        return;
                    };
                    if let Err(err) = booking.choose_date(date, today) {
                        self.status = Some(err.to_string());
                        return;
                    }
                    if let Err(err) = booking.choose_slot(self.slot_index) {
                        self.status = Some(err.to_string());
                        return;
                    }
                    if let Err(err) = booking.confirm_schedule() {
                        self.status = Some(err.to_string());
                    }
                }
                _ => {}
            },
            BookingStep::Confirmation => {
                if key == KeyCode::Enter {
                    match booking.confirm(Utc::now().timestamp_millis()) {
                        Ok(confirmation) => {
                            info!("appointment booked: {}", confirmation.booking_id);
                            self.confirmation = Some(confirmation);
                            self.screen = Screen::BookingSuccess;
                        }
                        Err(err) => self.status = Some(err.to_string()),
                    }
                }
            }
        }
    }

    fn handle_booking_success_key(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(path) = self.export_confirmation()? {
                    self.status = Some(format!("Saved appointment details to {}", path));
                }
            }
            KeyCode::Enter | KeyCode::Esc => self.reset_journey(),
            _ => {}
        }
        Ok(())
    }

    /// Write the confirmation as JSON, the TUI stand-in for the
    /// "Download Details" button
    fn export_confirmation(&self) -> Result<Option<String>> {
        let Some(confirmation) = &self.confirmation else {
            return Ok(None);
        };
        let path = format!("hemora-booking-{}.json", confirmation.booking_id);
        let json = serde_json::to_string_pretty(confirmation)?;
        std::fs::write(&path, json)?;
        info!("exported booking confirmation to {}", path);
        Ok(Some(path))
    }

    fn handle_request_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.screen = Screen::Home,
            KeyCode::Tab | KeyCode::Down => self.request_focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.request_focus.prev(),
            KeyCode::Enter => match self.request_form.submit(Utc::now().timestamp_millis()) {
                Ok(request) => {
                    info!("blood request submitted: {}", request.request_id);
                    self.request = Some(request);
                    self.screen = Screen::RequestSuccess;
                }
                Err(errors) => {
                    self.status = Some(errors.to_string());
                }
            },
            other => match self.request_focus.index() {
                REQUEST_BLOOD_ROW => match other {
                    KeyCode::Left => {
                        self.request_blood_index = if self.request_blood_index == 0 {
                            BloodGroup::ALL.len() - 1
                        } else {
                            self.request_blood_index - 1
                        };
                    }
                    KeyCode::Right => {
                        self.request_blood_index =
                            (self.request_blood_index + 1) % BloodGroup::ALL.len();
                    }
                    KeyCode::Char(' ') => {
                        self.request_form
                            .toggle_blood_type(BloodGroup::ALL[self.request_blood_index]);
                    }
                    _ => {}
                },
                REQUEST_URGENCY_ROW => match other {
                    KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                        let next = match self.request_form.urgency {
                            None => UrgencyLevel::ALL[0],
                            Some(current) => {
                                let pos = UrgencyLevel::ALL
                                    .iter()
                                    .position(|u| *u == current)
                                    .unwrap_or(0);
                                UrgencyLevel::ALL[(pos + 1) % UrgencyLevel::ALL.len()]
                            }
                        };
                        self.request_form.urgency = Some(next);
                    }
                    _ => {}
                },
                index => {
                    let form = &mut self.request_form;
                    let field = match index {
                        0 => &mut form.patient_name,
                        1 => &mut form.hospital,
                        3 => &mut form.units_needed,
                        5 => &mut form.contact_phone,
                        _ => &mut form.additional_info,
                    };
                    apply_key(field, other);
                }
            },
        }
    }

    /// Discard all in-memory journey state and return to the home menu
    fn reset_journey(&mut self) {
        self.registration = RegistrationWizard::new();
        self.personal_focus.reset();
        self.blood_index = 0;
        self.question_index = 0;
        self.booking = None;
        self.donor = None;
        self.confirmation = None;
        self.request_form = BloodRequestForm::new();
        self.request_focus.reset();
        self.request_blood_index = 0;
        self.request = None;
        self.screen = Screen::Home;
        self.menu_index = 0;
    }
}

/// Sample center roster for the demo host. The booking flow itself
/// takes whatever roster its caller provides.
pub fn sample_centers() -> Vec<DonationCenter> {
    vec![
        DonationCenter {
            id: "1".to_string(),
            name: "Central Community Blood Center".to_string(),
            address: "123 Main St, Downtown".to_string(),
            distance_miles: 0.8,
            slots_available: 12,
            rating: 4.8,
            features: vec![
                "Parking Available".to_string(),
                "Wheelchair Accessible".to_string(),
                "Free WiFi".to_string(),
            ],
        },
        DonationCenter {
            id: "2".to_string(),
            name: "Mercy Hospital Blood Drive".to_string(),
            address: "456 Hospital Ave, Medical District".to_string(),
            distance_miles: 1.2,
            slots_available: 8,
            rating: 4.6,
            features: vec![
                "Express Donation".to_string(),
                "Parking Available".to_string(),
                "Snack Bar".to_string(),
            ],
        },
        DonationCenter {
            id: "3".to_string(),
            name: "University Health Center".to_string(),
            address: "789 Campus Dr, University Area".to_string(),
            distance_miles: 2.1,
            slots_available: 15,
            rating: 4.7,
            features: vec![
                "Student Discounts".to_string(),
                "Free Parking".to_string(),
                "Modern Facility".to_string(),
            ],
        },
    ]
}

/// Run the main TUI application
pub fn run_app(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = HemoraApp::new(config);

    // Main application loop
    let result = loop {
        if let Err(e) = terminal.draw(|f| app.draw(f)) {
            break Err(e.into());
        }

        if let Ok(Event::Key(key)) = event::read() {
            if key.kind == KeyEventKind::Press {
                if let Err(e) = app.handle_key_event(key.code) {
                    break Err(e);
                }

                if app.should_quit {
                    break Ok(());
                }
            }
        }
    };

    // Cleanup terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

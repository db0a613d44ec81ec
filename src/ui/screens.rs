use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::booking::{date_bookable, BookingStep, TIME_SLOTS};
use crate::models::{BloodGroup, ScreeningQuestion};
use crate::registration::{EligibilityVerdict, Step};
use crate::ui::app::{HemoraApp, REQUEST_BLOOD_ROW, REQUEST_URGENCY_ROW};

const PERSONAL_LABELS: [&str; 6] = [
    "First Name",
    "Last Name",
    "Age",
    "Phone Number",
    "Email Address",
    "Location/City",
];

const PERSONAL_ERROR_KEYS: [&str; 6] = ["first_name", "last_name", "age", "phone", "email", "location"];

fn frame_chunks(f: &Frame) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(f.area())
}

fn render_header(f: &mut Frame, area: Rect, title: &str) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled("Hemora", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" — "),
        Span::raw(title.to_string()),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect, hint: &str, status: Option<&str>) {
    let line = match status {
        Some(message) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::Gray),
        )),
    };
    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

pub fn render_home(app: &HemoraApp, f: &mut Frame) {
    let chunks = frame_chunks(f);
    render_header(f, chunks[0], "Donate Blood, Save Lives");

    let items: Vec<ListItem> = ["Donate Now", "Request Blood", "Quit"]
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if i == app.menu_index {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(format!("  {}", label), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help us save lives by becoming a registered donor"),
    );
    f.render_widget(list, chunks[1]);

    render_footer(
        f,
        chunks[2],
        "Up/Down to choose • Enter to select • Q to quit",
        app.status.as_deref(),
    );
}

pub fn render_registration(app: &HemoraApp, f: &mut Frame) {
    let chunks = frame_chunks(f);
    let step = app.registration.step();

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Donor Registration"))
        .gauge_style(Style::default().fg(Color::Red))
        .ratio(step.number() as f64 / Step::ALL.len() as f64)
        .label(format!(
            "Step {} of {} — {}",
            step.number(),
            Step::ALL.len(),
            step.title()
        ));
    f.render_widget(gauge, chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    match step {
        Step::PersonalInfo => {
            let personal = &app.registration.draft().personal;
            let values = [
                &personal.first_name,
                &personal.last_name,
                &personal.age,
                &personal.phone,
                &personal.email,
                &personal.location,
            ];
            for (i, label) in PERSONAL_LABELS.iter().enumerate() {
                let focused = i == app.personal_focus.index();
                let marker = if focused { "> " } else { "  " };
                let style = if focused {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                lines.push(Line::from(Span::styled(
                    format!("{}{}: {}", marker, label, values[i]),
                    style,
                )));
                if let Some(message) = app.registration.errors().get(PERSONAL_ERROR_KEYS[i]) {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", message),
                        Style::default().fg(Color::Red),
                    )));
                }
            }
        }
        Step::BloodGroup => {
            let chosen = app.registration.draft().blood_group;
            for (i, group) in BloodGroup::ALL.iter().enumerate() {
                let cursor = if i == app.blood_index { "> " } else { "  " };
                let mark = if chosen == Some(*group) { "[x]" } else { "[ ]" };
                let style = if i == app.blood_index {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                lines.push(Line::from(Span::styled(
                    format!("{}{} {}", cursor, mark, group.label()),
                    style,
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Don't know your blood type? That's okay! Select O+ as a temporary choice",
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(Span::styled(
                "and we'll update your profile after testing during your visit.",
                Style::default().fg(Color::Gray),
            )));
            if let Some(message) = app.registration.errors().get("blood_group") {
                lines.push(Line::from(Span::styled(
                    message.to_string(),
                    Style::default().fg(Color::Red),
                )));
            }
        }
        Step::HealthScreening => {
            let screening = &app.registration.draft().screening;
            for (i, question) in ScreeningQuestion::ALL.iter().enumerate() {
                let cursor = if i == app.question_index { "> " } else { "  " };
                let answer = match screening.answer_to(*question) {
                    Some(true) => "Yes",
                    Some(false) => "No",
                    None => "—",
                };
                let style = if i == app.question_index {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                lines.push(Line::from(Span::styled(
                    format!("{}{} [{}]", cursor, question.prompt(), answer),
                    style,
                )));
            }
            if let Some(message) = app.registration.errors().get("health_screening") {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    message.to_string(),
                    Style::default().fg(Color::Red),
                )));
            }
        }
        Step::Consent => {
            match app.registration.verdict() {
                Some(EligibilityVerdict::Eligible) => {
                    lines.push(Line::from(Span::styled(
                        "Great! You are eligible to donate blood today.",
                        Style::default().fg(Color::Green),
                    )));
                }
                Some(EligibilityVerdict::Deferred { until }) => {
                    lines.push(Line::from(Span::styled(
                        format!(
                            "Based on your answers, you are not eligible to donate at this time. \
                             You will be eligible again on {}.",
                            until.format("%B %-d, %Y")
                        ),
                        Style::default().fg(Color::Red),
                    )));
                }
                None => {}
            }
            lines.push(Line::from(""));

            let draft = app.registration.draft();
            lines.push(Line::from(Span::styled(
                "Registration Summary",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(
                "  Name: {} {}",
                draft.personal.first_name, draft.personal.last_name
            )));
            lines.push(Line::from(format!("  Age: {}", draft.personal.age)));
            lines.push(Line::from(format!(
                "  Blood Group: {}",
                draft
                    .blood_group
                    .map(|g| g.label().to_string())
                    .unwrap_or_default()
            )));
            lines.push(Line::from(format!("  Location: {}", draft.personal.location)));
            lines.push(Line::from(""));

            let checkbox = if draft.consent { "[x]" } else { "[ ]" };
            lines.push(Line::from(format!(
                "{} I consent to donating blood and confirm that all information \
                 provided is accurate.",
                checkbox
            )));
            if let Some(message) = app.registration.errors().get("consent") {
                lines.push(Line::from(Span::styled(
                    message.to_string(),
                    Style::default().fg(Color::Red),
                )));
            }
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(step.title()))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, chunks[1]);

    let hint = match step {
        Step::PersonalInfo => "Tab to switch fields • Enter to continue • Esc to go back",
        Step::BloodGroup => "Arrows to move • Space to select • Enter to continue • Esc to go back",
        Step::HealthScreening => "Up/Down to move • Y/N to answer • Enter to continue • Esc to go back",
        Step::Consent => "Space to toggle consent • Enter to complete registration • Esc to go back",
    };
    render_footer(f, chunks[2], hint, app.status.as_deref());
}

pub fn render_booking(app: &HemoraApp, f: &mut Frame) {
    let chunks = frame_chunks(f);
    let Some(booking) = &app.booking else {
        return;
    };

    let donor_name = app
        .donor
        .as_ref()
        .map(|d| d.personal_info.first_name.clone())
        .unwrap_or_default();
    render_header(
        f,
        chunks[0],
        &format!("Book Your Appointment — {}", booking.step().title()),
    );

    let mut lines: Vec<Line> = Vec::new();
    match booking.step() {
        BookingStep::Center => {
            lines.push(Line::from(format!(
                "Hello {}! Choose a donation center near you.",
                donor_name
            )));
            lines.push(Line::from(""));
            for (i, center) in booking.centers().iter().enumerate() {
                let cursor = if i == app.center_index { "> " } else { "  " };
                let style = if i == app.center_index {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                lines.push(Line::from(Span::styled(
                    format!(
                        "{}{} ({:.1} mi, {} slots, {:.1} rating)",
                        cursor, center.name, center.distance_miles, center.slots_available,
                        center.rating
                    ),
                    style,
                )));
                lines.push(Line::from(Span::styled(
                    format!("    {} • {}", center.address, center.features.join(", ")),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
        BookingStep::Schedule => {
            let today = Utc::now().date_naive();
            if let Some(center) = booking.selected_center() {
                lines.push(Line::from(format!("Scheduling at {}", center.name)));
            }
            lines.push(Line::from(""));
            if let Some(date) = app.schedule_date {
                let bookable = date_bookable(date, today, booking.window_days());
                let marker = if bookable { "available" } else { "unavailable" };
                let style = if bookable {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                };
                lines.push(Line::from(vec![
                    Span::raw(format!("Date: {} ", date.format("%A, %B %-d, %Y"))),
                    Span::styled(format!("({})", marker), style),
                ]));
            }
            lines.push(Line::from(Span::styled(
                format!(
                    "Sundays are closed. Appointments available up to {} days in advance.",
                    booking.window_days()
                ),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(""));
            for (i, slot) in TIME_SLOTS.iter().enumerate() {
                let cursor = if i == app.slot_index { "> " } else { "  " };
                let style = if i == app.slot_index {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                lines.push(Line::from(Span::styled(format!("{}{}", cursor, slot), style)));
            }
        }
        BookingStep::Confirmation => {
            lines.push(Line::from(Span::styled(
                "Appointment Summary",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if let Some(center) = booking.selected_center() {
                lines.push(Line::from(format!("  Location: {}", center.name)));
                lines.push(Line::from(format!("  Address: {}", center.address)));
            }
            if let Some(date) = booking.date() {
                lines.push(Line::from(format!("  Date: {}", date.format("%A, %B %-d, %Y"))));
            }
            if let Some(slot) = booking.time_slot() {
                lines.push(Line::from(format!("  Time: {}", slot)));
            }
            lines.push(Line::from("  Duration: ~45 minutes"));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press Enter to complete your booking.",
                Style::default().fg(Color::Green),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(booking.step().title()))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, chunks[1]);

    let hint = match booking.step() {
        BookingStep::Center => "Up/Down to choose • Enter to select • Esc to go back",
        BookingStep::Schedule => {
            "Left/Right to change date • Up/Down to pick a time • Enter to confirm • Esc to go back"
        }
        BookingStep::Confirmation => "Enter to complete booking • Esc to go back",
    };
    render_footer(f, chunks[2], hint, app.status.as_deref());
}

pub fn render_booking_success(app: &HemoraApp, f: &mut Frame) {
    let chunks = frame_chunks(f);
    render_header(f, chunks[0], "Booking Confirmation");

    let mut lines: Vec<Line> = Vec::new();
    if let Some(confirmation) = &app.confirmation {
        lines.push(Line::from(Span::styled(
            "Your appointment has been successfully scheduled",
            Style::default().fg(Color::Green),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Booking ID: "),
            Span::styled(
                confirmation.booking_id.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "Date: {}",
            confirmation.date.format("%A, %B %-d, %Y")
        )));
        lines.push(Line::from(format!("Time: {}", confirmation.time_slot)));
        lines.push(Line::from(format!("Location: {}", confirmation.center.name)));
        lines.push(Line::from(format!("Address: {}", confirmation.center.address)));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Before Your Visit",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from("  • Eat a healthy meal and stay hydrated"));
        lines.push(Line::from("  • Bring a valid photo ID"));
        lines.push(Line::from("  • Wear comfortable clothing with sleeves that roll up"));
        lines.push(Line::from("  • Get a good night's sleep"));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Appointment Confirmed"))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, chunks[1]);

    render_footer(
        f,
        chunks[2],
        "D to download details • Enter to return home",
        app.status.as_deref(),
    );
}

pub fn render_request(app: &HemoraApp, f: &mut Frame) {
    let chunks = frame_chunks(f);
    render_header(f, chunks[0], "Request Blood");

    let form = &app.request_form;
    let focus = app.request_focus.index();
    let mut lines: Vec<Line> = Vec::new();

    if form.is_emergency() {
        lines.push(Line::from(Span::styled(
            "Emergency Request: this request will be prioritized and sent to all \
             nearby blood centers immediately.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    let row_style = |row: usize| {
        if row == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let marker = |row: usize| if row == focus { "> " } else { "  " };

    lines.push(Line::from(Span::styled(
        format!("{}Patient Name: {}", marker(0), form.patient_name),
        row_style(0),
    )));
    lines.push(Line::from(Span::styled(
        format!("{}Hospital/Medical Facility: {}", marker(1), form.hospital),
        row_style(1),
    )));

    let mut type_spans: Vec<Span> = vec![Span::styled(
        format!("{}Blood Types Needed: ", marker(REQUEST_BLOOD_ROW)),
        row_style(REQUEST_BLOOD_ROW),
    )];
    for (i, group) in BloodGroup::ALL.iter().enumerate() {
        let selected = form.blood_types.contains(group);
        let cursor = focus == REQUEST_BLOOD_ROW && i == app.request_blood_index;
        let mut style = if selected {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if cursor {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        type_spans.push(Span::styled(format!("{} ", group.label()), style));
    }
    lines.push(Line::from(type_spans));

    lines.push(Line::from(Span::styled(
        format!("{}Units Needed (1-50): {}", marker(3), form.units_needed),
        row_style(3),
    )));

    let urgency_label = form.urgency.map(|u| u.label()).unwrap_or("—");
    lines.push(Line::from(Span::styled(
        format!("{}Urgency Level: {}", marker(REQUEST_URGENCY_ROW), urgency_label),
        row_style(REQUEST_URGENCY_ROW),
    )));

    lines.push(Line::from(Span::styled(
        format!("{}Contact Phone: {}", marker(5), form.contact_phone),
        row_style(5),
    )));
    lines.push(Line::from(Span::styled(
        format!("{}Additional Information: {}", marker(6), form.additional_info),
        row_style(6),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Blood Request Form"))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, chunks[1]);

    render_footer(
        f,
        chunks[2],
        "Tab to switch rows • Space to toggle pickers • Enter to submit • Esc to go back",
        app.status.as_deref(),
    );
}

pub fn render_request_success(app: &HemoraApp, f: &mut Frame) {
    let chunks = frame_chunks(f);
    render_header(f, chunks[0], "Request Submitted");

    let mut lines: Vec<Line> = Vec::new();
    if let Some(request) = &app.request {
        lines.push(Line::from(vec![
            Span::raw("Request ID: "),
            Span::styled(
                request.request_id.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Patient: {}", request.patient_name)));
        lines.push(Line::from(format!("Hospital: {}", request.hospital)));
        lines.push(Line::from(format!(
            "Blood Types: {}",
            request
                .blood_types
                .iter()
                .map(|g| g.label())
                .collect::<Vec<_>>()
                .join(", ")
        )));
        lines.push(Line::from(format!("Units: {}", request.units_needed)));
        lines.push(Line::from(format!("Urgency: {}", request.urgency.label())));
        if request.urgency.is_emergency() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Nearby blood centers have been notified immediately.",
                Style::default().fg(Color::Red),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Blood Request"))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, chunks[1]);

    render_footer(f, chunks[2], "Enter to return home", app.status.as_deref());
}

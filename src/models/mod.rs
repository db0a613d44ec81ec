use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The eight ABO/Rh blood groups offered by the donor picker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All groups in picker order
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    /// Clinical label, e.g. "AB-"
    pub fn label(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BloodGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodGroup::ALL
            .iter()
            .find(|group| group.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown blood group: {}", s))
    }
}

/// Personal information collected in step 1, kept as raw form input
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    pub phone: String,
    pub email: String,
    pub location: String,
}

/// Fixed health-screening questionnaire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScreeningQuestion {
    FeelingWell,
    DonatedRecently,
    TakingMedications,
    RecentTattooOrPiercing,
    RecentTravel,
    ChronicCondition,
}

impl ScreeningQuestion {
    /// All questions in the order they are asked
    pub const ALL: [ScreeningQuestion; 6] = [
        ScreeningQuestion::FeelingWell,
        ScreeningQuestion::DonatedRecently,
        ScreeningQuestion::TakingMedications,
        ScreeningQuestion::RecentTattooOrPiercing,
        ScreeningQuestion::RecentTravel,
        ScreeningQuestion::ChronicCondition,
    ];

    /// Prompt text shown to the donor
    pub fn prompt(&self) -> &'static str {
        match self {
            ScreeningQuestion::FeelingWell => "Are you feeling well today?",
            ScreeningQuestion::DonatedRecently => "Have you donated blood in the last 56 days?",
            ScreeningQuestion::TakingMedications => "Are you currently taking any medications?",
            ScreeningQuestion::RecentTattooOrPiercing => {
                "Have you had any recent tattoos or piercings?"
            }
            ScreeningQuestion::RecentTravel => "Have you traveled outside the country recently?",
            ScreeningQuestion::ChronicCondition => "Do you have any chronic medical conditions?",
        }
    }
}

/// Health-screening answers collected in step 3
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HealthScreening {
    pub answers: BTreeMap<ScreeningQuestion, bool>,
    /// Captured when the donor reports a donation in the last 56 days,
    /// used to derive the re-eligibility date
    pub last_donation: Option<NaiveDate>,
}

impl HealthScreening {
    pub fn answer(&mut self, question: ScreeningQuestion, value: bool) {
        self.answers.insert(question, value);
    }

    pub fn answer_to(&self, question: ScreeningQuestion) -> Option<bool> {
        self.answers.get(&question).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// True once every question has a yes/no answer
    pub fn is_complete(&self) -> bool {
        ScreeningQuestion::ALL
            .iter()
            .all(|q| self.answers.contains_key(q))
    }
}

/// Finalized donor registration, produced only by a successful submit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonorRecord {
    pub personal_info: PersonalInfo,
    pub blood_group: BloodGroup,
    pub health_screening: HealthScreening,
    pub consent: bool,
}

/// A donation center offered during appointment booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationCenter {
    pub id: String,
    pub name: String,
    pub address: String,
    pub distance_miles: f64,
    pub slots_available: u32,
    pub rating: f64,
    pub features: Vec<String>,
}

/// Confirmed appointment handed back to the host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingConfirmation {
    pub center: DonationCenter,
    pub date: NaiveDate,
    pub time_slot: String,
    pub booking_id: String,
}

/// Per-step validation outcome: field name mapped to a human-readable
/// message. A non-empty set blocks advancement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Mock confirmation identifier: prefix plus the last six digits of a
/// millisecond timestamp, e.g. "BD031415"
pub fn confirmation_id(prefix: &str, timestamp_millis: i64) -> String {
    format!("{}{:06}", prefix, timestamp_millis.rem_euclid(1_000_000))
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub booking_window_days: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Config {
            booking_window_days: std::env::var("HEMORA_BOOKING_WINDOW_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            booking_window_days: 30,
        }
    }
}

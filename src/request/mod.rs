//! Blood request form: a single-page form for requesting units for a
//! patient. Validates on submit and emits a `BloodRequest` with a mock
//! "BR" request id.

use serde::{Deserialize, Serialize};

use crate::models::{confirmation_id, BloodGroup, ValidationErrors};

/// Units that can be requested in one submission, inclusive
pub const MIN_UNITS: u32 = 1;
pub const MAX_UNITS: u32 = 50;

/// How urgently the units are needed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Routine,
    Urgent,
    Critical,
    Emergency,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 4] = [
        UrgencyLevel::Routine,
        UrgencyLevel::Urgent,
        UrgencyLevel::Critical,
        UrgencyLevel::Emergency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UrgencyLevel::Routine => "Routine",
            UrgencyLevel::Urgent => "Urgent",
            UrgencyLevel::Critical => "Critical",
            UrgencyLevel::Emergency => "Emergency",
        }
    }

    /// Critical and emergency requests are flagged for immediate
    /// attention in the host
    pub fn is_emergency(&self) -> bool {
        matches!(self, UrgencyLevel::Critical | UrgencyLevel::Emergency)
    }
}

/// The request form under edit. Units are kept as raw input and parsed
/// during validation.
#[derive(Debug, Clone, Default)]
pub struct BloodRequestForm {
    pub patient_name: String,
    pub hospital: String,
    pub blood_types: Vec<BloodGroup>,
    pub units_needed: String,
    pub urgency: Option<UrgencyLevel>,
    pub contact_phone: String,
    pub additional_info: String,
}

/// A submitted blood request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodRequest {
    pub patient_name: String,
    pub hospital: String,
    pub blood_types: Vec<BloodGroup>,
    pub units_needed: u32,
    pub urgency: UrgencyLevel,
    pub contact_phone: String,
    pub additional_info: String,
    pub request_id: String,
}

impl BloodRequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove a blood type from the selection
    pub fn toggle_blood_type(&mut self, group: BloodGroup) {
        if let Some(pos) = self.blood_types.iter().position(|g| *g == group) {
            self.blood_types.remove(pos);
        } else {
            self.blood_types.push(group);
        }
    }

    pub fn is_emergency(&self) -> bool {
        self.urgency.map(|u| u.is_emergency()).unwrap_or(false)
    }

    /// Validate the whole form. Pure: returns the error set only.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.patient_name.trim().is_empty() {
            errors.insert("patient_name", "Patient name is required");
        }
        if self.hospital.trim().is_empty() {
            errors.insert("hospital", "Hospital name is required");
        }
        if self.blood_types.is_empty() {
            errors.insert("blood_types", "At least one blood type must be selected");
        }
        if self.units_needed.trim().is_empty() {
            errors.insert("units_needed", "Number of units is required");
        } else {
            match self.units_needed.trim().parse::<u32>() {
                Ok(units) if (MIN_UNITS..=MAX_UNITS).contains(&units) => {}
                _ => errors.insert("units_needed", "Units must be between 1 and 50"),
            }
        }
        if self.urgency.is_none() {
            errors.insert("urgency", "Urgency level is required");
        }
        if self.contact_phone.trim().is_empty() {
            errors.insert("contact_phone", "Contact phone is required");
        }

        errors
    }

    /// Validate and emit the request. `timestamp_millis` feeds the mock
    /// request id.
    pub fn submit(&self, timestamp_millis: i64) -> Result<BloodRequest, ValidationErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BloodRequest {
            patient_name: self.patient_name.clone(),
            hospital: self.hospital.clone(),
            blood_types: self.blood_types.clone(),
            // Guarded by validate() above
            units_needed: self.units_needed.trim().parse().expect("validated units"),
            urgency: self.urgency.expect("validated urgency"),
            contact_phone: self.contact_phone.clone(),
            additional_info: self.additional_info.clone(),
            request_id: confirmation_id("BR", timestamp_millis),
        })
    }
}

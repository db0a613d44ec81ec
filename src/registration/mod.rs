//! Donor registration wizard: four sequential steps collecting personal
//! information, blood group, health screening answers and consent. Each
//! step validates before advancement; the screening step derives an
//! eligibility verdict that gates final submission.

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::models::{
    BloodGroup, DonorRecord, HealthScreening, PersonalInfo, ScreeningQuestion, ValidationErrors,
};

/// Donors must wait this long between whole-blood donations
pub const DEFERRAL_DAYS: i64 = 56;

/// Donor age limits, inclusive
pub const MIN_AGE: u32 = 17;
pub const MAX_AGE: u32 = 65;

/// The wizard's four sequential steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    PersonalInfo,
    BloodGroup,
    HealthScreening,
    Consent,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::PersonalInfo,
        Step::BloodGroup,
        Step::HealthScreening,
        Step::Consent,
    ];

    /// 1-based position for progress display
    pub fn number(&self) -> usize {
        match self {
            Step::PersonalInfo => 1,
            Step::BloodGroup => 2,
            Step::HealthScreening => 3,
            Step::Consent => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::PersonalInfo => "Personal Information",
            Step::BloodGroup => "Blood Group Selection",
            Step::HealthScreening => "Health Screening",
            Step::Consent => "Final Consent",
        }
    }

    fn next(&self) -> Option<Step> {
        match self {
            Step::PersonalInfo => Some(Step::BloodGroup),
            Step::BloodGroup => Some(Step::HealthScreening),
            Step::HealthScreening => Some(Step::Consent),
            Step::Consent => None,
        }
    }

    fn prev(&self) -> Option<Step> {
        match self {
            Step::PersonalInfo => None,
            Step::BloodGroup => Some(Step::PersonalInfo),
            Step::HealthScreening => Some(Step::BloodGroup),
            Step::Consent => Some(Step::HealthScreening),
        }
    }
}

/// The donor record under construction, mutated field-by-field as the
/// donor progresses through the steps
#[derive(Debug, Clone, Default)]
pub struct DonorDraft {
    pub personal: PersonalInfo,
    pub blood_group: Option<BloodGroup>,
    pub screening: HealthScreening,
    pub consent: bool,
}

/// Outcome of the fixed health-screening exclusion rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityVerdict {
    Eligible,
    /// Deferred until the given date (last donation + 56 days when the
    /// donation date is known, otherwise today + 56 days)
    Deferred { until: NaiveDate },
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityVerdict::Eligible)
    }
}

/// Why a completed wizard refused to finalize
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("registration is incomplete: {0}")]
    Incomplete(ValidationErrors),
    #[error("consent is required to proceed")]
    ConsentRequired,
    #[error("not eligible to donate until {until}")]
    NotEligible { until: NaiveDate },
}

/// What a registration session produced for its host
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Completed(DonorRecord),
    Cancelled,
}

/// Validate a single step against the draft. Pure: returns the error
/// set and touches nothing.
pub fn validate_step(step: Step, draft: &DonorDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    match step {
        Step::PersonalInfo => {
            let info = &draft.personal;
            if info.first_name.trim().is_empty() {
                errors.insert("first_name", "First name is required");
            }
            if info.last_name.trim().is_empty() {
                errors.insert("last_name", "Last name is required");
            }
            if info.age.trim().is_empty() {
                errors.insert("age", "Age is required");
            } else {
                match info.age.trim().parse::<u32>() {
                    Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => {}
                    _ => errors.insert("age", "Age must be between 17 and 65"),
                }
            }
            if info.phone.trim().is_empty() {
                errors.insert("phone", "Phone number is required");
            }
            if info.email.trim().is_empty() {
                errors.insert("email", "Email is required");
            }
            if info.location.trim().is_empty() {
                errors.insert("location", "Location is required");
            }
        }
        Step::BloodGroup => {
            if draft.blood_group.is_none() {
                errors.insert("blood_group", "Blood group selection is required");
            }
        }
        Step::HealthScreening => {
            if !draft.screening.is_complete() {
                errors.insert(
                    "health_screening",
                    "Please answer all health screening questions",
                );
            }
        }
        Step::Consent => {
            if !draft.consent {
                errors.insert("consent", "Consent is required to proceed");
            }
        }
    }

    errors
}

/// Fixed three-condition exclusion rule. Unanswered "feeling well"
/// counts as ineligible; the remaining questions are recorded but do
/// not affect the verdict.
pub fn check_eligibility(screening: &HealthScreening) -> bool {
    let feeling_well = screening
        .answer_to(ScreeningQuestion::FeelingWell)
        .unwrap_or(false);
    let donated_recently = screening
        .answer_to(ScreeningQuestion::DonatedRecently)
        .unwrap_or(false);
    let recent_tattoo = screening
        .answer_to(ScreeningQuestion::RecentTattooOrPiercing)
        .unwrap_or(false);

    feeling_well && !donated_recently && !recent_tattoo
}

/// Apply the exclusion rules and derive the re-eligibility date for a
/// deferred donor
pub fn eligibility_verdict(screening: &HealthScreening, today: NaiveDate) -> EligibilityVerdict {
    if check_eligibility(screening) {
        EligibilityVerdict::Eligible
    } else {
        let until = screening
            .last_donation
            .unwrap_or(today)
            + Duration::days(DEFERRAL_DAYS);
        EligibilityVerdict::Deferred { until }
    }
}

/// The registration wizard state machine. Starts at `PersonalInfo`,
/// advances linearly with fail-closed validation, allows backing up to
/// any prior step, and finalizes into a `DonorRecord` on submit.
#[derive(Debug, Clone)]
pub struct RegistrationWizard {
    step: Step,
    draft: DonorDraft,
    errors: ValidationErrors,
    verdict: Option<EligibilityVerdict>,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self {
            step: Step::PersonalInfo,
            draft: DonorDraft::default(),
            errors: ValidationErrors::new(),
            verdict: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &DonorDraft {
        &self.draft
    }

    /// Field edits go through the draft directly; validation happens on
    /// advancement, not on every keystroke
    pub fn draft_mut(&mut self) -> &mut DonorDraft {
        &mut self.draft
    }

    /// Errors surfaced by the most recent advancement or submit attempt
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Verdict computed on the transition out of the screening step
    pub fn verdict(&self) -> Option<EligibilityVerdict> {
        self.verdict
    }

    /// Try to move to the next step. Fails closed: any validation error
    /// keeps the wizard on the current step and is surfaced via
    /// `errors()`. Leaving the screening step computes the eligibility
    /// verdict.
    pub fn advance(&mut self, today: NaiveDate) -> Result<Step, ValidationErrors> {
        let errors = validate_step(self.step, &self.draft);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }
        self.errors = ValidationErrors::new();

        if self.step == Step::HealthScreening {
            self.verdict = Some(eligibility_verdict(&self.draft.screening, today));
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move back one step; `None` from the first step, which the host
    /// treats as leaving the wizard
    pub fn back(&mut self) -> Option<Step> {
        let prev = self.step.prev()?;
        self.step = prev;
        self.errors = ValidationErrors::new();
        Some(prev)
    }

    /// Finalize the registration. Rejects unless the draft is complete,
    /// consent is given and the screening verdict is eligible.
    pub fn submit(&mut self, today: NaiveDate) -> Result<DonorRecord, SubmitError> {
        for step in [Step::PersonalInfo, Step::BloodGroup, Step::HealthScreening] {
            let errors = validate_step(step, &self.draft);
            if !errors.is_empty() {
                self.errors = errors.clone();
                return Err(SubmitError::Incomplete(errors));
            }
        }

        if !self.draft.consent {
            let errors = validate_step(Step::Consent, &self.draft);
            self.errors = errors;
            return Err(SubmitError::ConsentRequired);
        }

        let verdict = self
            .verdict
            .unwrap_or_else(|| eligibility_verdict(&self.draft.screening, today));
        if let EligibilityVerdict::Deferred { until } = verdict {
            return Err(SubmitError::NotEligible { until });
        }

        self.errors = ValidationErrors::new();
        let draft = self.draft.clone();
        Ok(DonorRecord {
            personal_info: draft.personal,
            // Guarded by the blood-group step validation above
            blood_group: draft.blood_group.expect("validated blood group"),
            health_screening: draft.screening,
            consent: draft.consent,
        })
    }
}

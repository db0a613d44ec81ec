//! Registration wizard validation and eligibility rule tests

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use test_log::test;

use hemora::models::ScreeningQuestion;
use hemora::registration::{
    check_eligibility, eligibility_verdict, validate_step, DonorDraft, EligibilityVerdict,
    RegistrationWizard, Step, SubmitError, DEFERRAL_DAYS,
};

use crate::common::test_data;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn valid_draft() -> DonorDraft {
    DonorDraft {
        personal: test_data::filled_personal("Sarah", "Lee"),
        blood_group: Some("O-".parse().unwrap()),
        screening: test_data::eligible_screening(),
        consent: true,
    }
}

#[test]
fn test_ages_outside_range_rejected() {
    let mut draft = valid_draft();
    for age in ["0", "12", "16", "66", "90", "120"] {
        draft.personal.age = age.to_string();
        let errors = validate_step(Step::PersonalInfo, &draft);
        assert_eq!(
            errors.get("age"),
            Some("Age must be between 17 and 65"),
            "age {} should be rejected",
            age
        );
    }
}

#[test]
fn test_ages_inside_range_accepted() {
    let mut draft = valid_draft();
    for age in ["17", "18", "35", "64", "65"] {
        draft.personal.age = age.to_string();
        let errors = validate_step(Step::PersonalInfo, &draft);
        assert!(errors.is_empty(), "age {} should be accepted", age);
    }
}

#[test]
fn test_missing_age_reported_separately() {
    let mut draft = valid_draft();
    draft.personal.age = "".to_string();
    let errors = validate_step(Step::PersonalInfo, &draft);
    assert_eq!(errors.get("age"), Some("Age is required"));
}

#[test]
fn test_non_numeric_age_rejected() {
    let mut draft = valid_draft();
    draft.personal.age = "abc".to_string();
    let errors = validate_step(Step::PersonalInfo, &draft);
    assert_eq!(errors.get("age"), Some("Age must be between 17 and 65"));
}

#[test]
fn test_feeling_unwell_always_ineligible() {
    // Unwell donors are excluded regardless of the other answers
    for donated in [false, true] {
        for tattoo in [false, true] {
            let mut screening = test_data::eligible_screening();
            screening.answer(ScreeningQuestion::FeelingWell, false);
            screening.answer(ScreeningQuestion::DonatedRecently, donated);
            screening.answer(ScreeningQuestion::RecentTattooOrPiercing, tattoo);
            assert!(!check_eligibility(&screening));
        }
    }
}

#[test]
fn test_eligible_only_for_single_combination() {
    for well in [false, true] {
        for donated in [false, true] {
            for tattoo in [false, true] {
                let mut screening = test_data::eligible_screening();
                screening.answer(ScreeningQuestion::FeelingWell, well);
                screening.answer(ScreeningQuestion::DonatedRecently, donated);
                screening.answer(ScreeningQuestion::RecentTattooOrPiercing, tattoo);

                let expected = well && !donated && !tattoo;
                assert_eq!(check_eligibility(&screening), expected);
            }
        }
    }
}

#[test]
fn test_non_gating_answers_do_not_affect_verdict() {
    let mut screening = test_data::eligible_screening();
    screening.answer(ScreeningQuestion::TakingMedications, true);
    screening.answer(ScreeningQuestion::RecentTravel, true);
    screening.answer(ScreeningQuestion::ChronicCondition, true);
    assert!(check_eligibility(&screening));
}

#[test]
fn test_deferral_derived_from_last_donation() {
    let mut screening = test_data::deferred_screening();
    screening.last_donation = NaiveDate::from_ymd_opt(2026, 2, 1);

    assert_eq!(
        eligibility_verdict(&screening, today()),
        EligibilityVerdict::Deferred {
            until: NaiveDate::from_ymd_opt(2026, 3, 29).unwrap()
        }
    );
}

#[test]
fn test_deferral_falls_back_to_today() {
    let screening = test_data::deferred_screening();
    assert_eq!(
        eligibility_verdict(&screening, today()),
        EligibilityVerdict::Deferred {
            until: today() + Duration::days(DEFERRAL_DAYS)
        }
    );
}

#[test]
fn test_advance_with_missing_fields_stays_put() {
    let mut wizard = RegistrationWizard::new();
    wizard.draft_mut().personal = test_data::filled_personal("Sarah", "Lee");
    wizard.draft_mut().personal.phone = "".to_string();
    wizard.draft_mut().personal.location = "  ".to_string();

    let errors = wizard.advance(today()).unwrap_err();
    assert_eq!(wizard.step(), Step::PersonalInfo);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("phone"), Some("Phone number is required"));
    assert_eq!(errors.get("location"), Some("Location is required"));
}

#[test]
fn test_submit_requires_consent() {
    let mut wizard = RegistrationWizard::new();
    *wizard.draft_mut() = valid_draft();
    wizard.draft_mut().consent = false;

    assert_matches!(wizard.submit(today()), Err(SubmitError::ConsentRequired));
    assert_eq!(
        wizard.errors().get("consent"),
        Some("Consent is required to proceed")
    );
}

#[test]
fn test_submit_requires_eligibility() {
    let mut wizard = RegistrationWizard::new();
    *wizard.draft_mut() = valid_draft();
    wizard.draft_mut().screening = test_data::deferred_screening();

    let expected_until = today() + Duration::days(DEFERRAL_DAYS);
    assert_matches!(
        wizard.submit(today()),
        Err(SubmitError::NotEligible { until }) if until == expected_until
    );
}

#[test]
fn test_submit_rejects_incomplete_draft() {
    let mut wizard = RegistrationWizard::new();
    *wizard.draft_mut() = valid_draft();
    wizard.draft_mut().blood_group = None;

    match wizard.submit(today()) {
        Err(SubmitError::Incomplete(errors)) => {
            assert_eq!(
                errors.get("blood_group"),
                Some("Blood group selection is required")
            );
        }
        other => panic!("expected incomplete submit, got {:?}", other),
    }
}

#[test]
fn test_back_navigation_reaches_any_prior_step() {
    let mut wizard = RegistrationWizard::new();
    *wizard.draft_mut() = valid_draft();

    wizard.advance(today()).unwrap();
    wizard.advance(today()).unwrap();
    wizard.advance(today()).unwrap();
    assert_eq!(wizard.step(), Step::Consent);

    assert_eq!(wizard.back(), Some(Step::HealthScreening));
    assert_eq!(wizard.back(), Some(Step::BloodGroup));
    assert_eq!(wizard.back(), Some(Step::PersonalInfo));
    assert_eq!(wizard.back(), None);
}

#[test]
fn test_verdict_computed_on_leaving_screening() {
    let mut wizard = RegistrationWizard::new();
    *wizard.draft_mut() = valid_draft();

    wizard.advance(today()).unwrap();
    wizard.advance(today()).unwrap();
    assert_eq!(wizard.verdict(), None);

    wizard.advance(today()).unwrap();
    assert_eq!(wizard.verdict(), Some(EligibilityVerdict::Eligible));
}

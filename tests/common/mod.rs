//! Common test utilities and helpers

/// Test data utilities
pub mod test_data {
    use hemora::models::{DonationCenter, HealthScreening, PersonalInfo, ScreeningQuestion};

    /// A fully populated, valid personal-info step
    pub fn filled_personal(first_name: &str, last_name: &str) -> PersonalInfo {
        PersonalInfo {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age: "29".to_string(),
            phone: "555-0142".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            location: "Springfield".to_string(),
        }
    }

    /// A complete questionnaire that passes the exclusion rules
    pub fn eligible_screening() -> HealthScreening {
        let mut screening = HealthScreening::default();
        screening.answer(ScreeningQuestion::FeelingWell, true);
        screening.answer(ScreeningQuestion::DonatedRecently, false);
        screening.answer(ScreeningQuestion::TakingMedications, false);
        screening.answer(ScreeningQuestion::RecentTattooOrPiercing, false);
        screening.answer(ScreeningQuestion::RecentTravel, false);
        screening.answer(ScreeningQuestion::ChronicCondition, false);
        screening
    }

    /// A complete questionnaire with a recent donation reported
    pub fn deferred_screening() -> HealthScreening {
        let mut screening = eligible_screening();
        screening.answer(ScreeningQuestion::DonatedRecently, true);
        screening
    }

    /// A single donation center for booking tests
    pub fn sample_center() -> DonationCenter {
        DonationCenter {
            id: "t1".to_string(),
            name: "Test Community Blood Center".to_string(),
            address: "1 Test Way".to_string(),
            distance_miles: 0.5,
            slots_available: 10,
            rating: 4.9,
            features: vec!["Parking Available".to_string()],
        }
    }
}

/// Logging utilities for tests
pub mod logging {
    use std::sync::Once;
    use tracing::info;

    static INIT: Once = Once::new();

    /// Initialize test logging
    pub fn init_test_logging() {
        INIT.call_once(|| {
            let _ = tracing::subscriber::set_global_default(
                tracing_subscriber::fmt()
                    .with_env_filter("hemora=debug,test=debug")
                    .with_test_writer()
                    .finish(),
            );
        });
    }

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("Test Step: {}", step);
    }
}

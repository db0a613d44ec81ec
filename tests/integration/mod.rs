pub mod donor_journey;

pub mod bag_setup;
pub mod common;
pub mod course;
pub mod event;
pub mod leaderboard;
pub mod profile;
pub mod scorecard;
pub mod series;

use rust_decimal::Decimal;
use validator::ValidationError;

/// World Handicap System range
pub(crate) fn validate_handicap_index(index: &Decimal) -> Result<(), ValidationError> {
    if *index >= Decimal::from(-10) && *index <= Decimal::new(540, 1) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_handicap_index")
            .with_message("Handicap index must be between -10 and 54".into()))
    }
}

pub(crate) fn validate_club_names(clubs: &[String]) -> Result<(), ValidationError> {
    if clubs
        .iter()
        .all(|club| !club.trim().is_empty() && club.len() <= 50)
    {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_club_name"))
    }
}

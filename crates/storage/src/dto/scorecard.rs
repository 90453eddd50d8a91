use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScorecardRequest {
    #[validate(length(max = 18, message = "A round has at most 18 holes"))]
    #[validate(custom(function = "validate_hole_scores"))]
    pub hole_scores: Vec<i32>,

    #[validate(custom(function = "validate_course_handicap"))]
    pub course_handicap: Option<i32>,

    #[serde(default)]
    pub submitted: bool,
}

fn validate_hole_scores(scores: &[i32]) -> Result<(), ValidationError> {
    if scores.iter().all(|strokes| (1..=20).contains(strokes)) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_hole_score")
            .with_message("Hole scores must be between 1 and 20".into()))
    }
}

fn validate_course_handicap(handicap: i32) -> Result<(), ValidationError> {
    if (-10..=60).contains(&handicap) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_course_handicap"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hole_score_bounds() {
        let mut req = SubmitScorecardRequest {
            hole_scores: vec![4, 5, 3],
            course_handicap: Some(12),
            submitted: false,
        };
        assert!(req.validate().is_ok());

        req.hole_scores.push(0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_too_many_holes() {
        let req = SubmitScorecardRequest {
            hole_scores: vec![4; 19],
            course_handicap: None,
            submitted: true,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_course_handicap_bounds() {
        let card = |course_handicap| SubmitScorecardRequest {
            hole_scores: vec![4, 4],
            course_handicap,
            submitted: false,
        };
        assert!(card(None).validate().is_ok());
        assert!(card(Some(-10)).validate().is_ok());
        assert!(card(Some(60)).validate().is_ok());
        assert!(card(Some(-11)).validate().is_err());
        assert!(card(Some(61)).validate().is_err());
    }
}

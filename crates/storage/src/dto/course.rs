use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::common::ListFilter;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_course_par"))]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(max = 255))]
    pub city: Option<String>,

    #[validate(length(max = 255))]
    pub region: Option<String>,

    #[validate(length(max = 255))]
    pub country: Option<String>,

    #[validate(custom(function = "validate_hole_count"))]
    pub holes: i32,

    #[validate(range(min = 27, max = 80))]
    pub par: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 255))]
    pub city: Option<String>,

    #[validate(length(max = 255))]
    pub region: Option<String>,

    #[validate(length(max = 255))]
    pub country: Option<String>,

    #[validate(custom(function = "validate_hole_count"))]
    pub holes: Option<i32>,

    #[validate(range(min = 27, max = 80))]
    pub par: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CourseFilter {
    pub country: Option<String>,
    pub region: Option<String>,
    pub holes: Option<i32>,
}

impl ListFilter for CourseFilter {
    const KEYS: &'static [&'static str] = &["country", "region", "holes"];
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeeSetInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 50))]
    pub color: Option<String>,

    #[validate(custom(function = "validate_course_rating"))]
    pub course_rating: Decimal,

    #[validate(range(min = 55, max = 155, message = "Slope rating must be between 55 and 155"))]
    pub slope_rating: i32,

    #[validate(range(min = 27, max = 80))]
    pub par: i32,

    #[validate(range(min = 1000, max = 9000))]
    pub yardage: Option<i32>,
}

/// Replaces every tee set of a course.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceTeeSetsRequest {
    #[validate(length(max = 12, message = "A course has at most 12 tee sets"))]
    #[validate(nested)]
    pub tee_sets: Vec<TeeSetInput>,
}

fn validate_hole_count(holes: i32) -> Result<(), ValidationError> {
    if holes == 9 || holes == 18 {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_hole_count")
            .with_message("Courses have 9 or 18 holes".into()))
    }
}

fn validate_course_par(req: &CreateCourseRequest) -> Result<(), ValidationError> {
    let (min, max) = if req.holes == 9 { (27, 40) } else { (54, 80) };
    if (min..=max).contains(&req.par) {
        Ok(())
    } else {
        Err(ValidationError::new("par_out_of_range")
            .with_message(format!("Par must be between {} and {} for {} holes", min, max, req.holes).into()))
    }
}

fn validate_course_rating(rating: &Decimal) -> Result<(), ValidationError> {
    if *rating >= Decimal::from(25) && *rating <= Decimal::from(90) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_course_rating"))
    }
}

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::ListFilter;
use super::validate_club_names;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBagSetupRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(length(max = 14, message = "A bag holds at most 14 clubs"))]
    #[validate(custom(function = "validate_club_names"))]
    pub clubs: Vec<String>,

    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBagSetupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    #[validate(length(max = 14, message = "A bag holds at most 14 clubs"))]
    #[validate(custom(function = "validate_club_names"))]
    pub clubs: Option<Vec<String>>,

    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BagSetupFilter {
    pub is_default: Option<bool>,
    pub name: Option<String>,
}

impl ListFilter for BagSetupFilter {
    const KEYS: &'static [&'static str] = &["isDefault", "name"];
}

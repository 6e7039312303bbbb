use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_empty;

// Request para crear o actualizar un motorista
#[derive(Debug, Deserialize, Validate)]
pub struct DriverRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_empty", length(max = 120))]
    pub name: String,
    #[serde(default)]
    #[validate(custom = "validate_not_empty", length(max = 40))]
    pub license_number: String,
    #[serde(default)]
    #[validate(length(max = 40))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 3))]
    pub category: String,
}

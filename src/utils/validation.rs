use regex::Regex;
use validator::ValidationError;

pub fn validate_mobile(mobile: &str) -> bool {
    Regex::new(r"^[6-9]\d{9}$")
        .map(|re| re.is_match(mobile))
        .unwrap_or(false)
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

pub fn validate_phone_field(phone: &str) -> Result<(), ValidationError> {
    if validate_mobile(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone"))
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

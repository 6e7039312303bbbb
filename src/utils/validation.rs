//! Utilidades de validación
//!
//! Validadores `custom` usados por los DTOs con `validator`.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// Placa: letras, números y guion opcional (ABC-1234, ABC1D23)
    static ref PLATE_REGEX: Regex =
        Regex::new(r"^[A-Za-z]{3}-?[0-9][A-Za-z0-9][0-9]{2}$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

pub fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)
}

pub fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
}

/// Validar formato de placa de vehículo
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_REGEX.is_match(value.trim()) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"ABC-1234 o ABC1D23".to_string());
        return Err(error);
    }
    Ok(())
}

/// Nombre de usuario sin `@`: el login trata todo lo que lleva `@` como email
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    validate_not_empty(value)?;
    if value.contains('@') || value.chars().any(char::is_whitespace) {
        let mut error = ValidationError::new("username");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Rota Centro").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
        assert!(validate_positive_decimal(&dec(1)).is_ok());
        assert!(validate_positive_decimal(&Decimal::ZERO).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative_decimal(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_decimal(&dec(-1)).is_err());
    }

    #[test]
    fn test_validate_plate() {
        assert!(validate_plate("ABC-1234").is_ok());
        assert!(validate_plate("abc1d23").is_ok());
        assert!(validate_plate("AB-12").is_err());
        assert!(validate_plate("1234-ABC").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("operador_1").is_ok());
        assert!(validate_username("ana@frota").is_err());
        assert!(validate_username("ana maria").is_err());
        assert!(validate_username("").is_err());
    }
}

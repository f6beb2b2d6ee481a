//! Request types for the salary engine API.

use serde::{Deserialize, Serialize};

/// Request body for the `/calculate` endpoint.
///
/// `year_month` is a YYYYMM integer. It is validated by the handler so an
/// out-of-range month reports `INVALID_YEAR_MONTH` rather than a JSON error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee number.
    pub employee_no: u32,
    /// The month to calculate, as YYYYMM.
    pub year_month: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_calculation_request() {
        let json = r#"{ "employee_no": 1, "year_month": 201504 }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_no, 1);
        assert_eq!(request.year_month, 201504);
    }

    #[test]
    fn test_missing_year_month_is_rejected() {
        let json = r#"{ "employee_no": 1 }"#;

        let error = serde_json::from_str::<CalculationRequest>(json).unwrap_err();
        assert!(error.to_string().contains("missing field `year_month`"));
    }

    #[test]
    fn test_negative_employee_no_is_rejected() {
        let json = r#"{ "employee_no": -1, "year_month": 201504 }"#;
        assert!(serde_json::from_str::<CalculationRequest>(json).is_err());
    }
}

use chrono::{NaiveDate, NaiveDateTime};

// The closed set of scalar kinds a search criterion can carry. Anything
// outside this set cannot be constructed, so coercion is total.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl Scalar {
    /// Textual form the vendor schema expects for this value.
    pub fn to_xsd(&self) -> String {
        match self {
            Scalar::Bool(value) => value.to_string(),
            Scalar::Int(value) => value.to_string(),
            Scalar::Date(value) => value.format("%Y-%m-%d").to_string(),
            // Whole seconds only, any fractional part is dropped
            Scalar::DateTime(value) => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Scalar::Text(value) => value.clone(),
        }
    }

    /// Criteria carrying a falsy value are left out of the search document
    /// entirely: `false`, `0` and the empty string all count as absent.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Bool(value) => *value,
            Scalar::Int(value) => *value != 0,
            Scalar::Date(_) | Scalar::DateTime(_) => true,
            Scalar::Text(value) => !value.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Scalar::Bool(true), "true"; "bool true is lowercase")]
    #[test_case(Scalar::Bool(false), "false"; "bool false is lowercase")]
    #[test_case(Scalar::Int(42), "42"; "integer is decimal text")]
    #[test_case(Scalar::Int(-7), "-7"; "negative integer keeps sign")]
    #[test_case(Scalar::Text("Anna".to_string()), "Anna"; "text passes through unchanged")]
    fn test_to_xsd(scalar: Scalar, expected: &str) {
        assert_eq!(scalar.to_xsd(), expected);
    }

    #[test]
    fn test_date_is_iso_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(Scalar::Date(date).to_xsd(), "2024-01-05");
    }

    #[test]
    fn test_datetime_drops_microseconds() {
        let datetime = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_micro_opt(10, 30, 15, 123_456)
            .unwrap();
        assert_eq!(Scalar::DateTime(datetime).to_xsd(), "2024-01-05T10:30:15");
    }

    #[test_case(Scalar::Bool(false), false; "false is falsy")]
    #[test_case(Scalar::Bool(true), true; "true is truthy")]
    #[test_case(Scalar::Int(0), false; "zero is falsy")]
    #[test_case(Scalar::Int(1), true; "nonzero is truthy")]
    #[test_case(Scalar::Text(String::new()), false; "empty text is falsy")]
    #[test_case(Scalar::Text("x".to_string()), true; "nonempty text is truthy")]
    fn test_is_truthy(scalar: Scalar, expected: bool) {
        assert_eq!(scalar.is_truthy(), expected);
    }

    #[test]
    fn test_dates_are_always_truthy() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert!(Scalar::Date(date).is_truthy());
        assert!(Scalar::DateTime(date.and_hms_opt(0, 0, 0).unwrap()).is_truthy());
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CelestspError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Celestial body not found: {0}")]
    NotFound(String),

    #[error("No body sets within the look-ahead window; cannot choose a start")]
    NoStartFound,

    #[error("Invalid planner parameter: {0}")]
    InvalidPlannerParameter(String),

    #[error("Invalid observation date/time: {0}")]
    InvalidDateTime(String),

    #[error("Invalid timezone offset: {0}")]
    InvalidTimezone(String),

    #[error("Error during the target file parsing: {0}")]
    ParsingError(String),

    #[error("Unable to resolve celestial name: {0}")]
    NameResolution(String),

    #[error("NaN encountered in a coordinate: {0}")]
    NanCoordinate(#[from] ordered_float::FloatIsNan),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[error("JSON decoding error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Time scale error: {0}")]
    HifitimeError(#[from] hifitime::HifitimeError),
}

impl PartialEq for CelestspError {
    fn eq(&self, other: &Self) -> bool {
        use CelestspError::*;
        match (self, other) {
            (InvalidInput(a), InvalidInput(b)) => a == b,
            (NotFound(a), NotFound(b)) => a == b,
            (InvalidPlannerParameter(a), InvalidPlannerParameter(b)) => a == b,
            (InvalidDateTime(a), InvalidDateTime(b)) => a == b,
            (InvalidTimezone(a), InvalidTimezone(b)) => a == b,
            (ParsingError(a), ParsingError(b)) => a == b,
            (NameResolution(a), NameResolution(b)) => a == b,

            // Wrapped foreign errors compare by variant only
            (NanCoordinate(_), NanCoordinate(_)) => true,
            (IoError(_), IoError(_)) => true,
            (UreqHttpError(_), UreqHttpError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (HifitimeError(_), HifitimeError(_)) => true,

            (NoStartFound, NoStartFound) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod celestsp_errors_test {
    use super::*;

    #[test]
    fn test_variant_equality() {
        assert_eq!(
            CelestspError::NotFound("Vega".into()),
            CelestspError::NotFound("Vega".into())
        );
        assert_ne!(
            CelestspError::NotFound("Vega".into()),
            CelestspError::NotFound("Deneb".into())
        );
        assert_eq!(CelestspError::NoStartFound, CelestspError::NoStartFound);
        assert_ne!(
            CelestspError::NoStartFound,
            CelestspError::InvalidInput("empty".into())
        );
    }

    #[test]
    fn test_io_errors_compare_by_variant() {
        let a: CelestspError = std::io::Error::new(std::io::ErrorKind::NotFound, "a").into();
        let b: CelestspError = std::io::Error::other("b").into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_names_the_body() {
        let err = CelestspError::NotFound("M31".into());
        assert_eq!(err.to_string(), "Celestial body not found: M31");
    }
}

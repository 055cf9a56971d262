use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a wire identifier into a [`DbId`].
///
/// Identifiers are unsigned on the wire but stored as BIGSERIAL, so only
/// `1..=i64::MAX` is accepted.
pub fn parse_id(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .and_then(|id| id_from_wire(id).ok())
        .ok_or_else(|| CoreError::Validation(format!("invalid id '{raw}'")))
}

/// Convert an identifier decoded from a JSON body into a [`DbId`].
pub fn id_from_wire(raw: u64) -> Result<DbId, CoreError> {
    DbId::try_from(raw)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CoreError::Validation(format!("invalid id '{raw}'")))
}

/// Convert an optional reference (`0` meaning "none") decoded from a JSON
/// body into a [`DbId`].
pub fn reference_from_wire(raw: u64) -> Result<DbId, CoreError> {
    DbId::try_from(raw)
        .map_err(|_| CoreError::Validation(format!("reference id '{raw}' is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn parse_id_rejects_garbage_zero_and_overflow() {
        assert!(parse_id("").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("-3").is_err());
        assert!(parse_id("0").is_err());
        assert!(parse_id("18446744073709551615").is_err());
    }

    #[test]
    fn wire_ids_must_fit_bigserial() {
        assert_eq!(id_from_wire(5).unwrap(), 5);
        assert!(id_from_wire(0).is_err());
        assert!(id_from_wire(u64::MAX).is_err());
    }

    #[test]
    fn references_allow_zero() {
        assert_eq!(reference_from_wire(0).unwrap(), 0);
        assert_eq!(reference_from_wire(9).unwrap(), 9);
        assert!(reference_from_wire(i64::MAX as u64 + 1).is_err());
    }
}

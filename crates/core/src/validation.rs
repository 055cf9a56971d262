use validator::Validate;

use crate::error::CoreError;

/// Run `validator` rules on an input and convert failures to [`CoreError`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}

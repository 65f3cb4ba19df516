use crate::server::error::AppError;

/// Returns the parameter when present and non-empty, otherwise a 400 with `message`.
pub fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_present_values() {
        let value = Some("daft punk".to_string());

        assert_eq!(required(&value, "Missing search query").unwrap(), "daft punk");
    }

    #[test]
    fn rejects_absent_and_empty_values() {
        for value in [None, Some(String::new())] {
            assert!(matches!(
                required(&value, "Missing search query"),
                Err(AppError::BadRequest(msg)) if msg == "Missing search query"
            ));
        }
    }
}

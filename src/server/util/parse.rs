use serde_json::Value;

/// Parses a counter that upstream APIs send either as a JSON number or as a numeric string.
///
/// Leading digits are accepted the way a lenient integer parse would (`"12abc"` is 12);
/// anything without a leading digit yields `None`.
///
/// # Arguments
/// - `value` - The JSON value to read
///
/// # Returns
/// - `Some(u64)` - Successfully parsed count
/// - `None` - Value is missing, negative, or not numeric
pub fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(text) => {
            let digits: String = text
                .trim_start()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse::<u64>().ok()
        }
        _ => None,
    }
}

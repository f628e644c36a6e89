use serde_json::Value;

/// Pulls a displayable message out of an error response body.
///
/// A string `detail` is returned verbatim; any other `detail` value, or an
/// object/array body without one, is dumped as JSON text. Bodies that are not
/// JSON objects or arrays yield `None` so callers can fall back to a static
/// message.
pub fn describe_error_body(raw: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(raw).ok()?;
    match value {
        Value::Object(ref map) => match map.get("detail") {
            Some(Value::String(detail)) => Some(detail.clone()),
            Some(Value::Null) | None => Some(value.to_string()),
            Some(detail) => Some(detail.to_string()),
        },
        Value::Array(_) => Some(value.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_returned_verbatim() {
        assert_eq!(
            describe_error_body(br#"{"detail":"Insufficient funds"}"#).as_deref(),
            Some("Insufficient funds")
        );
    }

    #[test]
    fn structured_detail_is_dumped_as_json() {
        let body = br#"{"detail":[{"loc":["body","amount"],"msg":"field required"}]}"#;
        assert_eq!(
            describe_error_body(body).as_deref(),
            Some(r#"[{"loc":["body","amount"],"msg":"field required"}]"#)
        );
    }

    #[test]
    fn object_without_detail_is_dumped_as_is() {
        assert_eq!(
            describe_error_body(br#"{"error":"nope"}"#).as_deref(),
            Some(r#"{"error":"nope"}"#)
        );
    }

    #[test]
    fn array_body_is_dumped_as_is() {
        assert_eq!(
            describe_error_body(br#"["email taken"]"#).as_deref(),
            Some(r#"["email taken"]"#)
        );
    }

    #[test]
    fn non_json_and_scalar_bodies_have_no_message() {
        assert_eq!(describe_error_body(b"<html>502 Bad Gateway</html>"), None);
        assert_eq!(describe_error_body(b""), None);
        assert_eq!(describe_error_body(b"42"), None);
    }
}

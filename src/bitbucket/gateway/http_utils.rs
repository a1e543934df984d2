//! Shared HTTP utilities for gateway implementations.

/// Extracts the human-readable message from a Bitbucket error body.
///
/// Bitbucket Server reports failures as
/// `{"errors": [{"message": "..."}, ...]}`; multiple messages are joined.
pub(super) fn extract_bitbucket_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };

    let messages: Vec<&str> = value
        .get("errors")
        .and_then(serde_json::Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|error| error.get("message").and_then(serde_json::Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if messages.is_empty() {
        return value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned);
    }

    Some(messages.join("; "))
}

//! JSON rendering for command output.

use serde::Serialize;

/// Indented JSON. Non-ASCII and HTML-sensitive characters are written as-is.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn output_is_indented() {
        let rendered = to_pretty_json(&json!({"id": "gpt-3.5-turbo"})).unwrap();
        assert_eq!(rendered, "{\n  \"id\": \"gpt-3.5-turbo\"\n}");
    }

    #[test]
    fn unicode_and_html_are_not_escaped() {
        let rendered = to_pretty_json(&json!({"text": "前回のオリンピック <2021> & more"})).unwrap();
        assert!(rendered.contains("前回のオリンピック <2021> & more"));
        assert!(!rendered.contains("\\u"));
    }
}

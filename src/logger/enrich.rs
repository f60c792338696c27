//! Projection of a request snapshot into log fields.

use serde_json::Value;

use super::Field;
use crate::config::{LoggerConfig, MethodFieldStyle};
use crate::snapshot::{HeaderMultimap, RequestSnapshot};

pub const FIELD_SERVICE_NAME: &str = "service_name";
pub const FIELD_REQUEST_ID: &str = "HTTP_RequestID";
pub const FIELD_HEADERS: &str = "HTTP_Headers";
pub const FIELD_BODY: &str = "HTTP_Body";
pub const FIELD_METHOD: &str = "HTTP_Method";
pub const FIELD_URL: &str = "HTTP_URL";

/// Render headers as `"<name>: <v1>, <v2>"`, ordered by name.
///
/// Names compare byte-wise, so `X-B` sorts before `x-a`.
pub fn serialize_headers(headers: &HeaderMultimap) -> Vec<String> {
    let mut names: Vec<&String> = headers.keys().collect();
    names.sort_unstable();

    names
        .into_iter()
        .map(|name| format!("{name}: {}", headers[name].join(", ")))
        .collect()
}

/// Fields attached to every record logged under `info`.
pub fn http_fields(info: &RequestSnapshot, config: &LoggerConfig) -> Vec<Field> {
    let mut fields = vec![(FIELD_REQUEST_ID.to_string(), Value::from(info.request_id))];

    match config.method_field {
        MethodFieldStyle::Legacy => {
            fields.push((info.method.clone(), Value::from(info.url.as_str())));
        }
        MethodFieldStyle::Named => {
            fields.push((FIELD_METHOD.to_string(), Value::from(info.method.as_str())));
            fields.push((FIELD_URL.to_string(), Value::from(info.url.as_str())));
        }
    }

    if config.show_headers && !info.headers.is_empty() {
        fields.push((
            FIELD_HEADERS.to_string(),
            Value::from(serialize_headers(&info.headers)),
        ));
    }

    if config.show_body && !info.body.is_empty() {
        fields.push((
            FIELD_BODY.to_string(),
            Value::from(String::from_utf8_lossy(&info.body).into_owned()),
        ));
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    fn headers(pairs: &[(&str, &[&str])]) -> HeaderMultimap {
        pairs
            .iter()
            .map(|(name, values)| {
                (
                    (*name).to_string(),
                    values.iter().map(|v| (*v).to_string()).collect(),
                )
            })
            .collect()
    }

    fn snapshot() -> RequestSnapshot {
        RequestSnapshot {
            request_id: 42,
            headers: headers(&[("X-Trace", &["a", "b"][..]), ("Accept", &["text/plain"][..])]),
            method: "GET".to_string(),
            url: "/items/42".to_string(),
            body: Bytes::new(),
        }
    }

    fn verbose() -> LoggerConfig {
        LoggerConfig {
            show_headers: true,
            show_body: true,
            ..LoggerConfig::default()
        }
    }

    fn names(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn test_headers_sorted_and_joined() {
        let rendered = serialize_headers(&snapshot().headers);
        assert_eq!(rendered, vec!["Accept: text/plain", "X-Trace: a, b"]);
    }

    #[test]
    fn test_header_order_is_independent_of_insertion() {
        let forward = headers(&[("b", &["1"][..]), ("a", &["2"][..]), ("C", &["3"][..])]);
        let backward = headers(&[("C", &["3"][..]), ("a", &["2"][..]), ("b", &["1"][..])]);

        assert_eq!(serialize_headers(&forward), serialize_headers(&backward));
        assert_eq!(serialize_headers(&forward), vec!["C: 3", "a: 2", "b: 1"]);
    }

    #[test]
    fn test_legacy_fields_use_method_as_name() {
        let fields = http_fields(&snapshot(), &verbose());

        assert_eq!(names(&fields), vec![FIELD_REQUEST_ID, "GET", FIELD_HEADERS]);
        assert_eq!(fields[0].1, Value::from(42));
        assert_eq!(fields[1].1, Value::from("/items/42"));
        assert_eq!(
            fields[2].1,
            serde_json::json!(["Accept: text/plain", "X-Trace: a, b"])
        );
    }

    #[test]
    fn test_named_fields() {
        let config = LoggerConfig {
            method_field: MethodFieldStyle::Named,
            ..LoggerConfig::default()
        };
        let fields = http_fields(&snapshot(), &config);

        assert_eq!(names(&fields), vec![FIELD_REQUEST_ID, FIELD_METHOD, FIELD_URL]);
        assert_eq!(fields[1].1, Value::from("GET"));
        assert_eq!(fields[2].1, Value::from("/items/42"));
    }

    #[test]
    fn test_headers_hidden_unless_enabled() {
        let fields = http_fields(&snapshot(), &LoggerConfig::default());
        assert!(!names(&fields).contains(&FIELD_HEADERS));
    }

    #[test]
    fn test_empty_headers_not_attached() {
        let info = RequestSnapshot {
            headers: HeaderMultimap::new(),
            ..snapshot()
        };
        let fields = http_fields(&info, &verbose());
        assert!(!names(&fields).contains(&FIELD_HEADERS));
    }

    #[test]
    fn test_body_attached_as_text() {
        let info = RequestSnapshot {
            body: Bytes::from_static(b"{\"qty\":1}"),
            ..snapshot()
        };
        let fields = http_fields(&info, &verbose());
        assert_eq!(fields.last().unwrap().0, FIELD_BODY);
        assert_eq!(fields.last().unwrap().1, Value::from("{\"qty\":1}"));

        let hidden = http_fields(&info, &LoggerConfig::default());
        assert!(!names(&hidden).contains(&FIELD_BODY));
    }
}

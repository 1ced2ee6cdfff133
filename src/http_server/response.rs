//! # Response Building
//!
//! Success payload shapes. A response body is either JSON or a raw CSV
//! document, never both; the CORS layer on the router decorates every
//! response with the permissive cross-origin header.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

/// Filename offered for CSV downloads.
pub const EXPORT_FILENAME: &str = "graph_export.csv";

/// Substitute payload when a query succeeds with zero rows, so empty
/// success is visibly different from a missing endpoint.
pub const EMPTY_RESULT_MESSAGE: &str = "Query executed successfully.";

/// JSON body of a successful query: either the projected rows or the
/// empty-result message object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Rows(Vec<Value>),
    Message { message: String },
}

impl QueryResponse {
    /// Apply the empty-result substitution.
    pub fn from_rows(rows: Vec<Value>) -> Self {
        if rows.is_empty() {
            QueryResponse::Message { message: EMPTY_RESULT_MESSAGE.to_string() }
        } else {
            QueryResponse::Rows(rows)
        }
    }
}

/// A downloadable CSV document.
#[derive(Debug, Clone)]
pub struct CsvDocument(pub String);

impl IntoResponse for CsvDocument {
    fn into_response(self) -> Response {
        let headers = [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&format!("attachment; filename=\"{}\"", EXPORT_FILENAME))
                    .expect("static disposition header"),
            ),
        ];
        (StatusCode::OK, headers, self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_rows_substitute_message() {
        let response = QueryResponse::from_rows(vec![]);
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body, json!({"message": "Query executed successfully."}));
    }

    #[test]
    fn test_rows_serialize_as_plain_array() {
        let response = QueryResponse::from_rows(vec![json!({"n": 1})]);
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body, json!([{"n": 1}]));
    }

    #[test]
    fn test_csv_response_headers() {
        let response = CsvDocument("Nodes\nid\n1\n".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/csv");
        assert_eq!(
            headers.get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"graph_export.csv\""
        );
    }
}

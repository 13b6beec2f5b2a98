//! Response wrapper
//!
//! Every executed operation yields an [`RwsResponse`]: the HTTP status, the
//! request that produced it, and the decoded JSON body. Search-style
//! operations additionally flatten their nested collection
//! (`Items[].Item`, `Products[].Product`) into a flat entity list so
//! callers can iterate results directly.

use crate::error::{RwsError, RwsResult};
use crate::params::Params;
use reqwest::StatusCode;
use serde_json::Value;

/// Normalized result of one API call.
#[derive(Debug, Clone)]
pub struct RwsResponse {
    status: StatusCode,
    url: String,
    params: Params,
    data: Value,
    text: String,
    items: Option<Vec<Value>>,
}

impl RwsResponse {
    pub(crate) fn new(status: StatusCode, url: String, params: Params, text: String) -> Self {
        let data = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            url,
            params,
            data,
            text,
            items: None,
        }
    }

    /// Whether the vendor answered with a 2xx status.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// HTTP status of the response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// URL the request was sent to (without its query string).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parameters that were sent, after auth injection.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Decoded JSON body. `Value::Null` when the body was not JSON.
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Raw body text, useful for non-JSON error pages.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Look up a top-level body field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Flattened entities for collection operations, empty otherwise.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Iterate the flattened entities.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items().iter()
    }

    /// Number of flattened entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Whether the flattened entity list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// First flattened entity, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.items().first()
    }

    /// Pull `body[array][i][entity]` into the flat entity list.
    ///
    /// The body must carry `array` as a JSON array of objects that each
    /// hold `entity`; anything else means the vendor changed shape under
    /// us and is reported as [`RwsError::MalformedResponse`].
    pub(crate) fn flatten_collection(
        &mut self,
        operation: &str,
        array: &str,
        entity: &str,
    ) -> RwsResult<()> {
        let rows = self
            .data
            .get(array)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                RwsError::malformed(operation, format!("missing {array} array"))
            })?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let item = row.get(entity).ok_or_else(|| {
                RwsError::malformed(operation, format!("{array} row without {entity}"))
            })?;
            items.push(item.clone());
        }

        self.items = Some(items);
        Ok(())
    }
}

impl std::ops::Index<&str> for RwsResponse {
    type Output = Value;

    /// Body field access; missing keys yield `Value::Null`.
    fn index(&self, key: &str) -> &Value {
        &self.data[key]
    }
}

impl<'a> IntoIterator for &'a RwsResponse {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items().iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: StatusCode, body: &Value) -> RwsResponse {
        RwsResponse::new(
            status,
            "https://app.rakuten.co.jp/services/api/IchibaItem/Search/20140222".to_string(),
            Params::new(),
            body.to_string(),
        )
    }

    #[test]
    fn exposes_decoded_fields() {
        let resp = response(StatusCode::OK, &json!({"count": 42, "page": 1}));
        assert!(resp.is_ok());
        assert_eq!(resp["count"], json!(42));
        assert_eq!(resp.get("page"), Some(&json!(1)));
        assert_eq!(resp["missing"], Value::Null);
    }

    #[test]
    fn non_success_status_is_not_ok() {
        let resp = response(
            StatusCode::BAD_REQUEST,
            &json!({"error": "wrong_parameter", "error_description": "hits is invalid"}),
        );
        assert!(!resp.is_ok());
        assert_eq!(resp["error"], json!("wrong_parameter"));
    }

    #[test]
    fn non_json_body_decodes_to_null() {
        let resp = RwsResponse::new(
            StatusCode::BAD_GATEWAY,
            "https://app.rakuten.co.jp/services/api/x".to_string(),
            Params::new(),
            "<html>Bad Gateway</html>".to_string(),
        );
        assert_eq!(resp.data(), &Value::Null);
        assert_eq!(resp.text(), "<html>Bad Gateway</html>");
    }

    #[test]
    fn flattens_nested_collection() {
        let mut resp = response(
            StatusCode::OK,
            &json!({
                "count": 2,
                "Items": [
                    {"Item": {"itemName": "a"}},
                    {"Item": {"itemName": "b"}}
                ]
            }),
        );

        resp.flatten_collection("IchibaItemSearch", "Items", "Item")
            .unwrap();

        assert_eq!(resp.len(), 2);
        assert_eq!(resp.first(), Some(&json!({"itemName": "a"})));
        let names: Vec<_> = resp.iter().map(|i| i["itemName"].clone()).collect();
        assert_eq!(names, vec![json!("a"), json!("b")]);
    }

    #[test]
    fn missing_collection_array_is_malformed() {
        let mut resp = response(StatusCode::OK, &json!(["Ooooooohhhhhhhh!!!!"]));
        let err = resp
            .flatten_collection("IchibaItemSearch", "Items", "Item")
            .unwrap_err();
        assert!(matches!(err, RwsError::MalformedResponse { .. }));
    }

    #[test]
    fn row_without_entity_is_malformed() {
        let mut resp = response(StatusCode::OK, &json!({"Items": [{"NotItem": {}}]}));
        let err = resp
            .flatten_collection("IchibaItemSearch", "Items", "Item")
            .unwrap_err();
        assert!(matches!(err, RwsError::MalformedResponse { .. }));
    }

    #[test]
    fn no_collection_means_empty_iteration() {
        let resp = response(StatusCode::OK, &json!({"data": "the response"}));
        assert!(resp.is_empty());
        assert_eq!(resp.iter().count(), 0);
    }
}

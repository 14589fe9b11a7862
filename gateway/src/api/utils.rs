use crate::errors::GatewayError;
use crate::GatewayBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Response, StatusCode, Uri};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Deserializes a JSON request body into the specified type.
pub async fn deserialize_body<T: DeserializeOwned>(body: GatewayBody) -> Result<T, GatewayError> {
    let bytes = body.collect().await?.to_bytes();
    serde_json::from_slice(&bytes).map_err(|e| GatewayError::RequestBody(e.to_string()))
}

/// Builds a JSON response with the given status.
pub fn json_response<T: Serialize>(
    status: StatusCode,
    value: &T,
) -> Result<Response<GatewayBody>, GatewayError> {
    let bytes = serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| GatewayError::Internal(format!("failed to serialize response: {e}")))?;

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(bytes).map_err(|e| match e {}).boxed())
        .map_err(|e| GatewayError::Internal(format!("failed to build response: {e}")))
}

/// First value of a query parameter, percent-decoded.
pub fn query_param(uri: &Uri, name: &str) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_decodes_values() {
        let uri: Uri = "/api/f1?path=%2Fcurrent%2Flast%2Fresults.json&limit=100"
            .parse()
            .expect("uri");
        assert_eq!(
            query_param(&uri, "path").as_deref(),
            Some("/current/last/results.json")
        );
        assert_eq!(query_param(&uri, "limit").as_deref(), Some("100"));
        assert_eq!(query_param(&uri, "missing"), None);
    }

    #[test]
    fn query_param_without_query() {
        let uri: Uri = "/api/f1".parse().expect("uri");
        assert_eq!(query_param(&uri, "path"), None);
    }
}

//! Outcome interpreter
//!
//! Maps a raw [`Response`] to a typed result or a normalized [`Error`],
//! according to the [`Operation`] that produced it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::codec::{decode_json, decode_text};
use super::errors::{Error, Result};
use super::operation::Operation;
use crate::transport::Response;

/// Header Jenkins uses to explain a rejected request
pub const ERROR_HEADER: &str = "x-error";

/// Trailing numeric segment of a `Location`: `.../item/<N>/` or `.../<N>/`
static LOCATION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/[^/]+/(?:item/)?(\d+)/?$").unwrap());

/// Extracts the positive identifier embedded in a `Location` value
#[must_use]
pub fn parse_location_id(location: &str) -> Option<u64> {
    let location = location.split(['?', '#']).next().unwrap_or_default();

    LOCATION_ID
        .captures(location)
        .and_then(|captures| captures.get(1))
        .and_then(|id| id.as_str().parse::<u64>().ok())
        .filter(|id| *id > 0)
}

/// Checks the status against the operation's accepted set
///
/// `404` becomes not found for `identifiers`; a rejection carrying an
/// `x-error` header becomes a conflict with the header text verbatim.
pub fn check_status(operation: &Operation, identifiers: &[&str], response: &Response) -> Result<()> {
    let scope = operation.scope();
    let status = response.status;

    if operation.accepts(status) {
        return Ok(());
    }

    if status == 404 {
        return Err(Error::not_found(scope, identifiers));
    }

    if let Some(reason) = response.header(ERROR_HEADER) {
        return Err(Error::conflict(scope, reason));
    }

    Err(Error::failed(scope, format!("unexpected status code: {status}")))
}

/// Existence probe: `200` is true, `404` is false, anything else is a protocol failure
pub fn exists(operation: &Operation, response: &Response) -> Result<bool> {
    match response.status {
        200 => Ok(true),
        404 => Ok(false),
        status => {
            tracing::warn!(scope = %operation.scope(), status, "unexpected existence probe status");
            Err(Error::protocol(
                operation.scope(),
                format!("unexpected status code: {status}"),
            ))
        }
    }
}

/// Fetch-by-id returning decoded JSON
pub fn json(operation: &Operation, identifiers: &[&str], response: &Response) -> Result<Value> {
    check_status(operation, identifiers, response)?;
    decode_json(operation.scope(), &response.body)
}

/// Fetch-by-id returning XML or text
pub fn text(operation: &Operation, identifiers: &[&str], response: &Response) -> Result<String> {
    check_status(operation, identifiers, response)?;
    Ok(decode_text(&response.body))
}

/// List read returning the array under `field`
///
/// A body that is not JSON, or lacks the array, is bad data.
pub fn list(operation: &Operation, field: &str, response: &Response) -> Result<Vec<Value>> {
    check_status(operation, &[], response)?;

    match decode_json(operation.scope(), &response.body)? {
        Value::Object(mut object) => match object.remove(field) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(Error::bad_data(operation.scope())),
        },
        _ => Err(Error::bad_data(operation.scope())),
    }
}

/// Status-only mutation
pub fn empty(operation: &Operation, identifiers: &[&str], response: &Response) -> Result<()> {
    check_status(operation, identifiers, response)
}

/// Status-only mutation with no special status meanings
///
/// Every rejected status is an operation failure; `404` and `x-error` carry
/// nothing specific here.
pub fn acknowledged(operation: &Operation, response: &Response) -> Result<()> {
    if operation.accepts(response.status) {
        return Ok(());
    }

    Err(Error::failed(
        operation.scope(),
        format!("unexpected status code: {}", response.status),
    ))
}

/// Creation answering with a `Location` that embeds an identifier
///
/// A missing or unparsable `Location` is a protocol failure.
pub fn location(operation: &Operation, identifiers: &[&str], response: &Response) -> Result<u64> {
    check_status(operation, identifiers, response)?;

    let scope = operation.scope();
    let Some(location) = response.header("location") else {
        tracing::warn!(%scope, "response has no location header");
        return Err(Error::protocol(scope, "missing location header"));
    };

    parse_location_id(location).ok_or_else(|| {
        tracing::warn!(%scope, location, "location header has no identifier");
        Error::protocol(scope, format!("invalid location header: {location}"))
    })
}

/// Delete answering with a redirect
///
/// A `200` means the delete did not happen.
pub fn destroyed(operation: &Operation, name: &str, response: &Response) -> Result<()> {
    if response.status == 200 {
        return Err(Error::failed(
            operation.scope(),
            format!("failed to delete: {name}"),
        ));
    }

    check_status(operation, &[name], response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::errors::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn test_parse_location_id() {
        assert_eq!(parse_location_id("http://localhost:8080/queue/item/5/"), Some(5));
        assert_eq!(parse_location_id("http://localhost:8080/queue/item/5"), Some(5));
        assert_eq!(parse_location_id("/queue/12/"), Some(12));
        assert_eq!(parse_location_id("http://host/jenkins/queue/item/9/?x=1"), Some(9));
    }

    #[test]
    fn test_parse_location_id_rejects() {
        assert_eq!(parse_location_id("http://localhost:8080/job/test/"), None);
        assert_eq!(parse_location_id("http://localhost:8080/queue/item/0/"), None);
        assert_eq!(parse_location_id("http://localhost:8080/queue/item/x/"), None);
        assert_eq!(parse_location_id(""), None);
    }

    #[test]
    fn test_exists() {
        let op = Operation::JOB_EXISTS;
        assert!(exists(&op, &Response::new(200)).unwrap());
        assert!(!exists(&op, &Response::new(404)).unwrap());

        let err = exists(&op, &Response::new(500)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert_eq!(err.scope().to_string(), "job.exists");
    }

    #[test]
    fn test_json_not_found() {
        let err = json(&Operation::BUILD_GET, &["test", "1"], &Response::new(404)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.detail(), "test 1 not found");
    }

    #[test]
    fn test_json_bad_data() {
        let response = Response::new(200).with_body("{\"number\":");
        let err = json(&Operation::BUILD_GET, &["test", "1"], &response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadData);
    }

    #[test]
    fn test_list_extracts_field() {
        let response = Response::new(200).with_body(r#"{"jobs":[{"name":"a"},{"name":"b"}]}"#);
        let jobs = list(&Operation::JOB_LIST, "jobs", &response).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1]["name"], "b");
    }

    #[test]
    fn test_list_missing_field_is_bad_data() {
        let response = Response::new(200).with_body(r#"{"items":{}}"#);
        let err = list(&Operation::QUEUE_LIST, "items", &response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadData);

        let response = Response::new(200).with_body("[]");
        let err = list(&Operation::QUEUE_LIST, "items", &response).unwrap_err();
        assert_eq!(err.detail(), "returned bad data");
    }

    #[test]
    fn test_error_header_becomes_conflict() {
        let response = Response::new(400).with_header("X-Error", "A job already exists with the name 'test'");
        let err = empty(&Operation::JOB_CREATE, &["test"], &response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.detail(), "A job already exists with the name 'test'");
    }

    #[test]
    fn test_unexpected_status() {
        let err = empty(&Operation::JOB_DISABLE, &["test"], &Response::new(500)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OperationFailed);
        assert_eq!(err.detail(), "unexpected status code: 500");
    }

    #[test]
    fn test_acknowledged_ignores_special_statuses() {
        let op = Operation::QUEUE_CANCEL;
        assert!(acknowledged(&op, &Response::new(204)).is_ok());

        let err = acknowledged(&op, &Response::new(404)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OperationFailed);
        assert_eq!(err.detail(), "unexpected status code: 404");

        let response = Response::new(400).with_header("X-Error", "nope");
        let err = acknowledged(&op, &response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OperationFailed);
        assert_eq!(err.detail(), "unexpected status code: 400");
    }

    #[test]
    fn test_location() {
        let response = Response::new(201).with_header("Location", "http://localhost:8080/queue/item/42/");
        assert_eq!(location(&Operation::JOB_BUILD, &["test"], &response).unwrap(), 42);
    }

    #[test]
    fn test_location_missing_is_protocol() {
        let err = location(&Operation::JOB_BUILD, &["test"], &Response::new(201)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);

        let response = Response::new(201).with_header("Location", "http://localhost:8080/job/test/");
        let err = location(&Operation::JOB_BUILD, &["test"], &response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[test]
    fn test_destroyed() {
        let op = Operation::JOB_DESTROY;
        assert!(destroyed(&op, "test", &Response::new(302)).is_ok());

        let err = destroyed(&op, "test", &Response::new(200)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OperationFailed);
        assert_eq!(err.detail(), "failed to delete: test");

        let err = destroyed(&op, "test", &Response::new(404)).unwrap_err();
        assert_eq!(err.detail(), "test not found");
    }

    #[test]
    fn test_text_passthrough() {
        let response = Response::new(200).with_body("<project/>");
        assert_eq!(text(&Operation::JOB_CONFIG_GET, &["test"], &response).unwrap(), "<project/>");
    }

    proptest! {
        #[test]
        fn prop_location_id_matches_embedded_integer(id in 1u64..u64::MAX, slash in any::<bool>()) {
            let location = format!(
                "http://localhost:8080/queue/item/{id}{}",
                if slash { "/" } else { "" }
            );
            prop_assert_eq!(parse_location_id(&location), Some(id));
        }
    }
}

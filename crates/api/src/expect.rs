//! Assertions over responses
//!
//! Every helper returns an [`ApiError`] naming what was expected and what
//! was observed. None of them retries or tolerates a discrepancy.

use std::fmt::Display;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use sitecheck_common::{compare_person, PersonRecord};

use crate::client::ApiResponse;
use crate::error::{ApiError, ApiResult};

impl ApiResponse {
    pub fn expect_status(&self, expected: StatusCode) -> ApiResult<&Self> {
        if self.status != expected {
            return Err(ApiError::UnexpectedStatus {
                method: self.method.to_string(),
                path: self.path.clone(),
                expected,
                actual: self.status,
            });
        }
        Ok(self)
    }

    /// Decode the body, treating an empty body as its own failure
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        if self.body.trim().is_empty() {
            return Err(ApiError::MissingBody {
                method: self.method.to_string(),
                path: self.path.clone(),
            });
        }
        serde_json::from_str(&self.body).map_err(|source| ApiError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Decode a JSON array and check its length
    pub fn json_list<T: DeserializeOwned>(&self, expected_len: usize) -> ApiResult<Vec<T>> {
        let items: Vec<T> = self.json()?;
        expect_count(&self.path, expected_len, items.len())?;
        Ok(items)
    }
}

pub fn expect_count(path: &str, expected: usize, actual: usize) -> ApiResult<()> {
    if expected != actual {
        return Err(ApiError::Count {
            path: path.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

pub fn expect_value<T: PartialEq + Display>(field: &str, expected: T, actual: T) -> ApiResult<()> {
    if expected != actual {
        return Err(ApiError::Value {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Inverse of [`expect_value`], for fields that must have changed
pub fn expect_changed<T: PartialEq + Display>(field: &str, before: T, after: T) -> ApiResult<()> {
    if before == after {
        return Err(ApiError::Value {
            field: field.to_string(),
            expected: format!("a value other than {}", before),
            actual: after.to_string(),
        });
    }
    Ok(())
}

/// Echoed identifier must be present and equal to `expected`
pub fn expect_id(record: &PersonRecord, expected: u32) -> ApiResult<()> {
    let actual = record
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "<missing>".to_string());
    expect_value("id", expected.to_string(), actual)
}

pub fn expect_same_person(expected: &PersonRecord, actual: &PersonRecord) -> ApiResult<()> {
    compare_person(expected, actual)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use sitecheck_common::Post;

    fn response(status: StatusCode, body: &str) -> ApiResponse {
        ApiResponse {
            method: Method::GET,
            path: "/users/2/posts".to_string(),
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_status_mismatch_names_both_codes() {
        let err = response(StatusCode::NOT_FOUND, "{}")
            .expect_status(StatusCode::BAD_REQUEST)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("400"), "{}", msg);
        assert!(msg.contains("404"), "{}", msg);
        assert!(msg.contains("/users/2/posts"), "{}", msg);
    }

    #[test]
    fn test_empty_body_is_missing() {
        let err = response(StatusCode::OK, "  ").json::<Vec<Post>>().unwrap_err();
        assert!(matches!(err, ApiError::MissingBody { .. }));
    }

    #[test]
    fn test_list_length_checked() {
        let body = r#"[{"userId":2,"id":11,"title":"t","body":"b"}]"#;
        let err = response(StatusCode::OK, body).json_list::<Post>(10).unwrap_err();
        assert!(matches!(err, ApiError::Count { expected: 10, actual: 1, .. }));
    }

    #[test]
    fn test_missing_id_reported() {
        let err = expect_id(&PersonRecord::default(), 11).unwrap_err();
        assert!(err.to_string().contains("<missing>"));
    }

    #[test]
    fn test_unchanged_value_rejected() {
        assert!(expect_changed("username", "Bret", "Bret").is_err());
        assert!(expect_changed("username", "Bret", "username").is_ok());
    }
}

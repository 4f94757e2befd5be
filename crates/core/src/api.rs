//! The JSON response envelope shared by every `/api/*` endpoint.
//!
//! ```json
//! { "success": true,  "data": { ... } }
//! { "success": false, "error": "Product not found" }
//! ```

use serde::{Deserialize, Serialize};

/// Uniform API response wrapper.
///
/// Exactly one of `data` / `error` is present, matching `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Convert into a `Result`, treating a failed envelope as `Err(message)`.
    ///
    /// # Errors
    ///
    /// Returns the envelope's error message when `success` is false or the
    /// payload is missing.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| "missing data".to_owned())),
        }
    }
}

/// A page of list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// Build a page, deriving `total_pages` from `total` and `per_page`.
    #[must_use]
    pub const fn new(items: Vec<T>, total: usize, page: usize, per_page: usize) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_ok_shape() {
        let body = serde_json::to_value(ApiResponse::ok(json!({"id": 1}))).unwrap();
        assert_eq!(body, json!({"success": true, "data": {"id": 1}}));
    }

    #[test]
    fn test_error_shape() {
        let body = serde_json::to_value(ApiResponse::<()>::error("Product not found")).unwrap();
        assert_eq!(body, json!({"success": false, "error": "Product not found"}));
    }

    #[test]
    fn test_into_result() {
        let ok: ApiResponse<u32> = serde_json::from_value(json!({"success": true, "data": 3})).unwrap();
        assert_eq!(ok.into_result(), Ok(3));

        let err: ApiResponse<u32> =
            serde_json::from_value(json!({"success": false, "error": "nope"})).unwrap();
        assert_eq!(err.into_result(), Err("nope".to_owned()));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(Paginated::<u8>::new(vec![], 41, 1, 20).total_pages, 3);
        assert_eq!(Paginated::<u8>::new(vec![], 40, 1, 20).total_pages, 2);
        assert_eq!(Paginated::<u8>::new(vec![], 0, 1, 20).total_pages, 0);
        assert_eq!(Paginated::<u8>::new(vec![], 5, 1, 0).total_pages, 0);
    }
}

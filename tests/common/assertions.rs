//! Custom assertion macros and utilities
//!
//! Provides assertions for the `{ success, data }` / `{ success, error }`
//! response envelope.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert a failed response: status code, `success: false` and a string `error`
///
/// Returns the error message.
#[macro_export]
macro_rules! assert_error_response {
    ($response:expr, $status:expr) => {{
        let response = $response;
        assert_eq!(response.status_code(), $status, "body: {}", response.text());
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        body["error"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| panic!("error envelope without message: {}", body))
    }};
}

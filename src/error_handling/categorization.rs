//! Error categorization.

use super::stats::ProcessingStats;
use super::types::ErrorType;

/// Categorizes a transport-level `reqwest::Error` into an `ErrorType`.
///
/// Only transport failures reach here: any HTTP response, whatever its status,
/// counts as an answer.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_body() || error.is_decode() {
        ErrorType::HttpRequestBodyError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Records a transport failure in the run statistics and returns its category.
pub fn update_error_stats(stats: &ProcessingStats, error: &reqwest::Error) -> ErrorType {
    let error_type = categorize_reqwest_error(error);
    stats.increment_error(error_type);
    error_type
}

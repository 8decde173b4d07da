//! SendGrid API endpoint groups.

mod contacts;
mod lists;
mod mail;
mod senders;
mod single_sends;
mod stats;
mod suppressions;
mod templates;
mod validations;

pub use contacts::*;
pub use lists::*;
pub use mail::*;
pub use senders::*;
pub use single_sends::*;
pub use stats::*;
pub use suppressions::*;
pub use templates::*;
pub use validations::*;

use crate::error::{SendGridError, SendGridResult};
use serde::{Deserialize, Serialize};
use url::Url;

/// Build a request path from fixed parts and caller-supplied ids.
///
/// Every part is percent-encoded as one segment, so an id can never address
/// another endpoint. Empty and dot segments are rejected.
pub(crate) fn resource_path(segments: &[&str]) -> SendGridResult<String> {
    if let Some(bad) = segments
        .iter()
        .find(|s| s.trim().is_empty() || matches!(**s, "." | ".."))
    {
        return Err(SendGridError::InvalidArgument(format!(
            "{:?} is not a valid resource id",
            bad
        )));
    }

    let mut url = Url::parse("http://localhost/")?;
    url.path_segments_mut()
        .map_err(|_| SendGridError::Config("cannot build request path".to_string()))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

/// Acknowledgement for asynchronous marketing jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResponse {
    pub job_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_path_plain_ids() {
        assert_eq!(
            resource_path(&["v3", "templates", "d-123", "versions"]).unwrap(),
            "/v3/templates/d-123/versions"
        );
    }

    #[test]
    fn test_resource_path_escapes_separators() {
        assert_eq!(
            resource_path(&["v3", "marketing", "lists", "../../templates/d-1?x=1#f"]).unwrap(),
            "/v3/marketing/lists/..%2F..%2Ftemplates%2Fd-1%3Fx=1%23f"
        );
        assert_eq!(
            resource_path(&["v3", "templates", "%2e%2e"]).unwrap(),
            "/v3/templates/%252e%252e"
        );
    }

    #[test]
    fn test_resource_path_rejects_dot_and_empty_ids() {
        for id in ["", " ", ".", ".."] {
            let err = resource_path(&["v3", "marketing", "lists", id]).unwrap_err();
            assert!(matches!(err, SendGridError::InvalidArgument(_)), "{:?}", id);
        }
    }
}

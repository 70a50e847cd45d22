//! Query parameter types for API handlers.

use serde::{Deserialize, Deserializer};

/// Query parameters for `GET /notifications`.
///
/// Pagination values are parsed leniently: anything that is not an integer
/// is treated as absent and replaced by the default during normalization.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationPageParams {
    /// 1-indexed page number. Defaults to 1.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: Option<i64>,
    /// Items per page. Defaults to the configured default, capped at the max.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page_size: Option<i64>,
    /// If `true`, return only unread notifications. Defaults to `false`.
    #[serde(default)]
    pub unread_only: bool,
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

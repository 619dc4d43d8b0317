use serde::{Deserialize, Serialize};

/// Wire format for all timestamps: `2024-01-15 09:30:00`.
///
/// Both the robot intake API and the JSON export use this exact format;
/// it sorts lexicographically, so stored stamps can be compared as text.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parameters for list/query operations.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    /// Maximum number of results to return.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Offset for pagination.
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Result wrapper for list operations.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Current UTC time in the wire stamp format.
pub fn now_stamp() -> String {
    chrono::Utc::now().format(STAMP_FORMAT).to_string()
}

/// Parse a wire-format stamp. Rejects anything not matching
/// [`STAMP_FORMAT`] exactly.
pub fn parse_stamp(s: &str) -> Result<chrono::NaiveDateTime, chrono::ParseError> {
    chrono::NaiveDateTime::parse_from_str(s, STAMP_FORMAT)
}

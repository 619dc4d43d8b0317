use serde::{Deserialize, Serialize};

/// Order — a standing request: "notify me when this serial exists".
///
/// The requested serial need not correspond to any existing robot at
/// creation time. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Generated ID — primary key.
    pub id: String,

    /// Owning customer — must exist at creation.
    pub customer_id: String,

    /// Serial the customer is waiting for.
    pub robot_serial: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Order joined with its customer's email, as shown in list views.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithCustomer {
    pub id: String,
    pub customer_id: String,
    pub customer_email: String,
    pub robot_serial: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

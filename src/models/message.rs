use serde::{Deserialize, Serialize};

/// A contact-form submission. Created unauthenticated from the public site,
/// read and managed from the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use validator::Validate;

/// A prospective customer as stored by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub instagram: String,
    pub sector: String,
    #[serde(default)]
    pub is_contracted: bool,
    #[serde(default)]
    pub mail_opened: bool,
    #[serde(default)]
    pub replied: bool,
}

/// Payload for `POST /api/instagram`. Every field is required.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewLead {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Instagram link is required"))]
    pub instagram: String,
    #[validate(length(min = 1, message = "Sector is required"))]
    pub sector: String,
}

/// Payload for `PUT /api/customers/:id`. Absent fields are left untouched
/// by the backend and omitted from the body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_contracted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_opened: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replied: Option<bool>,
}

impl LeadUpdate {
    /// Single-field update flipping the contact flag on.
    pub fn contacted() -> Self {
        Self {
            is_contracted: Some(true),
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalResponse {
    pub total: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Fields of the creation form.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LeadField {
    Name,
    Email,
    Phone,
    Instagram,
    Sector,
}

/// Fields of the search-result edit buffer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum EditField {
    Name,
    Email,
    Phone,
    Instagram,
    Sector,
    IsContracted,
    MailOpened,
    Replied,
}

impl EditField {
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            EditField::IsContracted | EditField::MailOpened | EditField::Replied
        )
    }
}

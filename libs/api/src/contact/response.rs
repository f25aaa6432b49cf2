use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

impl From<ContactEntity> for ContactResponse {
    fn from(value: ContactEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
            status: value.status.as_str().to_string(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetContactsResponse {
    pub contacts: Vec<ContactResponse>,
}

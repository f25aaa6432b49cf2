use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use entity::prelude::*;
use repository::Storage as _;
use tracing::info;

pub mod request;
pub mod response;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::{ApiError, ApiState};

use self::request::ContactRequest;
use self::response::{ContactResponse, GetContactsResponse};

/// Contact form submission
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message stored", body = ContactResponse),
        (status = 400, description = "Invalid submission")
    )
)]
pub async fn submit_contact(
    State(state): State<ApiState>,
    Json(body): Json<ContactRequest>,
) -> ApiResponse<Json<ContactResponse>> {
    let contact = validate_contact(body)?;

    let contact = state
        .storage
        .create_contact(contact)
        .await
        .into_response("failed to save message")?;

    info!(task = "contact message", id = contact.id);

    Ok(Json(contact.into()))
}

pub async fn get_contacts(
    State(state): State<ApiState>,
) -> ApiResponse<Json<GetContactsResponse>> {
    let contacts = state
        .storage
        .get_contacts()
        .await
        .into_response("failed to load messages")?;

    Ok(Json(GetContactsResponse {
        contacts: contacts.into_iter().map(ContactResponse::from).collect(),
    }))
}

pub async fn mark_contact_read(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> ApiResponse<Json<ContactResponse>> {
    let contact = state
        .storage
        .mark_contact_read(id)
        .await
        .into_response("failed to update message")?;

    let Some(contact) = contact else {
        return Err(ApiError::NotFound("message not found".to_string()));
    };

    Ok(Json(contact.into()))
}

pub async fn delete_contact(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> ApiResponse<StatusCode> {
    let deleted = state
        .storage
        .delete_contact(id)
        .await
        .into_response("failed to delete message")?;
    if !deleted {
        return Err(ApiError::NotFound("message not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn validate_contact(body: ContactRequest) -> Result<NewContact, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::ClientError(
            "name must not be empty".to_string(),
        ));
    }
    if body.subject.trim().is_empty() {
        return Err(ApiError::ClientError(
            "subject must not be empty".to_string(),
        ));
    }
    if body.message.trim().is_empty() {
        return Err(ApiError::ClientError(
            "message must not be empty".to_string(),
        ));
    }
    if !is_valid_email(&body.email) {
        return Err(ApiError::ClientError(
            "email address is not valid".to_string(),
        ));
    }

    Ok(NewContact {
        name: body.name.trim().to_string(),
        email: body.email.trim().to_string(),
        subject: body.subject.trim().to_string(),
        message: body.message,
    })
}

/// Something before the `@`, a dot somewhere in the domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };

    !local.is_empty() && domain.contains('.')
}

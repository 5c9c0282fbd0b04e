//! Contact inbox: public submissions, administrator resolution.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::ContactMessage;
use quill_core::manager::NewContactMessage;
use quill_core::ports::ContactMessageQuery;
use quill_shared::ListResponse;
use quill_shared::dto::{ContactListParams, ContactMessageRequest, ContactMessageResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(message: ContactMessage) -> ContactMessageResponse {
    ContactMessageResponse {
        id: message.id,
        name: message.name,
        email: message.email,
        subject: message.subject,
        message: message.message,
        is_resolved: message.is_resolved,
        created_on: message.created_on,
    }
}

/// POST /api/contact - public, no authentication required.
pub async fn submit(
    state: web::Data<AppState>,
    body: web::Json<ContactMessageRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let message = state
        .contact
        .create(NewContactMessage {
            name: req.name,
            email: req.email,
            subject: req.subject,
            message: req.message,
        })
        .await?;

    Ok(HttpResponse::Created().json(to_response(message)))
}

/// GET /api/contact-messages - the inbox list screen.
pub async fn list(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<ContactListParams>,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let params = params.into_inner();
    let query = ContactMessageQuery {
        is_resolved: params.is_resolved,
        created_after: params.created_after,
        created_before: params.created_before,
        search: params.search,
        limit: params.limit,
        offset: params.offset,
    };

    let messages = state.contact.list(&query).await?;
    let items: Vec<ContactMessageResponse> = messages.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(ListResponse::new(items)))
}

/// GET /api/contact-messages/{id}
pub async fn get(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let message = state.contact.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(message)))
}

/// PUT /api/contact-messages/{id}/resolve
pub async fn resolve(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let message = state.contact.mark_resolved(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(message)))
}

/// PUT /api/contact-messages/{id}/unresolve
pub async fn unresolve(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let message = state.contact.mark_unresolved(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(message)))
}

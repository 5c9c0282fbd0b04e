//! Comment screens: creation by readers, moderation by administrators.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_core::manager::NewComment;
use quill_core::ports::CommentQuery;
use quill_shared::dto::{
    BulkApproveRequest, BulkApproveResponse, CommentCreateRequest, CommentListParams,
    CommentResponse, CommentUpdateRequest,
};
use quill_shared::{ApiResponse, ListResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        content: comment.content,
        approved: comment.approved,
        created_on: comment.created_on,
        updated_on: comment.updated_on,
    }
}

/// POST /api/posts/{id}/comments - any authenticated user may comment.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentCreateRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .create(NewComment {
            post_id: path.into_inner(),
            author_id: identity.user_id,
            content: body.into_inner().content,
        })
        .await?;

    Ok(HttpResponse::Created().json(to_response(comment)))
}

/// GET /api/comments - the moderation list screen.
pub async fn list(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<CommentListParams>,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let params = params.into_inner();
    let query = CommentQuery {
        post_id: params.post_id,
        author_id: params.author_id,
        approved: params.approved,
        created_after: params.created_after,
        created_before: params.created_before,
        search: params.search,
        limit: params.limit,
        offset: params.offset,
    };

    let comments = state.comments.list(&query).await?;
    let items: Vec<CommentResponse> = comments.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(ListResponse::new(items)))
}

/// PUT /api/comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentUpdateRequest>,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let comment = state
        .comments
        .update(path.into_inner(), body.into_inner().content)
        .await?;
    Ok(HttpResponse::Ok().json(to_response(comment)))
}

/// POST /api/comments/{id}/approve
pub async fn approve(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let comment = state.comments.approve(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(comment)))
}

/// POST /api/comments/approve - the bulk moderation action.
pub async fn bulk_approve(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<BulkApproveRequest>,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let approved = state.comments.bulk_approve(&body.into_inner().ids).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        BulkApproveResponse { approved },
        format!("{approved} comments approved"),
    )))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    state.comments.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

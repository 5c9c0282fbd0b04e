//! Post screens: list/filter/search, CRUD, and the likes set.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus};
use quill_core::manager::{PostChanges, PostDraft};
use quill_core::ports::PostQuery;
use quill_shared::ListResponse;
use quill_shared::dto::{
    LikeCountResponse, PostCreateRequest, PostListParams, PostResponse, PostUpdateRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        slug: post.slug,
        author_id: post.author_id,
        content: post.content,
        excerpt: post.excerpt,
        featured_image: post.featured_image,
        status: post.status.into(),
        created_on: post.created_on,
        updated_on: post.updated_on,
        published_on: post.published_on,
    }
}

fn parse_status(value: Option<i32>) -> Result<Option<PostStatus>, AppError> {
    value
        .map(|v| {
            PostStatus::from_i32(v)
                .ok_or_else(|| AppError::BadRequest(format!("unknown post status {v}")))
        })
        .transpose()
}

/// GET /api/posts - the post list screen (filter + search).
pub async fn list(
    state: web::Data<AppState>,
    _identity: Identity,
    params: web::Query<PostListParams>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = PostQuery {
        status: parse_status(params.status)?,
        author_id: params.author_id,
        created_after: params.created_after,
        created_before: params.created_before,
        search: params.search,
        limit: params.limit,
        offset: params.offset,
    };

    let posts = state.posts.list(&query).await?;
    let items: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(ListResponse::new(items)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostCreateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Only administrators may create posts on someone else's behalf.
    if req.author_id.is_some_and(|author| author != identity.user_id) && !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let draft = PostDraft {
        title: req.title,
        slug: req.slug,
        author_id: req.author_id,
        content: req.content,
        excerpt: req.excerpt,
        featured_image: req.featured_image,
        status: parse_status(req.status)?,
    };

    let post = state.posts.create(draft, identity.user_id).await?;
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts/{id}
pub async fn get(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostUpdateRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let post = state.posts.get(id).await?;
    if post.author_id != identity.user_id && !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let changes = PostChanges {
        title: req.title,
        slug: req.slug,
        content: req.content,
        excerpt: req.excerpt,
        featured_image: req.featured_image,
        status: parse_status(req.status)?,
    };

    let post = state.posts.update(id, changes).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id} - cascades to the post's comments.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state.posts.get(id).await?;
    if post.author_id != identity.user_id && !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    state.posts.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/posts/{id}/likes
pub async fn like_count(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let likes = state.posts.count_likes(post_id).await?;
    Ok(HttpResponse::Ok().json(LikeCountResponse { post_id, likes }))
}

/// PUT /api/posts/{id}/like - the acting user likes the post.
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    state.posts.like(post_id, identity.user_id).await?;
    let likes = state.posts.count_likes(post_id).await?;
    Ok(HttpResponse::Ok().json(LikeCountResponse { post_id, likes }))
}

/// DELETE /api/posts/{id}/like
pub async fn unlike(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    state.posts.unlike(post_id, identity.user_id).await?;
    let likes = state.posts.count_likes(post_id).await?;
    Ok(HttpResponse::Ok().json(LikeCountResponse { post_id, likes }))
}

//! HTTP handlers and route configuration.
//!
//! The admin screens are assembled here explicitly, one static route table
//! over the three entity managers.

mod auth;
mod comments;
mod contact;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/contact", web::post().to(contact::submit))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post screens
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/likes", web::get().to(posts::like_count))
                    .route("/{id}/like", web::put().to(posts::like))
                    .route("/{id}/like", web::delete().to(posts::unlike))
                    .route("/{id}/comments", web::post().to(comments::create)),
            )
            // Comment moderation screens
            .service(
                web::scope("/comments")
                    .route("", web::get().to(comments::list))
                    .route("/approve", web::post().to(comments::bulk_approve))
                    .route("/{id}", web::put().to(comments::update))
                    .route("/{id}", web::delete().to(comments::delete))
                    .route("/{id}/approve", web::post().to(comments::approve)),
            )
            // Contact inbox screens
            .service(
                web::scope("/contact-messages")
                    .route("", web::get().to(contact::list))
                    .route("/{id}", web::get().to(contact::get))
                    .route("/{id}/resolve", web::put().to(contact::resolve))
                    .route("/{id}/unresolve", web::put().to(contact::unresolve)),
            ),
    );
}

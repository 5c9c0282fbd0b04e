//! SeaORM entities mirroring the blog schema.

pub mod comment;
pub mod contact_message;
pub mod post;
pub mod post_like;
pub mod user;

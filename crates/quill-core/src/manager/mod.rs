//! Entity managers - one per record type.
//!
//! A manager owns the validation and derived-field rules for its entity and
//! applies them as an explicit pre-commit step before handing the record to
//! the repository. The entities themselves stay plain data.

mod comment;
mod contact_message;
mod post;

pub use comment::{CommentManager, NewComment};
pub use contact_message::{ContactMessageManager, NewContactMessage};
pub use post::{PostChanges, PostDraft, PostManager};

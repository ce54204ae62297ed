//! MySQL repository implementations

mod chat_repository_impl;
mod user_repository_impl;

pub use chat_repository_impl::MySqlChatRepository;
pub use user_repository_impl::MySqlUserRepository;

/// Whether a SQLx error is a unique/primary key violation
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.is_unique_violation(),
        _ => false,
    }
}

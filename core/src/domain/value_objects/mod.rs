//! Value objects returned by domain services.

mod login_result;

pub use login_result::LoginResult;

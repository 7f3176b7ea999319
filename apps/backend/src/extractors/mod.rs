pub mod credential;
pub mod current_user;

pub use credential::credential_from_request;
pub use current_user::CurrentUser;

pub mod claims;
pub mod cookie;
pub mod gate;
pub mod token;

pub use claims::Claims;
pub use cookie::{auth_cookie, logout_cookie, TOKEN_COOKIE};
pub use gate::{authenticate, AuthRejection, Identity, RejectionKind};
pub use token::{mint_token, mint_token_with_expiry, verify_token};

pub mod claims;
pub mod jwt;
pub mod session;

pub use claims::Claims;
pub use jwt::JwtService;
pub use session::{expired_session_cookie, session_cookie, AuthenticatedUser, SESSION_COOKIE};

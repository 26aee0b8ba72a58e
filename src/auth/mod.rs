pub mod claims;
pub mod jwt;
pub mod utils;

pub use claims::Claims;
pub use jwt::JwtService;
pub use utils::{extract_identity_from_context, require_author, require_owner_or_author};

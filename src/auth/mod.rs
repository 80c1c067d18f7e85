pub mod claims;
pub mod jwt;
pub mod middleware;

pub use claims::{Claims, ConsentClaims, RefreshClaims};
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser, ConsentGate, MaybeAuthenticatedUser};

pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::AccessToken;
pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;

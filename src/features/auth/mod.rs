mod validator;

pub mod guards;
pub mod model;

pub use model::{AuthenticatedUser, CurrentUser};
pub use validator::JwtValidator;

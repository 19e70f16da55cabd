pub mod models;
pub mod services;
pub mod errors;
pub mod routes;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use routes::*;

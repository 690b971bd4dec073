pub mod errors;
pub mod person;
pub mod search;

pub use errors::{ServiceError, ServiceResult};

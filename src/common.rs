pub mod error;
pub mod formato;

pub use error::AppError;

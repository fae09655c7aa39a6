pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{NeuriteError, Result};
pub use tolerance::Tolerance;

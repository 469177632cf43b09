// Application layer - the bank operations the presentation layer calls

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;

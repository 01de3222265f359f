//! Cooperative cancellation for form instances.

mod token;

pub use token::CancellationToken;

mod error;
mod path;
mod query;
mod request_context;
mod request_ctx;
mod request_id;
#[cfg(test)]
mod tests;

pub use error::*;
pub use path::*;
pub use query::*;
pub use request_context::*;
pub use request_ctx::*;
pub use request_id::*;

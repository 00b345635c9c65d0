mod kind;
mod router;

pub use kind::RouteKind;
pub use router::{RouteEntry, Router};

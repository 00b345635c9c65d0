mod rejection;
mod resource;
mod writer;

pub(crate) use rejection::RejectionHandler;
pub(crate) use resource::ResourceHandler;

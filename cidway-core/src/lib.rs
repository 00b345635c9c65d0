pub mod cli;
pub mod conf;
pub mod ctx;
pub mod logging;
mod proxy;
pub mod resolve;
pub mod route;
pub mod server;

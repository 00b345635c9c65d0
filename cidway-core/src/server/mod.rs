mod pid;
mod runtime;
mod setup;
#[cfg(test)]
mod tests;

pub use pid::PidFile;
pub use runtime::{RuntimeState, build_runtime_state, build_runtime_state_with_fetcher};
pub use setup::{build_pingora_server, run};

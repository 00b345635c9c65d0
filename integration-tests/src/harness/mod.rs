mod config;
pub mod gateway;
pub mod server;
pub mod tracing;

pub use gateway::{FakeGateway, RecordedRequest, ScriptedResponse};
pub use server::{TestServer, free_port, wait_for_event};
pub use tracing::{CapturedEvent, init_test_tracing};

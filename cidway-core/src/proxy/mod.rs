mod gateway;
mod handlers;

pub use gateway::CidwayGateway;

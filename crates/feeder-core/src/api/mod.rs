mod gateway;
pub mod wire;

pub use gateway::ApiGateway;
pub use wire::UserInfo;

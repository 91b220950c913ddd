pub mod shadow_gateway;

pub use shadow_gateway::ShadowGateway;

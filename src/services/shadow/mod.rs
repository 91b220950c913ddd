pub mod shadow_client;

pub use shadow_client::{IotShadowClient, ShadowService};

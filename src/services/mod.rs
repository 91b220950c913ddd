pub mod rest_client;
pub mod shadow;

pub use rest_client::RestClient;
pub use shadow::{IotShadowClient, ShadowService};

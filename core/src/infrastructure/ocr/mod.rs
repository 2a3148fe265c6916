pub mod cloud_vision_client;
pub mod credentials;

pub use cloud_vision_client::CloudVisionOcrClient;
pub use credentials::VisionCredentials;

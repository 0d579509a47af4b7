mod api_key;
mod api_version;

pub use api_key::ApiKey;
pub use api_version::ApiVersion;

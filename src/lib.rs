mod core;

pub use crate::core::domain::error::{
    DeserializationError, MaasError, MaasResult, ValidationError,
};
pub use crate::core::domain::model::{
    BlockDevice, BootResource, Device, Domain, Fabric, FileSystem, Interface, Link, Machine,
    Partition, Pool, Space, StaticRoute, Subnet, Tag, Vlan, VolumeGroup, Zone,
};
pub use crate::core::domain::value_object::{ApiKey, ApiVersion};
pub use crate::core::infrastructure::api_client::{ApiClient, ClientConfig, RateLimitConfig};

use url::Url;

/// A client for interacting with the MAAS region API.
///
/// The client negotiates the controller's API version once at build time;
/// every typed operation fetches JSON and hands it to the decoding core,
/// which dispatches to the reader declared for the negotiated version.
///
/// # Examples
///
/// ```no_run
/// use maas_client::{MaasClient, MaasResult};
///
/// #[tokio::main]
/// async fn main() -> MaasResult<()> {
///     let client = MaasClient::builder()
///         .base_url("http://192.168.100.2:5240/MAAS/")?
///         .api_key("consumer:token:secret")?
///         .build()
///         .await?;
///
///     for machine in client.machines().await? {
///         println!("{} is {}", machine.hostname(), machine.status_name());
///     }
///     Ok(())
/// }
/// ```
pub struct MaasClient {
    api: ApiClient,
}

/// Builder for MaasClient configuration
#[derive(Debug, Default)]
pub struct MaasClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    config: ClientConfig,
}

impl MaasClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> MaasResult<Self> {
        self.base_url = Some(base_url.into());
        Ok(self)
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> MaasResult<Self> {
        self.api_key = Some(api_key.into());
        Ok(self)
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the configuration, connects, and negotiates the API
    /// version with the region controller.
    pub async fn build(self) -> MaasResult<MaasClient> {
        let base_url = self.base_url.ok_or_else(|| {
            MaasError::Validation(ValidationError::Field {
                field: "base_url".to_string(),
                message: "Base URL is required".to_string(),
            })
        })?;
        let base_url = Url::parse(&base_url).map_err(|e| {
            MaasError::Validation(ValidationError::Format(format!(
                "Base URL '{}' is invalid: {}",
                base_url, e
            )))
        })?;

        let api_key = ApiKey::new(self.api_key.ok_or_else(|| {
            MaasError::Validation(ValidationError::Field {
                field: "api_key".to_string(),
                message: "API key is required".to_string(),
            })
        })?)?;

        let api = ApiClient::connect(base_url, api_key, self.config).await?;
        Ok(MaasClient { api })
    }
}

impl MaasClient {
    /// Creates a new builder for MaasClient configuration
    pub fn builder() -> MaasClientBuilder {
        MaasClientBuilder::default()
    }

    /// The negotiated controller version used for decode dispatch.
    pub fn api_version(&self) -> ApiVersion {
        self.api.api_version()
    }

    /// Capabilities the controller advertised during negotiation.
    pub fn capabilities(&self) -> &[String] {
        self.api.capabilities()
    }

    /// Lists all machines known to the controller.
    pub async fn machines(&self) -> MaasResult<Vec<Machine>> {
        let body = self.api.get("machines/").await?;
        Machine::read_list(self.api.api_version(), &body)
    }

    /// Fetches a single machine by system ID.
    pub async fn machine(&self, system_id: &str) -> MaasResult<Machine> {
        let body = self.api.get(&format!("machines/{}/", system_id)).await?;
        Machine::read(self.api.api_version(), &body)
    }

    pub async fn devices(&self) -> MaasResult<Vec<Device>> {
        let body = self.api.get("devices/").await?;
        Device::read_list(self.api.api_version(), &body)
    }

    pub async fn fabrics(&self) -> MaasResult<Vec<Fabric>> {
        let body = self.api.get("fabrics/").await?;
        Fabric::read_list(self.api.api_version(), &body)
    }

    pub async fn spaces(&self) -> MaasResult<Vec<Space>> {
        let body = self.api.get("spaces/").await?;
        Space::read_list(self.api.api_version(), &body)
    }

    pub async fn subnets(&self) -> MaasResult<Vec<Subnet>> {
        let body = self.api.get("subnets/").await?;
        Subnet::read_list(self.api.api_version(), &body)
    }

    pub async fn zones(&self) -> MaasResult<Vec<Zone>> {
        let body = self.api.get("zones/").await?;
        Zone::read_list(self.api.api_version(), &body)
    }

    pub async fn pools(&self) -> MaasResult<Vec<Pool>> {
        let body = self.api.get("resourcepools/").await?;
        Pool::read_list(self.api.api_version(), &body)
    }

    pub async fn tags(&self) -> MaasResult<Vec<Tag>> {
        let body = self.api.get("tags/").await?;
        Tag::read_list(self.api.api_version(), &body)
    }

    pub async fn tag(&self, name: &str) -> MaasResult<Tag> {
        let body = self.api.get(&format!("tags/{}/", name)).await?;
        Tag::read(self.api.api_version(), &body)
    }

    /// Lists the machines carrying the named tag.
    pub async fn machines_with_tag(&self, name: &str) -> MaasResult<Vec<Machine>> {
        let body = self
            .api
            .get_op(&format!("tags/{}/", name), "machines")
            .await?;
        Machine::read_list(self.api.api_version(), &body)
    }

    pub async fn static_routes(&self) -> MaasResult<Vec<StaticRoute>> {
        let body = self.api.get("static-routes/").await?;
        StaticRoute::read_list(self.api.api_version(), &body)
    }

    pub async fn boot_resources(&self) -> MaasResult<Vec<BootResource>> {
        let body = self.api.get("boot-resources/").await?;
        BootResource::read_list(self.api.api_version(), &body)
    }

    pub async fn domains(&self) -> MaasResult<Vec<Domain>> {
        let body = self.api.get("domains/").await?;
        Domain::read_list(self.api.api_version(), &body)
    }

    /// Lists the block devices of one machine.
    pub async fn block_devices(&self, system_id: &str) -> MaasResult<Vec<BlockDevice>> {
        let body = self
            .api
            .get(&format!("nodes/{}/blockdevices/", system_id))
            .await?;
        BlockDevice::read_list(self.api.api_version(), &body)
    }

    /// Lists the volume groups of one machine.
    pub async fn volume_groups(&self, system_id: &str) -> MaasResult<Vec<VolumeGroup>> {
        let body = self
            .api
            .get(&format!("nodes/{}/volume-groups/", system_id))
            .await?;
        VolumeGroup::read_list(self.api.api_version(), &body)
    }
}

#[cfg(test)]
mod tests;

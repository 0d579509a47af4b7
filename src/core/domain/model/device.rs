//! Devices: non-deployable network hosts known to the controller.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    model::zone::{self, Zone},
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// A device (e.g. a BMC or a container) attached to the network.
///
/// The parent machine, when there is one, is referenced by system ID only;
/// resolving it is the caller's lookup, keeping the entity tree acyclic.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    system_id: String,
    hostname: String,
    fqdn: String,
    ip_addresses: Vec<String>,
    zone: Zone,
    parent: String,
}

impl Device {
    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    pub fn ip_addresses(&self) -> &[String] {
        &self.ip_addresses
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// System ID of the owning machine, empty for standalone devices.
    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Device> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Device>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Device>> =
    LazyLock::new(|| ReaderRegistry::new("device", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Device> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("system_id", FieldSpec::required(Shape::String)),
        ("hostname", FieldSpec::required(Shape::String)),
        ("fqdn", FieldSpec::required(Shape::String)),
        (
            "ip_addresses",
            FieldSpec::defaulted(Shape::StringList, json!([])),
        ),
        ("zone", FieldSpec::required(Shape::Map)),
        (
            "parent",
            FieldSpec::defaulted(Shape::nullable(Shape::String), Value::Null),
        ),
    ])
});

fn read_2_0(target: ApiVersion, value: &Value) -> MaasResult<Device> {
    let fields = SCHEMA_2_0.coerce(value)?;
    let zone = zone::registry()
        .decode(target, fields.map("zone")?)
        .map_err(|e| e.annotate("zone"))?;
    Ok(Device {
        system_id: fields.string("system_id")?,
        hostname: fields.string("hostname")?,
        fqdn: fields.string("fqdn")?,
        ip_addresses: fields.string_list("ip_addresses")?,
        zone,
        parent: fields.string("parent")?,
    })
}

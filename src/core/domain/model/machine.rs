//! Machines, the root of the entity tree.
//!
//! A machine owns its network and storage collections outright: interfaces
//! (which own links, subnets, VLANs) and block devices (which own partitions
//! and filesystems). Decoding is fail-fast; a machine with one malformed
//! nested interface is itself invalid and no partial machine value exists.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    model::block_device::{self, BlockDevice},
    model::interface::{self, Interface},
    model::pool::{self, Pool},
    model::zone::{self, Zone},
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::LazyLock;

/// A machine managed by the region controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    system_id: String,
    hostname: String,
    fqdn: String,
    architecture: String,
    memory: u64,
    cpu_count: u64,
    osystem: String,
    distro_series: String,
    power_state: String,
    status_name: String,
    status_message: String,
    ip_addresses: Vec<String>,
    tags: Vec<String>,
    zone: Zone,
    pool: Option<Pool>,
    owner_data: HashMap<String, String>,
    boot_interface: Option<Interface>,
    interface_set: Vec<Interface>,
    block_devices: Vec<BlockDevice>,
    physical_block_devices: Vec<BlockDevice>,
}

impl Machine {
    pub fn system_id(&self) -> &str {
        &self.system_id
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    /// Architecture string (e.g. "amd64/generic"); empty before
    /// commissioning has discovered it.
    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// Memory in MiB.
    pub fn memory(&self) -> u64 {
        self.memory
    }

    pub fn cpu_count(&self) -> u64 {
        self.cpu_count
    }

    pub fn osystem(&self) -> &str {
        &self.osystem
    }

    pub fn distro_series(&self) -> &str {
        &self.distro_series
    }

    pub fn power_state(&self) -> &str {
        &self.power_state
    }

    pub fn status_name(&self) -> &str {
        &self.status_name
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn ip_addresses(&self) -> &[String] {
        &self.ip_addresses
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn pool(&self) -> Option<&Pool> {
        self.pool.as_ref()
    }

    /// Free-form key/value data the owner has attached to the machine.
    pub fn owner_data(&self) -> &HashMap<String, String> {
        &self.owner_data
    }

    pub fn boot_interface(&self) -> Option<&Interface> {
        self.boot_interface.as_ref()
    }

    pub fn interface_set(&self) -> &[Interface] {
        &self.interface_set
    }

    /// Looks up an interface in the interface set by id.
    pub fn interface(&self, id: u64) -> Option<&Interface> {
        self.interface_set.iter().find(|i| i.id() == id)
    }

    pub fn block_devices(&self) -> &[BlockDevice] {
        &self.block_devices
    }

    pub fn physical_block_devices(&self) -> &[BlockDevice] {
        &self.physical_block_devices
    }

    /// Looks up a block device by id, searching the full set first and the
    /// physical set second.
    pub fn block_device(&self, id: u64) -> Option<&BlockDevice> {
        self.block_devices
            .iter()
            .chain(&self.physical_block_devices)
            .find(|d| d.id() == id)
    }

    pub fn physical_block_device(&self, id: u64) -> Option<&BlockDevice> {
        self.physical_block_devices.iter().find(|d| d.id() == id)
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Machine> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Machine>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Machine>> =
    LazyLock::new(|| ReaderRegistry::new("machine", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Machine> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("system_id", FieldSpec::required(Shape::String)),
        ("hostname", FieldSpec::required(Shape::String)),
        ("fqdn", FieldSpec::required(Shape::String)),
        (
            "architecture",
            FieldSpec::required(Shape::nullable(Shape::String)),
        ),
        ("memory", FieldSpec::required(Shape::Uint)),
        ("cpu_count", FieldSpec::required(Shape::Uint)),
        ("osystem", FieldSpec::required(Shape::String)),
        ("distro_series", FieldSpec::required(Shape::String)),
        ("power_state", FieldSpec::required(Shape::String)),
        ("status_name", FieldSpec::required(Shape::String)),
        (
            "status_message",
            FieldSpec::defaulted(Shape::nullable(Shape::String), json!("")),
        ),
        (
            "ip_addresses",
            FieldSpec::defaulted(Shape::StringList, json!([])),
        ),
        ("tags", FieldSpec::defaulted(Shape::StringList, json!([]))),
        ("zone", FieldSpec::required(Shape::Map)),
        (
            "pool",
            FieldSpec::defaulted(Shape::nullable(Shape::Map), Value::Null),
        ),
        (
            "owner_data",
            FieldSpec::defaulted(Shape::StringMap, json!({})),
        ),
        (
            "boot_interface",
            FieldSpec::defaulted(Shape::nullable(Shape::Map), Value::Null),
        ),
        (
            "interface_set",
            FieldSpec::defaulted(Shape::MapList, json!([])),
        ),
        (
            "blockdevice_set",
            FieldSpec::defaulted(Shape::MapList, json!([])),
        ),
        (
            "physicalblockdevice_set",
            FieldSpec::defaulted(Shape::MapList, json!([])),
        ),
    ])
});

fn read_2_0(target: ApiVersion, value: &Value) -> MaasResult<Machine> {
    let fields = SCHEMA_2_0.coerce(value)?;
    let zone = zone::registry()
        .decode(target, fields.map("zone")?)
        .map_err(|e| e.annotate("zone"))?;
    let pool = match fields.optional_map("pool")? {
        Some(raw) => Some(
            pool::registry()
                .decode(target, raw)
                .map_err(|e| e.annotate("pool"))?,
        ),
        None => None,
    };
    let boot_interface = match fields.optional_map("boot_interface")? {
        Some(raw) => Some(
            interface::registry()
                .decode(target, raw)
                .map_err(|e| e.annotate("boot_interface"))?,
        ),
        None => None,
    };
    let interface_set = interface::registry()
        .decode_list(target, fields.field("interface_set")?)
        .map_err(|e| e.annotate("interface_set"))?;
    let block_devices = block_device::registry()
        .decode_list(target, fields.field("blockdevice_set")?)
        .map_err(|e| e.annotate("blockdevice_set"))?;
    let physical_block_devices = block_device::registry()
        .decode_list(target, fields.field("physicalblockdevice_set")?)
        .map_err(|e| e.annotate("physicalblockdevice_set"))?;

    Ok(Machine {
        system_id: fields.string("system_id")?,
        hostname: fields.string("hostname")?,
        fqdn: fields.string("fqdn")?,
        architecture: fields.string("architecture")?,
        memory: fields.u64("memory")?,
        cpu_count: fields.u64("cpu_count")?,
        osystem: fields.string("osystem")?,
        distro_series: fields.string("distro_series")?,
        power_state: fields.string("power_state")?,
        status_name: fields.string("status_name")?,
        status_message: fields.string("status_message")?,
        ip_addresses: fields.string_list("ip_addresses")?,
        tags: fields.string_list("tags")?,
        zone,
        pool,
        owner_data: fields.string_map("owner_data")?,
        boot_interface,
        interface_set,
        block_devices,
        physical_block_devices,
    })
}

//! LVM volume groups.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    model::block_device::{self, BlockDevice},
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// A volume group aggregating block devices.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeGroup {
    id: u64,
    name: String,
    uuid: String,
    size: u64,
    devices: Vec<BlockDevice>,
}

impl VolumeGroup {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn devices(&self) -> &[BlockDevice] {
        &self.devices
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<VolumeGroup> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<VolumeGroup>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<VolumeGroup>> = LazyLock::new(|| {
    ReaderRegistry::new("volume group", vec![(ApiVersion::new(2, 0), read_2_0)])
});

pub(crate) fn registry() -> &'static ReaderRegistry<VolumeGroup> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("name", FieldSpec::required(Shape::String)),
        ("uuid", FieldSpec::required(Shape::nullable(Shape::String))),
        ("size", FieldSpec::required(Shape::Uint)),
        ("devices", FieldSpec::defaulted(Shape::MapList, json!([]))),
    ])
});

fn read_2_0(target: ApiVersion, value: &Value) -> MaasResult<VolumeGroup> {
    let fields = SCHEMA_2_0.coerce(value)?;
    let devices = block_device::registry()
        .decode_list(target, fields.field("devices")?)
        .map_err(|e| e.annotate("devices"))?;
    Ok(VolumeGroup {
        id: fields.u64("id")?,
        name: fields.string("name")?,
        uuid: fields.string("uuid")?,
        size: fields.u64("size")?,
        devices,
    })
}

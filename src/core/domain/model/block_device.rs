//! Block devices and the storage tree they own (device → partitions →
//! filesystem).

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    model::filesystem::{self, FileSystem},
    model::partition::{self, Partition},
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// A physical or virtual block device attached to a machine.
///
/// `model`, `id_path` and the whole `filesystem` are null for devices that
/// do not have them (virtual devices have no model string, an unformatted
/// device has no filesystem); those decode to zero values, never errors.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDevice {
    id: u64,
    name: String,
    model: String,
    id_path: String,
    path: String,
    used_for: String,
    tags: Vec<String>,
    block_size: u64,
    used_size: u64,
    size: u64,
    filesystem: Option<FileSystem>,
    partitions: Vec<Partition>,
}

impl BlockDevice {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hardware model string, empty for virtual devices.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn id_path(&self) -> &str {
        &self.id_path
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn used_for(&self) -> &str {
        &self.used_for
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    pub fn used_size(&self) -> u64 {
        self.used_size
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn filesystem(&self) -> Option<&FileSystem> {
        self.filesystem.as_ref()
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Looks up an owned partition by id.
    pub fn partition(&self, id: u64) -> Option<&Partition> {
        self.partitions.iter().find(|p| p.id() == id)
    }

    /// Replaces this device with the latest server state after a remote
    /// operation (format, mount) changed it.
    pub fn update_from(&mut self, latest: BlockDevice) {
        *self = latest;
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<BlockDevice> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<BlockDevice>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<BlockDevice>> = LazyLock::new(|| {
    ReaderRegistry::new("blockdevice", vec![(ApiVersion::new(2, 0), read_2_0)])
});

pub(crate) fn registry() -> &'static ReaderRegistry<BlockDevice> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("name", FieldSpec::required(Shape::String)),
        ("model", FieldSpec::required(Shape::nullable(Shape::String))),
        (
            "id_path",
            FieldSpec::defaulted(Shape::nullable(Shape::String), Value::Null),
        ),
        ("path", FieldSpec::required(Shape::String)),
        ("used_for", FieldSpec::required(Shape::String)),
        ("tags", FieldSpec::defaulted(Shape::StringList, json!([]))),
        ("block_size", FieldSpec::required(Shape::Uint)),
        ("used_size", FieldSpec::required(Shape::Uint)),
        ("size", FieldSpec::required(Shape::Uint)),
        (
            "filesystem",
            FieldSpec::defaulted(Shape::nullable(Shape::Map), Value::Null),
        ),
        ("partitions", FieldSpec::defaulted(Shape::MapList, json!([]))),
    ])
});

fn read_2_0(target: ApiVersion, value: &Value) -> MaasResult<BlockDevice> {
    let fields = SCHEMA_2_0.coerce(value)?;
    let fs = match fields.optional_map("filesystem")? {
        Some(raw) => Some(
            filesystem::registry()
                .decode(target, raw)
                .map_err(|e| e.annotate("filesystem"))?,
        ),
        None => None,
    };
    let partitions = partition::registry()
        .decode_list(target, fields.field("partitions")?)
        .map_err(|e| e.annotate("partitions"))?;
    Ok(BlockDevice {
        id: fields.u64("id")?,
        name: fields.string("name")?,
        model: fields.string("model")?,
        id_path: fields.string("id_path")?,
        path: fields.string("path")?,
        used_for: fields.string("used_for")?,
        tags: fields.string_list("tags")?,
        block_size: fields.u64("block_size")?,
        used_size: fields.u64("used_size")?,
        size: fields.u64("size")?,
        filesystem: fs,
        partitions,
    })
}

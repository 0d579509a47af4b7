//! Filesystems: the terminal leaf of the storage tree.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::Value;
use std::sync::LazyLock;

/// A filesystem living on a block device or partition.
///
/// An unmounted or unlabelled filesystem reports empty strings; the server
/// sends JSON null for those fields and the decoder maps null to the zero
/// value rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSystem {
    fstype: String,
    mount_point: String,
    label: String,
    uuid: String,
}

impl FileSystem {
    pub fn fstype(&self) -> &str {
        &self.fstype
    }

    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<FileSystem> {
        registry().decode(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<FileSystem>> =
    LazyLock::new(|| ReaderRegistry::new("filesystem", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<FileSystem> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("fstype", FieldSpec::required(Shape::String)),
        ("mount_point", FieldSpec::required(Shape::nullable(Shape::String))),
        ("label", FieldSpec::required(Shape::nullable(Shape::String))),
        ("uuid", FieldSpec::required(Shape::nullable(Shape::String))),
    ])
});

fn read_2_0(_target: ApiVersion, value: &Value) -> MaasResult<FileSystem> {
    let fields = SCHEMA_2_0.coerce(value)?;
    Ok(FileSystem {
        fstype: fields.string("fstype")?,
        mount_point: fields.string("mount_point")?,
        label: fields.string("label")?,
        uuid: fields.string("uuid")?,
    })
}

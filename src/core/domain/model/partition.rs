//! Partitions on a block device.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    model::filesystem::{self, FileSystem},
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// A partition, optionally carrying a filesystem.
///
/// Partitions are the one place the model is not strictly write-once: after
/// a server-side operation changes partition state (format, mount), the
/// transport layer decodes the response and calls [`Partition::update_from`]
/// to swap in the fresh value wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    id: u64,
    path: String,
    uuid: String,
    used_for: String,
    size: u64,
    tags: Vec<String>,
    filesystem: Option<FileSystem>,
}

impl Partition {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Partition UUID; empty until the server assigns one.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn used_for(&self) -> &str {
        &self.used_for
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn filesystem(&self) -> Option<&FileSystem> {
        self.filesystem.as_ref()
    }

    /// Replaces this partition with the latest server state. Whole-value
    /// replacement keeps the entity immutable in every other respect.
    pub fn update_from(&mut self, latest: Partition) {
        *self = latest;
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Partition> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Partition>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Partition>> =
    LazyLock::new(|| ReaderRegistry::new("partition", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Partition> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("path", FieldSpec::required(Shape::String)),
        ("uuid", FieldSpec::required(Shape::nullable(Shape::String))),
        ("used_for", FieldSpec::required(Shape::String)),
        ("size", FieldSpec::required(Shape::Uint)),
        ("tags", FieldSpec::defaulted(Shape::StringList, json!([]))),
        (
            "filesystem",
            FieldSpec::defaulted(Shape::nullable(Shape::Map), Value::Null),
        ),
    ])
});

fn read_2_0(target: ApiVersion, value: &Value) -> MaasResult<Partition> {
    let fields = SCHEMA_2_0.coerce(value)?;
    let fs = match fields.optional_map("filesystem")? {
        Some(raw) => Some(
            filesystem::registry()
                .decode(target, raw)
                .map_err(|e| e.annotate("filesystem"))?,
        ),
        None => None,
    };
    Ok(Partition {
        id: fields.u64("id")?,
        path: fields.string("path")?,
        uuid: fields.string("uuid")?,
        used_for: fields.string("used_for")?,
        size: fields.u64("size")?,
        tags: fields.string_list("tags")?,
        filesystem: fs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Value {
        json!({
            "id": 1,
            "path": "/dev/disk/by-dname/sda-part1",
            "uuid": "6199b7c9-b66f-40f6-a238-a938a58a0adf",
            "used_for": "ext4 formatted filesystem mounted at /",
            "size": 8581545984_u64,
            "filesystem": {
                "fstype": "ext4", "mount_point": "/",
                "label": "root", "uuid": "fcd7745e-f1b5-4f5d-9575-9b0bb796b752",
            },
        })
    }

    #[test]
    fn reads_a_partition_with_filesystem() {
        let part = Partition::read(ApiVersion::new(2, 0), &fixture()).unwrap();
        assert_eq!(part.id(), 1);
        assert_eq!(part.path(), "/dev/disk/by-dname/sda-part1");
        assert_eq!(part.size(), 8581545984);
        assert!(part.tags().is_empty());
        assert_eq!(part.filesystem().unwrap().fstype(), "ext4");
    }

    #[test]
    fn null_uuid_and_filesystem_read_as_zero_values() {
        let mut payload = fixture();
        payload["uuid"] = Value::Null;
        payload["filesystem"] = Value::Null;
        let part = Partition::read(ApiVersion::new(2, 0), &payload).unwrap();
        assert_eq!(part.uuid(), "");
        assert!(part.filesystem().is_none());
    }

    #[test]
    fn update_from_replaces_the_whole_value() {
        let mut part = {
            let mut payload = fixture();
            payload["filesystem"] = Value::Null;
            payload["used_for"] = json!("Unused");
            Partition::read(ApiVersion::new(2, 0), &payload).unwrap()
        };
        assert!(part.filesystem().is_none());

        let formatted = Partition::read(ApiVersion::new(2, 0), &fixture()).unwrap();
        part.update_from(formatted.clone());
        assert_eq!(part, formatted);
        assert_eq!(part.filesystem().unwrap().mount_point(), "/");
    }
}

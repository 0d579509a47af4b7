//! Physical zones: the terminal grouping entity referenced by machines and
//! devices.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::Value;
use std::sync::LazyLock;

/// A physical zone as reported by the region controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    name: String,
    description: String,
}

impl Zone {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Decodes a single zone at the given controller version.
    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Zone> {
        registry().decode(version, value)
    }

    /// Decodes a JSON array of zones.
    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Zone>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Zone>> =
    LazyLock::new(|| ReaderRegistry::new("zone", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Zone> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("name", FieldSpec::required(Shape::String)),
        ("description", FieldSpec::required(Shape::String)),
    ])
});

fn read_2_0(_target: ApiVersion, value: &Value) -> MaasResult<Zone> {
    let fields = SCHEMA_2_0.coerce(value)?;
    Ok(Zone {
        name: fields.string("name")?,
        description: fields.string("description")?,
    })
}

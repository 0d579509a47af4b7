//! Network spaces.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    model::vlan::{self, Vlan},
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// A logical grouping of VLANs with a common security policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    id: u64,
    name: String,
    class_type: String,
    vlans: Vec<Vlan>,
}

impl Space {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_type(&self) -> &str {
        &self.class_type
    }

    pub fn vlans(&self) -> &[Vlan] {
        &self.vlans
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Space> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Space>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Space>> =
    LazyLock::new(|| ReaderRegistry::new("space", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Space> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("name", FieldSpec::required(Shape::String)),
        (
            "class_type",
            FieldSpec::defaulted(Shape::nullable(Shape::String), Value::Null),
        ),
        ("vlans", FieldSpec::defaulted(Shape::MapList, json!([]))),
    ])
});

fn read_2_0(target: ApiVersion, value: &Value) -> MaasResult<Space> {
    let fields = SCHEMA_2_0.coerce(value)?;
    let vlans = vlan::registry()
        .decode_list(target, fields.field("vlans")?)
        .map_err(|e| e.annotate("vlans"))?;
    Ok(Space {
        id: fields.u64("id")?,
        name: fields.string("name")?,
        class_type: fields.string("class_type")?,
        vlans,
    })
}

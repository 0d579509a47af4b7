//! DNS domains managed by the region controller.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    id: u64,
    name: String,
    authoritative: bool,
    ttl: u64,
    resource_record_count: u64,
}

impl Domain {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn authoritative(&self) -> bool {
        self.authoritative
    }

    /// Default record TTL; zero when the domain inherits the global value.
    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    pub fn resource_record_count(&self) -> u64 {
        self.resource_record_count
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Domain> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Domain>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Domain>> =
    LazyLock::new(|| ReaderRegistry::new("domain", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Domain> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("name", FieldSpec::required(Shape::String)),
        ("authoritative", FieldSpec::required(Shape::Bool)),
        (
            "ttl",
            FieldSpec::defaulted(Shape::nullable(Shape::Uint), Value::Null),
        ),
        (
            "resource_record_count",
            FieldSpec::defaulted(Shape::Uint, json!(0)),
        ),
    ])
});

fn read_2_0(_target: ApiVersion, value: &Value) -> MaasResult<Domain> {
    let fields = SCHEMA_2_0.coerce(value)?;
    Ok(Domain {
        id: fields.u64("id")?,
        name: fields.string("name")?,
        authoritative: fields.bool("authoritative")?,
        ttl: fields.u64("ttl")?,
        resource_record_count: fields.u64("resource_record_count")?,
    })
}

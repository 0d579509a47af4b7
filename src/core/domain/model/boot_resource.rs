//! Boot resources (images the controller can deploy).

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq)]
pub struct BootResource {
    id: u64,
    resource_type: String,
    name: String,
    architecture: String,
    subarches: String,
}

impl BootResource {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Resource origin ("Synced", "Uploaded", "Generated").
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// Comma-separated subarchitecture list, empty when not reported.
    pub fn subarches(&self) -> &str {
        &self.subarches
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<BootResource> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<BootResource>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<BootResource>> = LazyLock::new(|| {
    ReaderRegistry::new("boot resource", vec![(ApiVersion::new(2, 0), read_2_0)])
});

pub(crate) fn registry() -> &'static ReaderRegistry<BootResource> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("type", FieldSpec::required(Shape::String)),
        ("name", FieldSpec::required(Shape::String)),
        ("architecture", FieldSpec::required(Shape::String)),
        (
            "subarches",
            FieldSpec::defaulted(Shape::nullable(Shape::String), json!("")),
        ),
    ])
});

fn read_2_0(_target: ApiVersion, value: &Value) -> MaasResult<BootResource> {
    let fields = SCHEMA_2_0.coerce(value)?;
    Ok(BootResource {
        id: fields.u64("id")?,
        resource_type: fields.string("type")?,
        name: fields.string("name")?,
        architecture: fields.string("architecture")?,
        subarches: fields.string("subarches")?,
    })
}

//! Resource pools.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::Value;
use std::sync::LazyLock;

/// A resource pool a machine can be allocated from.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    name: String,
    description: String,
}

impl Pool {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Pool> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Pool>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Pool>> =
    LazyLock::new(|| ReaderRegistry::new("pool", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Pool> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("name", FieldSpec::required(Shape::String)),
        ("description", FieldSpec::required(Shape::nullable(Shape::String))),
    ])
});

fn read_2_0(_target: ApiVersion, value: &Value) -> MaasResult<Pool> {
    let fields = SCHEMA_2_0.coerce(value)?;
    Ok(Pool {
        name: fields.string("name")?,
        description: fields.string("description")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_a_pool() {
        let pool = Pool::read(
            ApiVersion::new(2, 0),
            &json!({"name": "default", "description": "machines not in a pool"}),
        )
        .unwrap();
        assert_eq!(pool.name(), "default");
        assert_eq!(pool.description(), "machines not in a pool");
    }

    #[test]
    fn null_description_reads_as_empty() {
        let pool = Pool::read(
            ApiVersion::new(2, 0),
            &json!({"name": "default", "description": null}),
        )
        .unwrap();
        assert_eq!(pool.description(), "");
    }
}

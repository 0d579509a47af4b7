//! Node tags.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// A tag that can be applied to machines.
///
/// Older API revisions and sparse records omit `comment`, `definition` and
/// `kernel_opts`; they default to the empty string. Listing the machines
/// that carry a tag is a client operation
/// ([`crate::MaasClient::machines_with_tag`]), keeping this record a plain
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    name: String,
    comment: String,
    definition: String,
    kernel_opts: String,
}

impl Tag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// The XPath expression MAAS uses to auto-apply the tag, if any.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Kernel options applied to machines booted with this tag.
    pub fn kernel_opts(&self) -> &str {
        &self.kernel_opts
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Tag> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Tag>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Tag>> =
    LazyLock::new(|| ReaderRegistry::new("tag", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Tag> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("name", FieldSpec::required(Shape::String)),
        (
            "comment",
            FieldSpec::defaulted(Shape::nullable(Shape::String), json!("")),
        ),
        (
            "definition",
            FieldSpec::defaulted(Shape::nullable(Shape::String), json!("")),
        ),
        (
            "kernel_opts",
            FieldSpec::defaulted(Shape::nullable(Shape::String), json!("")),
        ),
    ])
});

fn read_2_0(_target: ApiVersion, value: &Value) -> MaasResult<Tag> {
    let fields = SCHEMA_2_0.coerce(value)?;
    Ok(Tag {
        name: fields.string("name")?,
        comment: fields.string("comment")?,
        definition: fields.string("definition")?,
        kernel_opts: fields.string("kernel_opts")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_full_tag() {
        let tag = Tag::read(
            ApiVersion::new(2, 0),
            &json!({
                "name": "virtual",
                "comment": "virtual machines",
                "definition": "//node[@purpose='testing']",
                "kernel_opts": "console=ttyS0",
            }),
        )
        .unwrap();
        assert_eq!(tag.name(), "virtual");
        assert_eq!(tag.comment(), "virtual machines");
        assert_eq!(tag.definition(), "//node[@purpose='testing']");
        assert_eq!(tag.kernel_opts(), "console=ttyS0");
    }

    #[test]
    fn sparse_tag_defaults_to_empty_strings() {
        let tag = Tag::read(ApiVersion::new(2, 0), &json!({"name": "bare"})).unwrap();
        assert_eq!(tag.comment(), "");
        assert_eq!(tag.definition(), "");
        assert_eq!(tag.kernel_opts(), "");
    }

    #[test]
    fn missing_name_fails() {
        let err = Tag::read(ApiVersion::new(2, 0), &json!({"comment": "c"})).unwrap_err();
        assert!(err.is_deserialization());
    }
}

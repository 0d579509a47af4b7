//! VLANs, the leaf of the network tree (machine → interface → link →
//! subnet → VLAN).

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::Value;
use std::sync::LazyLock;

/// A VLAN on a fabric.
#[derive(Debug, Clone, PartialEq)]
pub struct Vlan {
    id: u64,
    name: String,
    fabric: String,
    vid: u64,
    mtu: u64,
    dhcp_on: bool,
    primary_rack: String,
    secondary_rack: String,
}

impl Vlan {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The VLAN name; the untagged VLAN reports an empty name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the fabric this VLAN belongs to.
    pub fn fabric(&self) -> &str {
        &self.fabric
    }

    /// The 802.1Q VLAN ID.
    pub fn vid(&self) -> u64 {
        self.vid
    }

    pub fn mtu(&self) -> u64 {
        self.mtu
    }

    pub fn dhcp_on(&self) -> bool {
        self.dhcp_on
    }

    /// System ID of the rack controller providing DHCP, if any.
    pub fn primary_rack(&self) -> &str {
        &self.primary_rack
    }

    pub fn secondary_rack(&self) -> &str {
        &self.secondary_rack
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Vlan> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Vlan>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Vlan>> =
    LazyLock::new(|| ReaderRegistry::new("vlan", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Vlan> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("name", FieldSpec::required(Shape::nullable(Shape::String))),
        ("fabric", FieldSpec::required(Shape::String)),
        ("vid", FieldSpec::required(Shape::Uint)),
        ("mtu", FieldSpec::required(Shape::Uint)),
        ("dhcp_on", FieldSpec::required(Shape::Bool)),
        (
            "primary_rack",
            FieldSpec::defaulted(Shape::nullable(Shape::String), Value::Null),
        ),
        (
            "secondary_rack",
            FieldSpec::defaulted(Shape::nullable(Shape::String), Value::Null),
        ),
    ])
});

fn read_2_0(_target: ApiVersion, value: &Value) -> MaasResult<Vlan> {
    let fields = SCHEMA_2_0.coerce(value)?;
    Ok(Vlan {
        id: fields.u64("id")?,
        name: fields.string("name")?,
        fabric: fields.string("fabric")?,
        vid: fields.u64("vid")?,
        mtu: fields.u64("mtu")?,
        dhcp_on: fields.bool("dhcp_on")?,
        primary_rack: fields.string("primary_rack")?,
        secondary_rack: fields.string("secondary_rack")?,
    })
}

//! Network interfaces.
//!
//! Interface parent/child relationships are plain name lists, never live
//! references: interfaces on a machine can form graphs (bonds, bridges,
//! VLANs on top of physicals) and live pointers between siblings would make
//! the ownership tree cyclic. Resolving a name back to an interface is the
//! caller's job.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    model::link::{self, Link},
    model::vlan::{self, Vlan},
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// A network interface on a machine or device.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    id: u64,
    name: String,
    interface_type: String,
    enabled: bool,
    mac_address: String,
    effective_mtu: u64,
    tags: Vec<String>,
    vlan: Vlan,
    links: Vec<Link>,
    parents: Vec<String>,
    children: Vec<String>,
}

impl Interface {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Interface type (e.g. "physical", "bond", "vlan").
    pub fn interface_type(&self) -> &str {
        &self.interface_type
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Hardware address; empty for interface types without one.
    pub fn mac_address(&self) -> &str {
        &self.mac_address
    }

    pub fn effective_mtu(&self) -> u64 {
        self.effective_mtu
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn vlan(&self) -> &Vlan {
        &self.vlan
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Names of the interfaces this one is built on.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// Names of the interfaces built on this one.
    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Interface> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Interface>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Interface>> =
    LazyLock::new(|| ReaderRegistry::new("interface", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Interface> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("name", FieldSpec::required(Shape::String)),
        ("type", FieldSpec::required(Shape::String)),
        ("enabled", FieldSpec::required(Shape::Bool)),
        (
            "mac_address",
            FieldSpec::required(Shape::nullable(Shape::String)),
        ),
        ("effective_mtu", FieldSpec::required(Shape::Uint)),
        ("tags", FieldSpec::defaulted(Shape::StringList, json!([]))),
        ("vlan", FieldSpec::required(Shape::Map)),
        ("links", FieldSpec::required(Shape::MapList)),
        ("parents", FieldSpec::required(Shape::StringList)),
        ("children", FieldSpec::required(Shape::StringList)),
    ])
});

fn read_2_0(target: ApiVersion, value: &Value) -> MaasResult<Interface> {
    let fields = SCHEMA_2_0.coerce(value)?;
    let vlan = vlan::registry()
        .decode(target, fields.map("vlan")?)
        .map_err(|e| e.annotate("vlan"))?;
    let links = link::registry()
        .decode_list(target, fields.field("links")?)
        .map_err(|e| e.annotate("links"))?;
    Ok(Interface {
        id: fields.u64("id")?,
        name: fields.string("name")?,
        interface_type: fields.string("type")?,
        enabled: fields.bool("enabled")?,
        mac_address: fields.string("mac_address")?,
        effective_mtu: fields.u64("effective_mtu")?,
        tags: fields.string_list("tags")?,
        vlan,
        links,
        parents: fields.string_list("parents")?,
        children: fields.string_list("children")?,
    })
}

//! Subnets.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    model::vlan::{self, Vlan},
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::Value;
use std::sync::LazyLock;

/// An IP subnet, owning the VLAN it sits on.
#[derive(Debug, Clone, PartialEq)]
pub struct Subnet {
    id: u64,
    name: String,
    space: String,
    cidr: String,
    gateway_ip: String,
    dns_servers: Vec<String>,
    vlan: Vlan,
}

impl Subnet {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the space this subnet is in.
    pub fn space(&self) -> &str {
        &self.space
    }

    pub fn cidr(&self) -> &str {
        &self.cidr
    }

    /// Gateway address, empty when the subnet has none.
    pub fn gateway_ip(&self) -> &str {
        &self.gateway_ip
    }

    pub fn dns_servers(&self) -> &[String] {
        &self.dns_servers
    }

    pub fn vlan(&self) -> &Vlan {
        &self.vlan
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Subnet> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Subnet>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Subnet>> =
    LazyLock::new(|| ReaderRegistry::new("subnet", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Subnet> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("name", FieldSpec::required(Shape::String)),
        ("space", FieldSpec::required(Shape::String)),
        ("cidr", FieldSpec::required(Shape::String)),
        ("gateway_ip", FieldSpec::required(Shape::nullable(Shape::String))),
        ("dns_servers", FieldSpec::required(Shape::StringList)),
        ("vlan", FieldSpec::required(Shape::Map)),
    ])
});

fn read_2_0(target: ApiVersion, value: &Value) -> MaasResult<Subnet> {
    let fields = SCHEMA_2_0.coerce(value)?;
    let vlan = vlan::registry()
        .decode(target, fields.map("vlan")?)
        .map_err(|e| e.annotate("vlan"))?;
    Ok(Subnet {
        id: fields.u64("id")?,
        name: fields.string("name")?,
        space: fields.string("space")?,
        cidr: fields.string("cidr")?,
        gateway_ip: fields.string("gateway_ip")?,
        dns_servers: fields.string_list("dns_servers")?,
        vlan,
    })
}

//! Links: an interface's attachment to a subnet.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    model::subnet::{self, Subnet},
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// One link on an interface.
///
/// The server returns partially-populated links: a link that has no address
/// yet omits `ip_address`, and some link shapes carry no `subnet` at all.
/// Both decode cleanly to their zero values instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    id: u64,
    mode: String,
    ip_address: String,
    subnet: Option<Subnet>,
}

impl Link {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Connection mode (e.g. "auto", "static", "dhcp", "link_up").
    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    pub fn subnet(&self) -> Option<&Subnet> {
        self.subnet.as_ref()
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<Link> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<Link>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<Link>> =
    LazyLock::new(|| ReaderRegistry::new("link", vec![(ApiVersion::new(2, 0), read_2_0)]));

pub(crate) fn registry() -> &'static ReaderRegistry<Link> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("mode", FieldSpec::required(Shape::String)),
        (
            "ip_address",
            FieldSpec::defaulted(Shape::nullable(Shape::String), json!("")),
        ),
        (
            "subnet",
            FieldSpec::defaulted(Shape::nullable(Shape::Map), Value::Null),
        ),
    ])
});

fn read_2_0(target: ApiVersion, value: &Value) -> MaasResult<Link> {
    let fields = SCHEMA_2_0.coerce(value)?;
    let subnet = match fields.optional_map("subnet")? {
        Some(raw) => Some(
            subnet::registry()
                .decode(target, raw)
                .map_err(|e| e.annotate("subnet"))?,
        ),
        None => None,
    };
    Ok(Link {
        id: fields.u64("id")?,
        mode: fields.string("mode")?,
        ip_address: fields.string("ip_address")?,
        subnet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subnet_fixture() -> Value {
        json!({
            "id": 1, "name": "pxe", "space": "space-0", "cidr": "10.0.0.0/24",
            "gateway_ip": "10.0.0.1", "dns_servers": [],
            "vlan": {
                "id": 5001, "name": null, "fabric": "fabric-0",
                "vid": 0, "mtu": 1500, "dhcp_on": true,
            },
        })
    }

    #[test]
    fn reads_a_full_link() {
        let link = Link::read(
            ApiVersion::new(2, 0),
            &json!({
                "id": 69, "mode": "auto",
                "ip_address": "10.0.0.5",
                "subnet": subnet_fixture(),
            }),
        )
        .unwrap();
        assert_eq!(link.id(), 69);
        assert_eq!(link.mode(), "auto");
        assert_eq!(link.ip_address(), "10.0.0.5");
        assert_eq!(link.subnet().unwrap().cidr(), "10.0.0.0/24");
    }

    #[test]
    fn missing_ip_address_reads_as_empty() {
        let link = Link::read(
            ApiVersion::new(2, 0),
            &json!({"id": 1, "mode": "link_up", "subnet": subnet_fixture()}),
        )
        .unwrap();
        assert_eq!(link.ip_address(), "");
    }

    #[test]
    fn omitted_subnet_reads_as_none() {
        let link = Link::read(
            ApiVersion::new(2, 0),
            &json!({"id": 1, "mode": "link_up"}),
        )
        .unwrap();
        assert!(link.subnet().is_none());
    }

    #[test]
    fn malformed_subnet_is_still_an_error() {
        let err = Link::read(
            ApiVersion::new(2, 0),
            &json!({"id": 1, "mode": "auto", "subnet": {"cidr": 42}}),
        )
        .unwrap_err();
        assert!(err.is_deserialization());
        assert!(err.to_string().contains("subnet"));
    }
}

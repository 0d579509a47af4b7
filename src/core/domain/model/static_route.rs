//! Static routes between subnets.

use crate::core::domain::{
    decode::ReaderRegistry,
    error::MaasResult,
    model::subnet::{self, Subnet},
    schema::{FieldSpec, SchemaSpec, Shape},
    value_object::ApiVersion,
};
use serde_json::Value;
use std::sync::LazyLock;

/// A route from one subnet to another via a gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticRoute {
    id: u64,
    source: Subnet,
    destination: Subnet,
    gateway_ip: String,
    metric: u64,
}

impl StaticRoute {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn source(&self) -> &Subnet {
        &self.source
    }

    pub fn destination(&self) -> &Subnet {
        &self.destination
    }

    pub fn gateway_ip(&self) -> &str {
        &self.gateway_ip
    }

    pub fn metric(&self) -> u64 {
        self.metric
    }

    pub fn read(version: ApiVersion, value: &Value) -> MaasResult<StaticRoute> {
        registry().decode(version, value)
    }

    pub fn read_list(version: ApiVersion, value: &Value) -> MaasResult<Vec<StaticRoute>> {
        registry().decode_list(version, value)
    }
}

static READERS: LazyLock<ReaderRegistry<StaticRoute>> = LazyLock::new(|| {
    ReaderRegistry::new("static route", vec![(ApiVersion::new(2, 0), read_2_0)])
});

pub(crate) fn registry() -> &'static ReaderRegistry<StaticRoute> {
    &READERS
}

static SCHEMA_2_0: LazyLock<SchemaSpec> = LazyLock::new(|| {
    SchemaSpec::new(vec![
        ("id", FieldSpec::required(Shape::Uint)),
        ("source", FieldSpec::required(Shape::Map)),
        ("destination", FieldSpec::required(Shape::Map)),
        ("gateway_ip", FieldSpec::required(Shape::String)),
        ("metric", FieldSpec::required(Shape::Uint)),
    ])
});

fn read_2_0(target: ApiVersion, value: &Value) -> MaasResult<StaticRoute> {
    let fields = SCHEMA_2_0.coerce(value)?;
    let source = subnet::registry()
        .decode(target, fields.map("source")?)
        .map_err(|e| e.annotate("source"))?;
    let destination = subnet::registry()
        .decode(target, fields.map("destination")?)
        .map_err(|e| e.annotate("destination"))?;
    Ok(StaticRoute {
        id: fields.u64("id")?,
        source,
        destination,
        gateway_ip: fields.string("gateway_ip")?,
        metric: fields.u64("metric")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn subnet_fixture(id: u64, cidr: &str) -> Value {
        json!({
            "id": id, "name": cidr, "space": "space-0", "cidr": cidr,
            "gateway_ip": null, "dns_servers": [],
            "vlan": {"id": 5001, "name": null, "fabric": "fabric-0",
                     "vid": 0, "mtu": 1500, "dhcp_on": false},
        })
    }

    #[test]
    fn reads_a_static_route() {
        let route = StaticRoute::read(
            ApiVersion::new(2, 0),
            &json!({
                "id": 2,
                "source": subnet_fixture(1, "10.0.0.0/24"),
                "destination": subnet_fixture(2, "10.0.1.0/24"),
                "gateway_ip": "10.0.0.1",
                "metric": 100,
            }),
        )
        .unwrap();
        assert_eq!(route.id(), 2);
        assert_eq!(route.source().cidr(), "10.0.0.0/24");
        assert_eq!(route.destination().cidr(), "10.0.1.0/24");
        assert_eq!(route.gateway_ip(), "10.0.0.1");
        assert_eq!(route.metric(), 100);
    }

    #[test]
    fn bad_destination_names_the_field() {
        let err = StaticRoute::read(
            ApiVersion::new(2, 0),
            &json!({
                "id": 2,
                "source": subnet_fixture(1, "10.0.0.0/24"),
                "destination": {"id": 2},
                "gateway_ip": "10.0.0.1",
                "metric": 0,
            }),
        )
        .unwrap_err();
        assert!(err.is_deserialization());
        assert!(err.to_string().contains("destination"));
    }
}

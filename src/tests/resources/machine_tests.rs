use crate::tests::connected_client;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn machine_body(system_id: &str, hostname: &str) -> serde_json::Value {
    json!({
        "system_id": system_id,
        "hostname": hostname,
        "fqdn": format!("{}.maas", hostname),
        "architecture": "amd64/generic",
        "memory": 2048,
        "cpu_count": 2,
        "osystem": "ubuntu",
        "distro_series": "xenial",
        "power_state": "on",
        "status_name": "Deployed",
        "zone": {"name": "default", "description": ""},
        "interface_set": [
            {"id": 40, "name": "eth0", "type": "physical", "enabled": true,
             "mac_address": "52:54:00:c9:6b:6e", "effective_mtu": 1500,
             "vlan": {"id": 5001, "name": "untagged", "fabric": "fabric-0",
                      "vid": 0, "mtu": 1500, "dhcp_on": true},
             "links": [{"id": 69, "mode": "auto", "ip_address": "192.168.100.4",
                        "subnet": {"id": 1, "name": "pxe", "space": "space-0",
                                   "cidr": "192.168.100.0/24", "gateway_ip": null,
                                   "dns_servers": [],
                                   "vlan": {"id": 5001, "name": null,
                                            "fabric": "fabric-0", "vid": 0,
                                            "mtu": 1500, "dhcp_on": true}}}],
             "parents": [], "children": []},
        ],
    })
}

#[tokio::test]
async fn machines_decode_with_the_negotiated_version() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/machines/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            machine_body("4y3ha3", "untasted-markita"),
            machine_body("4y3ha4", "lowlier-glady"),
        ])))
        .mount(&server)
        .await;

    let machines = client.machines().await.unwrap();
    assert_eq!(machines.len(), 2);
    assert_eq!(machines[0].hostname(), "untasted-markita");
    assert_eq!(machines[1].system_id(), "4y3ha4");
    // The 2.1.9 controller is served by the 2.0 readers; the nested chain
    // (interface, link, subnet, vlan) decodes under the same target.
    let link = &machines[0].interface_set()[0].links()[0];
    assert_eq!(link.subnet().unwrap().cidr(), "192.168.100.0/24");
}

#[tokio::test]
async fn single_machine_fetch_decodes() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/machines/4y3ha3/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(machine_body("4y3ha3", "untasted-markita")),
        )
        .mount(&server)
        .await;

    let machine = client.machine("4y3ha3").await.unwrap();
    assert_eq!(machine.fqdn(), "untasted-markita.maas");
}

#[tokio::test]
async fn machines_with_tag_uses_the_op_parameter() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/tags/virtual/"))
        .and(query_param("op", "machines"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([machine_body("4y3ha3", "untasted-markita")])),
        )
        .mount(&server)
        .await;

    let machines = client.machines_with_tag("virtual").await.unwrap();
    assert_eq!(machines.len(), 1);
}

#[tokio::test]
async fn devices_decode() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/devices/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "system_id": "4y3haf",
            "hostname": "furnacelike-brittney",
            "fqdn": "furnacelike-brittney.maas",
            "ip_addresses": [],
            "zone": {"name": "default", "description": ""},
            "parent": "4y3ha3",
        }])))
        .mount(&server)
        .await;

    let devices = client.devices().await.unwrap();
    assert_eq!(devices[0].parent(), "4y3ha3");
}

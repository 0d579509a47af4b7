use crate::tests::connected_client;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fabrics_decode_with_their_vlans() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/fabrics/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 0,
            "name": "fabric-0",
            "class_type": null,
            "vlans": [{"id": 5001, "name": "untagged", "fabric": "fabric-0",
                       "vid": 0, "mtu": 1500, "dhcp_on": true,
                       "primary_rack": "4y3h7n"}],
        }])))
        .mount(&server)
        .await;

    let fabrics = client.fabrics().await.unwrap();
    assert_eq!(fabrics[0].name(), "fabric-0");
    assert_eq!(fabrics[0].vlans()[0].primary_rack(), "4y3h7n");
}

#[tokio::test]
async fn subnets_decode() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/subnets/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "192.168.100.0/24",
            "space": "space-0",
            "cidr": "192.168.100.0/24",
            "gateway_ip": "192.168.100.1",
            "dns_servers": ["8.8.8.8", "8.8.4.4"],
            "vlan": {"id": 5001, "name": null, "fabric": "fabric-0",
                     "vid": 0, "mtu": 1500, "dhcp_on": true},
        }])))
        .mount(&server)
        .await;

    let subnets = client.subnets().await.unwrap();
    assert_eq!(subnets[0].dns_servers().len(), 2);
    assert_eq!(subnets[0].vlan().fabric(), "fabric-0");
}

#[tokio::test]
async fn static_routes_decode() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    let subnet = |id: u64, cidr: &str| {
        json!({
            "id": id, "name": cidr, "space": "space-0", "cidr": cidr,
            "gateway_ip": null, "dns_servers": [],
            "vlan": {"id": 5001, "name": null, "fabric": "fabric-0",
                     "vid": 0, "mtu": 1500, "dhcp_on": false},
        })
    };
    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/static-routes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 2,
            "source": subnet(1, "10.0.0.0/24"),
            "destination": subnet(2, "10.0.1.0/24"),
            "gateway_ip": "10.0.0.1",
            "metric": 0,
        }])))
        .mount(&server)
        .await;

    let routes = client.static_routes().await.unwrap();
    assert_eq!(routes[0].destination().cidr(), "10.0.1.0/24");
}

#[tokio::test]
async fn empty_listings_decode_to_empty_collections() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    for endpoint in ["spaces/", "zones/", "domains/"] {
        Mock::given(method("GET"))
            .and(path(format!("/MAAS/api/2.0/{}", endpoint)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
    }

    assert!(client.spaces().await.unwrap().is_empty());
    assert!(client.zones().await.unwrap().is_empty());
    assert!(client.domains().await.unwrap().is_empty());
}

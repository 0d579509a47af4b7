use crate::tests::connected_client;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn block_device_body() -> serde_json::Value {
    json!({
        "id": 34,
        "name": "sda",
        "model": null,
        "id_path": null,
        "path": "/dev/disk/by-dname/sda",
        "used_for": "MBR partitioned with 1 partition",
        "tags": ["rotary"],
        "block_size": 4096,
        "used_size": 8586788864_u64,
        "size": 8589934592_u64,
        "filesystem": null,
        "partitions": [{
            "id": 1,
            "path": "/dev/disk/by-dname/sda-part1",
            "uuid": null,
            "used_for": "ext4 formatted filesystem mounted at /",
            "size": 8581545984_u64,
            "filesystem": {"fstype": "ext4", "mount_point": "/",
                           "label": null, "uuid": null},
        }],
    })
}

#[tokio::test]
async fn block_devices_decode_with_null_tolerant_fields() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/nodes/4y3ha3/blockdevices/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([block_device_body()])))
        .mount(&server)
        .await;

    let devices = client.block_devices("4y3ha3").await.unwrap();
    let device = &devices[0];
    assert_eq!(device.model(), "");
    assert_eq!(device.id_path(), "");
    assert_eq!(device.partitions()[0].uuid(), "");
    assert_eq!(device.partitions()[0].filesystem().unwrap().fstype(), "ext4");
}

#[tokio::test]
async fn volume_groups_decode() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/nodes/4y3ha3/volume-groups/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "vg0",
            "uuid": "2c2aa9e8-d545-4bcc-acfc-14248a5fb5a3",
            "size": 21470642176_u64,
            "devices": [block_device_body()],
        }])))
        .mount(&server)
        .await;

    let groups = client.volume_groups("4y3ha3").await.unwrap();
    assert_eq!(groups[0].name(), "vg0");
    assert_eq!(groups[0].devices()[0].name(), "sda");
}

#[tokio::test]
async fn malformed_storage_payload_reports_the_element_index() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/nodes/4y3ha3/blockdevices/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([block_device_body(), {"id": 35, "name": "sdb"}])),
        )
        .mount(&server)
        .await;

    let err = client.block_devices("4y3ha3").await.unwrap_err();
    assert!(err.is_deserialization());
    assert!(err.to_string().contains("blockdevice at index 1"));
}

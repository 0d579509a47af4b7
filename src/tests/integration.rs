use crate::tests::connected_client;
use crate::{ApiVersion, MaasClient, MaasError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn builder_negotiates_and_exposes_the_controller_version() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    assert_eq!(client.api_version(), ApiVersion::with_patch(2, 1, 9));
    assert_eq!(client.capabilities(), ["networks-management"]);
}

#[tokio::test]
async fn builder_rejects_missing_base_url() {
    let result = MaasClient::builder()
        .api_key("a:b:c")
        .unwrap()
        .build()
        .await;
    assert!(matches!(result, Err(MaasError::Validation(_))));
}

#[tokio::test]
async fn builder_rejects_malformed_api_key() {
    let server = MockServer::start().await;
    let result = MaasClient::builder()
        .base_url(format!("{}/MAAS/", server.uri()))
        .unwrap()
        .api_key("not-a-triple")
        .unwrap()
        .build()
        .await;
    assert!(matches!(result, Err(MaasError::Validation(_))));
}

#[tokio::test]
async fn decode_errors_surface_through_client_operations() {
    let server = MockServer::start().await;
    let client = connected_client(&server).await;

    // A zone without its required description.
    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/zones/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{"name": "default"}])),
        )
        .mount(&server)
        .await;

    let err = client.zones().await.unwrap_err();
    assert!(err.is_deserialization());
    assert!(err.to_string().contains("zone at index 0"));
}

mod integration;
mod resources;

use crate::MaasClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts the version endpoint and builds a client against the mock server.
pub(crate) async fn connected_client(server: &MockServer) -> MaasClient {
    Mock::given(method("GET"))
        .and(path("/MAAS/api/2.0/version/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "version": "2.1.9",
            "subversion": "bzr6434-0ubuntu1",
            "capabilities": ["networks-management"],
        })))
        .mount(server)
        .await;

    MaasClient::builder()
        .base_url(format!("{}/MAAS/", server.uri()))
        .unwrap()
        .api_key("consumer:token:secret")
        .unwrap()
        .build()
        .await
        .unwrap()
}

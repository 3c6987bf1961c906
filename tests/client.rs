//
//  spotctl
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end client tests against a mock Spot API.

use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;

use spotctl::api::resources::{CloudSpace, CloudSpaceSpec};
use spotctl::api::{ApiError, ClientConfig, Context, ErrorKind, PatchOperation, SpotClient};
use spotctl::auth::StaticToken;

fn client_for(server: &Server) -> SpotClient {
    SpotClient::with_token_source(
        &server.url(),
        Duration::from_secs(5),
        Arc::new(StaticToken("test-token".into())),
    )
    .unwrap()
}

#[tokio::test]
async fn test_get_region() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ngpc.rxt.io/v1/regions/uk-lon-1")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(
            json!({
                "apiVersion": "ngpc.rxt.io/v1",
                "kind": "Region",
                "metadata": { "name": "uk-lon-1" },
                "spec": {
                    "country": "United Kingdom",
                    "description": "London",
                    "provider": { "providerType": "ospc", "providerRegionName": "LON" }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let region = client_for(&server)
        .get_region(&Context::background(), "uk-lon-1")
        .await
        .unwrap();

    assert_eq!(region.spec.country, "United Kingdom");
    assert_eq!(region.spec.provider.provider_region_name, "LON");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_organizations_uses_auth_group() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/auth.ngpc.rxt.io/v1/organizations")
        .with_status(200)
        .with_body(
            json!({
                "start": 0, "limit": 10, "length": 1, "total": 1,
                "organizations": [{
                    "id": "org_123",
                    "name": "acme",
                    "display_name": "Acme Corp",
                    "metadata": { "namespace": "org-abc123" }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let orgs = client_for(&server)
        .list_organizations(&Context::background())
        .await
        .unwrap();

    assert_eq!(orgs.total, 1);
    assert_eq!(orgs.organizations[0].metadata.namespace, "org-abc123");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_not_found_maps_to_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/ngpc.rxt.io/v1/namespaces/org-abc/cloudspaces/missing")
        .with_status(404)
        .with_body(r#"{"code":404,"message":"cloudspaces.ngpc.rxt.io \"missing\" not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .get_cloudspace(&Context::background(), "org-abc", "missing")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert!(err.is_not_found());
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn test_undecodable_body_is_internal_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/ngpc.rxt.io/v1/regions/uk-lon-1")
        .with_status(200)
        .with_body(r#"{"spec":5}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/ngpc.rxt.io/v1/regions")
        .with_status(200)
        .with_body(r#"{"items":[{"metadata":{"name":"uk-lon-1"}},{"spec":"broken"}]}"#)
        .create_async()
        .await;
    let client = client_for(&server);
    let ctx = Context::background();

    let err = client.get_region(&ctx, "uk-lon-1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(err.to_string().contains("failed to decode response"));

    // one bad item voids the whole list
    let err = client.list_regions(&ctx).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[tokio::test]
async fn test_delete_with_empty_body_is_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/ngpc.rxt.io/v1/namespaces/org-abc/spotnodepools/pool-a")
        .with_status(202)
        .create_async()
        .await;

    let response = client_for(&server)
        .delete_spot_node_pool(&Context::background(), "org-abc", "pool-a")
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.status, "Success");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_all_targets_collection() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/ngpc.rxt.io/v1/namespaces/org-abc/spotnodepools")
        .with_status(200)
        .with_body(r#"{"status":"Success"}"#)
        .create_async()
        .await;

    let response = client_for(&server)
        .delete_all_spot_node_pools(&Context::background(), "org-abc")
        .await
        .unwrap();

    assert!(response.is_success());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_edit_sends_json_patch() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/ngpc.rxt.io/v1/namespaces/org-abc/spotnodepools/pool-a")
        .match_header("content-type", "application/json-patch+json")
        .match_body(Matcher::Json(json!([
            { "op": "replace", "path": "/spec/desired", "value": 5 }
        ])))
        .with_status(200)
        .with_body(
            json!({
                "metadata": { "name": "pool-a", "namespace": "org-abc" },
                "spec": { "serverClass": "gp.vs1.large-lon", "desired": 5 }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let updated = client_for(&server)
        .edit_spot_node_pool(
            &Context::background(),
            "org-abc",
            "pool-a",
            &[PatchOperation::replace("/spec/desired", 5)],
        )
        .await
        .unwrap();

    assert_eq!(updated.spec.desired, Some(5));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_cloudspace_posts_envelope() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/ngpc.rxt.io/v1/namespaces/org-abc/cloudspaces")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "apiVersion": "ngpc.rxt.io/v1",
            "kind": "CloudSpace",
            "metadata": { "name": "prod", "namespace": "org-abc" },
            "spec": { "region": "uk-lon-1", "kubernetesVersion": "1.31.1", "cni": "cilium" }
        })))
        .with_status(201)
        .with_body(
            json!({
                "metadata": { "name": "prod", "namespace": "org-abc" },
                "spec": { "region": "uk-lon-1" },
                "status": { "phase": "Provisioning" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let cloudspace = CloudSpace::new(
        "prod",
        "org-abc",
        CloudSpaceSpec {
            region: "uk-lon-1".into(),
            kubernetes_version: "1.31.1".into(),
            cni: "cilium".into(),
            cloud: "default".into(),
            ..Default::default()
        },
    );
    let created = client_for(&server)
        .create_cloudspace(&Context::background(), "org-abc", &cloudspace)
        .await
        .unwrap();

    assert_eq!(created.status.unwrap().phase, "Provisioning");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_validation_happens_before_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let client = client_for(&server);
    let ctx = Context::background();

    let err = client.list_cloudspaces(&ctx, "").await.unwrap_err();
    assert_eq!(err.to_string(), "namespace is required");

    let err = client.get_spot_node_pool(&ctx, "org-abc", " ").await.unwrap_err();
    assert_eq!(err.to_string(), "spot node pool name is required");

    let err = client
        .edit_cloudspace(&ctx, "org-abc", "prod", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_refresh_token_flow_end_to_end() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/oauth/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "my-refresh".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"access_token":"a","id_token":"id-xyz","expires_in":3600,"token_type":"Bearer"}"#)
        .expect(1)
        .create_async()
        .await;
    let regions_mock = server
        .mock("GET", "/ngpc.rxt.io/v1/regions")
        .match_header("authorization", "Bearer id-xyz")
        .with_status(200)
        .with_body(r#"{"items":[{"metadata":{"name":"uk-lon-1"}}]}"#)
        .expect(2)
        .create_async()
        .await;

    let config = ClientConfig {
        refresh_token: "my-refresh".into(),
        base_url: server.url(),
        oauth_url: format!("{}/oauth/token", server.url()),
        timeout: Duration::from_secs(5),
        debug: false,
    };
    let client = SpotClient::new(&config).unwrap();
    let ctx = Context::background();

    assert_eq!(client.list_regions(&ctx).await.unwrap().len(), 1);
    assert_eq!(client.list_regions(&ctx).await.unwrap().len(), 1);

    token_mock.assert_async().await;
    regions_mock.assert_async().await;
}

#[tokio::test]
async fn test_cancelled_context_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (ctx, cancel) = Context::background().with_cancel();
    cancel.cancel();

    let err = client_for(&server).list_regions(&ctx).await.unwrap_err();
    assert!(err.is_cancelled());
    mock.assert_async().await;
}

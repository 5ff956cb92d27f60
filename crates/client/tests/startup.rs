//! Session startup end to end: controller over the HTTP gateway.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockroom_client::session::CONNECTIVITY_ERROR;
use stockroom_client::{ClientConfig, ConnectionState, HttpGateway, SyncController};
use stockroom_core::ProductId;
use stockroom_products::ProductPatch;

fn controller_for(base_url: String) -> SyncController<HttpGateway> {
    let config = ClientConfig::new(base_url).expect("valid url");
    SyncController::new(HttpGateway::new(&config).expect("client builds"))
}

#[tokio::test]
async fn successful_probe_loads_products() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Pen", "unit": "Piece", "category": "Stationery",
              "brand": "Acme", "stock": 10, "status": "In Stock" },
            { "id": 2, "name": "Glue", "unit": "Piece", "category": "Office",
              "brand": "Acme", "stock": 0, "status": "Out of Stock" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(format!("{}/api", server.uri()));

    assert_eq!(controller.start().await, ConnectionState::Connected);
    assert_eq!(controller.products().len(), 2);
    assert_eq!(controller.categories(), vec!["Stationery", "Office"]);

    let session = controller.session();
    assert!(session.connection_tested());
    assert!(!session.loading());
    assert_eq!(session.error(), None);

    // Second start reuses the decided state.
    assert_eq!(controller.start().await, ConnectionState::Connected);
}

#[tokio::test]
async fn partial_update_response_is_merged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "name": "Pen", "unit": "Piece", "category": "Stationery",
              "brand": "Acme", "stock": 10, "status": "In Stock" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/products/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stock": 0 })))
        .mount(&server)
        .await;

    let controller = controller_for(format!("{}/api", server.uri()));
    controller.start().await;

    let outcome = controller
        .update(ProductId::new(7), &ProductPatch::default().with_stock(0))
        .await;
    assert!(outcome.is_success());

    let stored = controller.store().get(ProductId::new(7)).unwrap();
    assert_eq!(stored.stock, 0);
    assert_eq!(stored.status, "Out of Stock");
    assert_eq!(stored.name, "Pen");
}

#[tokio::test]
async fn unreachable_backend_fails_the_session() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let controller = controller_for(format!("http://127.0.0.1:{port}/api"));

    assert_eq!(controller.start().await, ConnectionState::Failed);

    let session = controller.session();
    assert!(session.connection_tested());
    assert_eq!(session.error(), Some(CONNECTIVITY_ERROR));
    assert!(controller.products().is_empty());
}

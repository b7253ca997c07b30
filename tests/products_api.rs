use axum::Router;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, StatusCode, header};
use product_api::modules::product::entity;
use product_api::session::SessionFactory;
use product_api::{AppState, app, database};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tower::ServiceExt;

async fn test_app() -> Router {
    test_app_with_connection().await.0
}

/// The router plus a handle on its database, for checking or breaking
/// what is stored underneath the API.
async fn test_app_with_connection() -> (Router, DatabaseConnection) {
    let conn = database::connect_in_memory().await.unwrap();
    let client: SocketAddr = "127.0.0.1:40000".parse().unwrap();
    let router =
        app(AppState::new(SessionFactory::new(conn.clone()))).layer(MockConnectInfo(client));
    (router, conn)
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<&str>) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let req = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let location = resp
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec();

    Reply {
        status,
        location,
        body,
    }
}

async fn create(router: &Router, body: &str) -> Reply {
    send(router, "POST", "/products", Some(body)).await
}

async fn list_len(router: &Router) -> usize {
    let reply = send(router, "GET", "/products", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.json().as_array().unwrap().len()
}

#[tokio::test]
async fn create_then_fetch_widget() {
    let router = test_app().await;

    let created = create(&router, r#"{"name":"Widget","price":"9.99"}"#).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert!(created.body.is_empty());
    let location = created.location.expect("201 carries a Location header");
    assert_eq!(location, "/products/1");

    let fetched = send(&router, "GET", &location, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(
        fetched.json(),
        json!({ "id": 1, "name": "Widget", "price": 9.99 })
    );
}

#[tokio::test]
async fn list_starts_empty() {
    let router = test_app().await;
    let reply = send(&router, "GET", "/products", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), json!([]));
}

#[tokio::test]
async fn list_returns_every_created_product_in_order() {
    let router = test_app().await;
    let inputs = [("Widget", "9.99"), ("Gadget", "25"), ("Doohickey", "0.5")];
    for (name, price) in inputs {
        let body = json!({ "name": name, "price": price }).to_string();
        assert_eq!(create(&router, &body).await.status, StatusCode::CREATED);
    }

    let reply = send(&router, "GET", "/products", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    let products = reply.json();
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), inputs.len());

    for (i, ((name, price), product)) in inputs.iter().zip(products).enumerate() {
        assert_eq!(product["id"], json!(i as i64 + 1));
        assert_eq!(product["name"], json!(name));
        assert_eq!(
            product["price"].as_f64().unwrap(),
            price.parse::<f64>().unwrap()
        );
    }
}

#[tokio::test]
async fn invalid_bodies_are_rejected_and_not_stored() {
    let router = test_app().await;
    assert_eq!(
        create(&router, r#"{"name":"Kept","price":"1.00"}"#).await.status,
        StatusCode::CREATED
    );

    let bad_bodies = [
        r#"{"name":"Bad","price":"notanumber"}"#,
        r#"{"price":"9.99"}"#,
        r#"{"name":null,"price":"9.99"}"#,
        r#"{"name":"NoPrice"}"#,
        r#"{"name":"Numeric","price":9.99}"#,
        r#"{"name":"","price":"9.99"}"#,
        "null",
        "{not json",
    ];
    for body in bad_bodies {
        let reply = create(&router, body).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(reply.json()["statusCode"], json!(400));
    }

    assert_eq!(list_len(&router).await, 1);
}

#[tokio::test]
async fn empty_body_is_bad_request() {
    let router = test_app().await;
    let reply = send(&router, "POST", "/products", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(list_len(&router).await, 0);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let router = test_app().await;
    for uri in ["/products/xyz", "/products/abc", "/products/1.5"] {
        let reply = send(&router, "GET", uri, None).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "uri {uri}");
    }
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let router = test_app().await;
    let reply = send(&router, "GET", "/products/999999", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["statusCode"], json!(404));
}

#[tokio::test]
async fn repeated_fetch_is_stable() {
    let router = test_app().await;
    let created = create(&router, r#"{"name":"Widget","price":"19.95"}"#).await;
    let location = created.location.unwrap();

    let first = send(&router, "GET", &location, None).await;
    let second = send(&router, "GET", &location, None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json(), second.json());
    assert_eq!(first.json()["name"], json!("Widget"));
}

#[tokio::test]
async fn scientific_price_is_accepted() {
    let router = test_app().await;
    let created = create(&router, r#"{"name":"Bulk","price":"1.5e1"}"#).await;
    assert_eq!(created.status, StatusCode::CREATED);

    let fetched = send(&router, "GET", &created.location.unwrap(), None).await;
    assert_eq!(fetched.json()["price"].as_f64(), Some(15.0));
}

#[tokio::test]
async fn works_without_connect_info() {
    let conn = database::connect_in_memory().await.unwrap();
    let router = app(AppState::new(SessionFactory::new(conn)));

    let reply = send(&router, "GET", "/products", None).await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn high_precision_price_is_stored_exactly() {
    let (router, conn) = test_app_with_connection().await;
    let created = create(&router, r#"{"name":"Yacht","price":"12345678901234567.89"}"#).await;
    assert_eq!(created.status, StatusCode::CREATED);

    let row = entity::Entity::find_by_id(1).one(&conn).await.unwrap().unwrap();
    assert_eq!(row.price, "12345678901234567.89");

    let fetched = send(&router, "GET", &created.location.unwrap(), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
}

#[tokio::test]
async fn largest_decimal_price_round_trips() {
    let (router, conn) = test_app_with_connection().await;
    let created = create(
        &router,
        r#"{"name":"Everything","price":"79228162514264337593543950335"}"#,
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let row = entity::Entity::find_by_id(1).one(&conn).await.unwrap().unwrap();
    assert_eq!(row.price, "79228162514264337593543950335");

    let fetched = send(&router, "GET", &created.location.unwrap(), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert!(fetched.json()["price"].as_f64().unwrap() > 7.9e28);
    assert_eq!(list_len(&router).await, 1);
}

#[tokio::test]
async fn price_beyond_decimal_range_is_bad_request() {
    let (router, conn) = test_app_with_connection().await;
    let reply = create(
        &router,
        r#"{"name":"TooMuch","price":"792281625142643375935439503350"}"#,
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(entity::Entity::find().one(&conn).await.unwrap().is_none());
}

#[tokio::test]
async fn storage_failure_is_internal_server_error() {
    let (router, conn) = test_app_with_connection().await;
    conn.execute_unprepared("DROP TABLE products").await.unwrap();

    let reply = send(&router, "GET", "/products", None).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = reply.json();
    assert_eq!(body["statusCode"], json!(500));
    assert!(body["message"].is_string());

    let reply = create(&router, r#"{"name":"Widget","price":"9.99"}"#).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
}

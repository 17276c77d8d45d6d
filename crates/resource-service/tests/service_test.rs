use http::StatusCode;
use resource_service::auth::Principal;
use resource_service::config::ServiceConfig;
use resource_service::lifecycle::ResourceSystem;
use resource_service::request::{Request, Response};
use serde_json::{json, Value};

fn admin() -> Principal {
    Principal::new("admin").with_permission("*")
}

fn start() -> ResourceSystem {
    ResourceSystem::new(&ServiceConfig::default()).expect("system starts")
}

async fn create(system: &ResourceSystem, path: &str, payload: Value) -> Response {
    system
        .service()
        .handle(Request::post_json(path, admin(), &payload))
        .await
}

/// End-to-end: create, read back, edit, remove, then confirm it is gone.
#[tokio::test]
async fn test_full_crud_lifecycle() {
    let system = start();
    let service = system.service();

    let payload = json!({ "customer": "ACME", "lines": [{ "sku": "A-1", "qty": 2 }] });
    let created = create(&system, "/orders/create", payload.clone()).await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["id"], 1);

    let detail = service.handle(Request::get("/orders/detail/1", admin())).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["payload"], payload);
    assert_eq!(detail.body["kind"], "orders");

    let edited = service
        .handle(Request::post_json(
            "/orders/edit",
            admin(),
            &json!({ "id": 1, "payload": { "customer": "Globex" } }),
        ))
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["id"], 1);
    assert_eq!(edited.body["payload"], json!({ "customer": "Globex" }));

    let removed = service
        .handle(Request::post_json("/orders/remove", admin(), &json!({ "id": 1 })))
        .await;
    assert_eq!(removed.body, json!({ "removed": [1] }));

    let gone = service.handle(Request::get("/orders/1", admin())).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], "ResourceNotFound");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let system = start();
    let service = system.service();

    assert_eq!(create(&system, "/products/create", json!({ "n": 1 })).await.body["id"], 1);
    assert_eq!(create(&system, "/products/create", json!({ "n": 2 })).await.body["id"], 2);
    service
        .handle(Request::post("/products/remove", admin(), "1"))
        .await;
    assert_eq!(create(&system, "/products/create", json!({ "n": 3 })).await.body["id"], 3);

    let listed = service.handle(Request::get("/products/list", admin())).await;
    let ids: Vec<u64> = listed
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_edit_of_absent_id_leaves_store_unchanged() {
    let system = start();
    let service = system.service();
    create(&system, "/users/create", json!({ "name": "alice" })).await;

    let before = service.handle(Request::get("/users", admin())).await;
    let result = service
        .handle(Request::post_json(
            "/users/edit",
            admin(),
            &json!({ "id": "9", "payload": { "name": "mallory" } }),
        ))
        .await;
    assert_eq!(result.status, StatusCode::NOT_FOUND);
    assert_eq!(
        result.body,
        json!({
            "status": 404,
            "error": "ResourceNotFound",
            "message": "users resource '9' not found",
        })
    );

    let after = service.handle(Request::get("/users", admin())).await;
    assert_eq!(before.body, after.body);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_permission_denied_has_no_side_effect() {
    let system = start();
    let service = system.service();
    create(&system, "/orders/create", json!({ "customer": "ACME" })).await;

    let viewer = Principal::new("viewer").with_permission("orders:list");
    let denied = service
        .handle(Request::post_json("/orders/remove", viewer.clone(), &json!({ "id": 1 })))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["error"], "PermissionDenied");

    let denied_create = service
        .handle(Request::post_json("/orders/add", viewer.clone(), &json!({})))
        .await;
    assert_eq!(denied_create.status, StatusCode::FORBIDDEN);

    let listed = service.handle(Request::get("/orders/list", viewer)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_detail_is_open_but_list_is_not() {
    let system = start();
    let service = system.service();
    create(&system, "/bom/create", json!({ "parent": "A" })).await;

    let anonymous = Principal::anonymous();
    let detail = service.handle(Request::get("/bom/1", anonymous.clone())).await;
    assert_eq!(detail.status, StatusCode::OK);

    let list = service.handle(Request::get("/bom", anonymous)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_routing_edge_cases() {
    let system = start();
    let service = system.service();

    let trailing = service.handle(Request::get("/orders/", admin())).await;
    assert_eq!(trailing.status, StatusCode::OK);
    assert_eq!(trailing.body, json!([]));

    let non_numeric = service.handle(Request::get("/orders/abc", admin())).await;
    assert_eq!(non_numeric.status, StatusCode::NOT_FOUND);
    assert_eq!(non_numeric.body["error"], "ResourceNotFound");

    let unknown = service.handle(Request::get("/invoices/list", admin())).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body["error"], "RouteNotFound");

    // list exists only as GET
    let wrong_method = service
        .handle(Request::post("/orders/list", admin(), "{}"))
        .await;
    assert_eq!(wrong_method.body["error"], "RouteNotFound");

    // operation names under the other method are not taken as ids
    for path in ["/orders/edit", "/bom/remove", "/users/create", "/products/add"] {
        let response = service.handle(Request::get(path, admin())).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.body["error"], "RouteNotFound", "{path}");
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_bulk_remove_is_atomic() {
    let system = start();
    let service = system.service();
    for n in 0..3 {
        create(&system, "/bom/add", json!({ "n": n })).await;
    }

    let partial = service
        .handle(Request::post_json("/bom/remove", admin(), &json!({ "ids": [1, 7] })))
        .await;
    assert_eq!(partial.status, StatusCode::NOT_FOUND);
    let listed = service.handle(Request::get("/bom/list", admin())).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 3);

    let removed = service
        .handle(Request::post("/bom/remove", admin(), "\"1,3\""))
        .await;
    assert_eq!(removed.body, json!({ "removed": [1, 3] }));
    let listed = service.handle(Request::get("/bom/list", admin())).await;
    assert_eq!(listed.body[0]["id"], 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let system = start();
    let service = system.service();

    for (path, body) in [
        ("/orders/create", "not json"),
        ("/orders/create", "[1, 2]"),
        ("/orders/edit", r#"{"payload": {}}"#),
        ("/orders/remove", r#"{"ids": []}"#),
    ] {
        let response = service.handle(Request::post(path, admin(), body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path} {body}");
        assert_eq!(response.body["error"], "InvalidPayload");
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_wildcard_grants() {
    let system = start();
    let service = system.service();
    let order_admin = Principal::new("ops").with_permission("orders:*");

    let created = service
        .handle(Request::post_json("/orders/add", order_admin.clone(), &json!({ "x": 1 })))
        .await;
    assert_eq!(created.status, StatusCode::OK);

    let other = service
        .handle(Request::post_json("/users/add", order_admin, &json!({ "x": 1 })))
        .await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_base_path_and_catalog() {
    let config = ServiceConfig {
        base_path: "/api".to_string(),
        ..ServiceConfig::default()
    };
    let system = ResourceSystem::new(&config).unwrap();
    let service = system.service();

    let mounted = service.handle(Request::get("/api/users/list", admin())).await;
    assert_eq!(mounted.status, StatusCode::OK);
    let unmounted = service.handle(Request::get("/users/list", admin())).await;
    assert_eq!(unmounted.status, StatusCode::NOT_FOUND);

    let catalog = service.router().catalog();
    assert_eq!(catalog.len(), 32);
    assert!(catalog.iter().all(|e| e.path.starts_with("/api/")));

    let removes = service.router().search("remove");
    assert_eq!(removes.len(), 4);
    assert!(removes.iter().all(|e| e.method == "POST"));

    system.shutdown().await.unwrap();
}

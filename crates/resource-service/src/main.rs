use resource_actor::tracing::setup_tracing;
use resource_service::auth::Principal;
use resource_service::config::ServiceConfig;
use resource_service::lifecycle::ResourceSystem;
use resource_service::request::{Request, Response};
use serde_json::json;
use tracing::{info, warn, Instrument};

fn log_response(label: &str, response: &Response) {
    if response.is_success() {
        info!(status = response.status.as_u16(), body = %response.body, "{label}");
    } else {
        warn!(status = response.status.as_u16(), body = %response.body, "{label}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file as the first argument, CRUD_* env vars on top
    let config = match std::env::args().nth(1) {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::from_env()?,
    };
    setup_tracing(&config.log_filter);

    info!(?config, "Starting resource service");
    let system = ResourceSystem::new(&config)?;
    let base = config.base_path.as_str();

    let admin = Principal::new("admin").with_permission("*");
    let viewer = Principal::new("viewer").with_permission("orders:list");

    let span = tracing::info_span!("admin_session");
    async {
        let service = system.service();
        let created = service
            .handle(Request::post_json(
                format!("{base}/orders/create"),
                admin.clone(),
                &json!({ "customer": "ACME", "total": 125.5 }),
            ))
            .await;
        log_response("Order created", &created);

        let edited = service
            .handle(Request::post_json(
                format!("{base}/orders/edit"),
                admin.clone(),
                &json!({ "id": 1, "payload": { "customer": "ACME", "total": 99.0 } }),
            ))
            .await;
        log_response("Order edited", &edited);

        let bom = service
            .handle(Request::post_json(
                format!("{base}/bom/add"),
                admin.clone(),
                &json!({ "parent": "A-1", "children": ["B-1", "B-2"] }),
            ))
            .await;
        log_response("BOM created", &bom);
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("viewer_session");
    async {
        let service = system.service();
        let listed = service
            .handle(Request::get(format!("{base}/orders"), viewer.clone()))
            .await;
        log_response("Orders listed", &listed);

        let denied = service
            .handle(Request::post_json(
                format!("{base}/orders/remove"),
                viewer.clone(),
                &json!({ "id": 1 }),
            ))
            .await;
        log_response("Remove as viewer", &denied);

        let missing = service
            .handle(Request::get(format!("{base}/users/detail/42"), viewer.clone()))
            .await;
        log_response("Unknown user", &missing);
    }
    .instrument(span)
    .await;

    for endpoint in system.service().router().search("orders") {
        info!(
            method = %endpoint.method,
            path = %endpoint.path,
            permission = endpoint.permission.as_deref().unwrap_or("-"),
            "{}",
            endpoint.name
        );
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}

use crate::config::RouterConfig;
use crate::router_state::RouterState;
use actix_web::{HttpRequest, HttpResponse, HttpServer, get, post, web};
use serde_json::{Value, json};

#[get("/health")]
pub async fn health(_req: HttpRequest, _: web::Data<RouterState>) -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

#[post("/mcp/send")]
pub async fn send_messages(
    _req: HttpRequest,
    batch: web::Json<Vec<Value>>,
    app_state: web::Data<RouterState>,
) -> HttpResponse {
    let results = app_state.send_batch(batch.into_inner()).await;
    HttpResponse::Ok().json(json!({ "results": results }))
}

#[get("/mcp/log")]
pub async fn message_log(_req: HttpRequest, app_state: web::Data<RouterState>) -> HttpResponse {
    HttpResponse::Ok().json(app_state.log.snapshot())
}

#[post("/mcp/execute-search")]
pub async fn execute_search(
    _req: HttpRequest,
    query: web::Json<Value>,
    app_state: web::Data<RouterState>,
) -> Result<HttpResponse, actix_web::Error> {
    let response = app_state
        .execute_search(&query.into_inner())
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/registry")]
pub async fn registry(_req: HttpRequest, app_state: web::Data<RouterState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "services": app_state.registry.services() }))
}

#[get("/registry/health")]
pub async fn registry_health(
    _req: HttpRequest,
    app_state: web::Data<RouterState>,
) -> HttpResponse {
    let statuses = app_state.probe_services().await;
    let services = statuses
        .into_iter()
        .map(|(service, up)| {
            json!({
                "service": service,
                "status": if up { "up" } else { "down" },
            })
        })
        .collect::<Vec<_>>();
    HttpResponse::Ok().json(json!({ "services": services }))
}

pub async fn periodic_logging(state: RouterState) {
    loop {
        tokio::time::sleep(std::time::Duration::from_secs(state.log_interval)).await;
        let statuses = state.probe_services().await;
        let up = statuses.iter().filter(|(_, up)| *up).count();
        log::info!("Routed messages: {}", state.log.len());
        log::info!("Healthy services: {}/{}", up, statuses.len());
    }
}

pub async fn startup(config: RouterConfig, state: RouterState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    println!("Starting server at {}:{}", config.host, config.port);

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .service(health)
            .service(send_messages)
            .service(message_log)
            .service(execute_search)
            .service(registry)
            .service(registry_health)
    })
    .bind((config.host, config.port))?
    .run()
    .await?;

    std::io::Result::Ok(())
}

pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrderService;
use config::AppConfig;
use infrastructure::order_repo::DieselOrderRepository;
use infrastructure::product_client::HttpProductClient;

pub use db::{create_pool, init_schema, wait_for_database, DbPool};

pub type AppService = OrderService<HttpProductClient, DieselOrderRepository>;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::root,
        handlers::health::health,
        handlers::orders::create_order,
        handlers::orders::get_order,
    ),
    components(schemas(
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderResponse,
    )),
    tags(
        (name = "orders", description = "Order creation and lookup"),
        (name = "service", description = "Liveness and greeting"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to the configured address.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(pool: DbPool, cfg: &AppConfig) -> std::io::Result<actix_web::dev::Server> {
    let products =
        HttpProductClient::new(&cfg.product_service.base_url, cfg.product_service.timeout)
            .map_err(std::io::Error::other)?;
    let service = web::Data::new(OrderService::new(
        products,
        DieselOrderRepository::new(pool),
    ));
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        // Undeserializable bodies answer in the same error shape as every
        // other non-2xx response.
        let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "InvalidInput",
                    "message": message,
                })),
            )
            .into()
        });

        App::new()
            .app_data(service.clone())
            .app_data(json_cfg)
            .wrap(Logger::default())
            .route("/", web::get().to(handlers::health::root))
            .route("/health", web::get().to(handlers::health::health))
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("/{id}", web::get().to(handlers::orders::get_order)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((cfg.host.clone(), cfg.port))?
    .run())
}

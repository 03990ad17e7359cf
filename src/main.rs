use dotenvy::dotenv;
use order_service::config::AppConfig;
use order_service::db::{BOOTSTRAP_ATTEMPTS, BOOTSTRAP_DELAY};
use order_service::{build_server, create_pool, init_schema, wait_for_database};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cfg = AppConfig::from_env().expect("invalid configuration");

    let pool = create_pool(&cfg.database_url);
    wait_for_database(&pool, BOOTSTRAP_ATTEMPTS, BOOTSTRAP_DELAY)
        .expect("database did not become available");
    init_schema(&pool).expect("failed to initialise database schema");

    log::info!("Starting server at http://{}:{}", cfg.host, cfg.port);

    build_server(pool, &cfg)?.await
}

use std::process;

use actix_web::{App, HttpServer, middleware, web};
use config::{Config, ConfigError, Environment, File};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use dotenvy::dotenv;

use pushkind_directory::db::{DbPool, establish_connection_pool};
use pushkind_directory::models::config::ServerConfig;
use pushkind_directory::repository::DieselRepository;
use pushkind_directory::routes::{businesses, categories, json_config};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// `config/default.yaml` (optional) overridden by `APP_*` variables.
fn load_config() -> Result<ServerConfig, ConfigError> {
    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

fn run_migrations(pool: &DbPool) -> Result<(), String> {
    let mut conn = pool.get().map_err(|e| e.to_string())?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| e.to_string())?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run migrations: {e}");
        process::exit(1);
    }

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(json_config())
            .app_data(web::Data::new(repo.clone()))
            .configure(categories::configure)
            .configure(businesses::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}

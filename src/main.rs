use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::io;
use std::sync::Arc;

use employee_manager_backend::config::{Config, StorageBackend};
use employee_manager_backend::db::{self, EmployeeRepository, PgEmployeeRepository, SqliteEmployeeRepository};
use employee_manager_backend::routes;
use employee_manager_backend::services::employee::EmployeeService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    let repo: Arc<dyn EmployeeRepository> = match &config.storage {
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = db::create_pool(database_url, *max_connections)
                .await
                .map_err(|err| {
                    error!("Failed to connect to the database: {}", err);
                    io::Error::new(io::ErrorKind::Other, err)
                })?;
            db::ensure_schema(&pool).await.map_err(|err| {
                error!("Failed to prepare the employees schema: {}", err);
                io::Error::new(io::ErrorKind::Other, err)
            })?;
            Arc::new(PgEmployeeRepository::new(pool, config.search_case_sensitive))
        }
        StorageBackend::Sqlite { database_url } => {
            let pool = db::create_sqlite_pool(database_url, config.search_case_sensitive)
                .await
                .map_err(|err| {
                    error!("Failed to open the SQLite database: {}", err);
                    io::Error::new(io::ErrorKind::Other, err)
                })?;
            db::ensure_sqlite_schema(&pool).await.map_err(|err| {
                error!("Failed to prepare the employees schema: {}", err);
                io::Error::new(io::ErrorKind::Other, err)
            })?;
            Arc::new(SqliteEmployeeRepository::new(pool, config.search_case_sensitive))
        }
    };

    let service = web::Data::new(EmployeeService::new(repo));

    info!("Starting server at {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(service.clone())
            .configure(routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

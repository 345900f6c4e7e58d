use std::sync::Arc;

use actix_web::{get, web, App, HttpResponse, HttpServer, Responder, Result};
use serde::Serialize;

use crate::models::todo::NewTodo;
use crate::repository::{StorageError, TodoRepository};
use crate::service::todo_service::TodoService;

mod api;
mod config;
mod models;
mod repository;
mod service;
mod telemetry;

#[derive(Serialize)]
pub struct Response {
    pub message: String,
}

#[get("/health")]
async fn healthcheck() -> impl Responder {
    let response = Response {
        message: "Everything is working fine".to_string(),
    };
    HttpResponse::Ok().json(response)
}

async fn not_found() -> Result<HttpResponse> {
    let response = Response {
        message: "Resource not found".to_string(),
    };
    Ok(HttpResponse::NotFound().json(response))
}

/// Inserts the two showcase todos on first start; a store that already
/// holds data is left alone.
fn seed_examples(repository: &dyn TodoRepository) -> Result<(), StorageError> {
    if !repository.find_all()?.is_empty() {
        return Ok(());
    }
    repository.insert(NewTodo {
        title: "Example 1".to_string(),
        description: Some("This is an example completed task".to_string()),
        completed: Some(true),
    })?;
    repository.insert(NewTodo {
        title: "Example 2".to_string(),
        description: Some("This is an example of an uncompleted task".to_string()),
        completed: Some(false),
    })?;
    tracing::info!("seeded example todos");
    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = config::Config::new();
    telemetry::init_telemetry();

    let todo_db = repository::database::Database::new(&config.database_url);
    let repository: Arc<dyn TodoRepository> = Arc::new(todo_db);
    if let Err(err) = seed_examples(repository.as_ref()) {
        tracing::warn!("could not seed example todos: {err}");
    }
    let app_data = web::Data::new(TodoService::new(repository));

    tracing::info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move ||
        App::new()
            .app_data(app_data.clone())
            .configure(api::api::config)
            .service(healthcheck)
            .default_service(web::route().to(not_found))
            .wrap(actix_web::middleware::Logger::default())
    )
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}

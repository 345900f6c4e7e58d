use actix_web::{web, get, post, delete, put, HttpResponse};

use crate::models::todo::{NewTodo, TodoPatch};
use crate::service::todo_service::{TodoError, TodoService};
use crate::Response;

#[post("/todo")]
pub async fn create_todo(
    service: web::Data<TodoService>,
    new_todo: web::Json<NewTodo>,
) -> HttpResponse {
    match service.add_todo(new_todo.into_inner()) {
        Ok(todo) => HttpResponse::Ok().json(todo),
        Err(err) => error_response(err),
    }
}

#[get("/todo/{id}")]
pub async fn get_todo_by_id(service: web::Data<TodoService>, id: web::Path<i32>) -> HttpResponse {
    match service.get_todo_by_id(id.into_inner()) {
        Ok(todo) => HttpResponse::Ok().json(todo),
        Err(err) => error_response(err),
    }
}

#[get("/todo")]
pub async fn get_todos(service: web::Data<TodoService>) -> HttpResponse {
    match service.get_all_todos() {
        Ok(todos) => HttpResponse::Ok().json(todos),
        Err(err) => error_response(err),
    }
}

#[delete("/todo/{id}")]
pub async fn delete_todo_by_id(service: web::Data<TodoService>, id: web::Path<i32>) -> HttpResponse {
    match service.delete_todo(id.into_inner()) {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => error_response(err),
    }
}

#[put("/todo/{id}")]
pub async fn update_todo_by_id(
    service: web::Data<TodoService>,
    id: web::Path<i32>,
    patch: web::Json<TodoPatch>,
) -> HttpResponse {
    match service.update_todo(id.into_inner(), patch.into_inner()) {
        Ok(todo) => HttpResponse::Ok().json(todo),
        Err(err) => error_response(err),
    }
}

fn error_response(err: TodoError) -> HttpResponse {
    let response = Response {
        message: err.to_string(),
    };
    match err {
        TodoError::NotFound { .. } => HttpResponse::NotFound().json(response),
        TodoError::Conflict => HttpResponse::Conflict().json(response),
        TodoError::Storage(err) => {
            tracing::error!("storage failure: {err}");
            HttpResponse::InternalServerError().json(response)
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(create_todo)
            .service(get_todo_by_id)
            .service(get_todos)
            .service(delete_todo_by_id)
            .service(update_todo_by_id)
    );
}

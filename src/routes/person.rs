use actix_web::http::header;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use chrono::Local;

use crate::forms::person::PersonForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::person as person_service;

#[get("/person")]
pub async fn list_people(repo: web::Data<DieselRepository>) -> impl Responder {
    match person_service::list_people(repo.get_ref()) {
        Ok(people) => HttpResponse::Ok().json(people),
        Err(err) => error_response(err),
    }
}

#[get("/person/{id}")]
pub async fn get_person(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let id = path.into_inner();
    match person_service::get_person(repo.get_ref(), id) {
        Ok(person) => HttpResponse::Ok().json(person),
        Err(err) => error_response(err),
    }
}

#[post("/person")]
pub async fn create_person(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PersonForm>,
) -> impl Responder {
    let today = Local::now().date_naive();
    match person_service::create_person(repo.get_ref(), form, today) {
        Ok(person) => HttpResponse::Created()
            .insert_header((header::LOCATION, format!("/api/person/{}", person.id)))
            .json(person),
        Err(err) => error_response(err),
    }
}

#[put("/person/{id}")]
pub async fn update_person(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PersonForm>,
) -> impl Responder {
    let id = path.into_inner();
    let today = Local::now().date_naive();
    match person_service::update_person(repo.get_ref(), id, form, today) {
        Ok(person) => HttpResponse::Ok().json(person),
        Err(err) => error_response(err),
    }
}

#[delete("/person/{id}")]
pub async fn delete_person(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = path.into_inner();
    match person_service::delete_person(repo.get_ref(), id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

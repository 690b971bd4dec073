use actix_web::{HttpResponse, Responder, get, web};

use crate::forms::search::{BirthDateQuery, DocumentQuery, NameQuery};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::search as search_service;

#[get("/person/search/by-name")]
pub async fn search_by_name(
    query: web::Query<NameQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_service::search_by_name(repo.get_ref(), query.into_inner()) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(err) => error_response(err),
    }
}

#[get("/person/search/by-document")]
pub async fn search_by_document(
    query: web::Query<DocumentQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_service::search_by_document(repo.get_ref(), query.into_inner()) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(err) => error_response(err),
    }
}

#[get("/person/search/by-birthdate")]
pub async fn search_by_birth_date(
    query: web::Query<BirthDateQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_service::search_by_birth_date(repo.get_ref(), query.into_inner()) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(err) => error_response(err),
    }
}

#[get("/person/search/multiple-phones")]
pub async fn multiple_phones(repo: web::Data<DieselRepository>) -> impl Responder {
    match search_service::people_with_multiple_phones(repo.get_ref()) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(err) => error_response(err),
    }
}

#[get("/person/search/multiple-addresses")]
pub async fn multiple_addresses(repo: web::Data<DieselRepository>) -> impl Responder {
    match search_service::people_with_multiple_addresses(repo.get_ref()) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(err) => error_response(err),
    }
}

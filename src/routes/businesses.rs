use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use serde::Deserialize;

use crate::forms::businesses::{
    CreateBusinessForm, CreateBusinessPayload, UpdateBusinessForm, UpdateBusinessPayload,
};
use crate::forms::reviews::{AddReviewForm, AddReviewPayload};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::businesses::{
    create_business as create_business_service, delete_business as delete_business_service,
    get_business as get_business_service, list_businesses as list_businesses_service,
    list_by_category as list_by_category_service, search_businesses as search_businesses_service,
    update_business as update_business_service,
};
use crate::services::reviews::{
    add_review as add_review_service, list_reviews as list_reviews_service,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

#[post("/business")]
pub async fn create_business(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateBusinessForm>,
) -> impl Responder {
    let payload: CreateBusinessPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match create_business_service(payload, repo.get_ref()) {
        Ok(business) => HttpResponse::Created().json(business),
        Err(err) => error_response(err),
    }
}

#[get("/business")]
pub async fn list_businesses(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_businesses_service(repo.get_ref()) {
        Ok(businesses) => HttpResponse::Ok().json(businesses),
        Err(err) => error_response(err),
    }
}

#[get("/business/search")]
pub async fn search_businesses(
    params: web::Query<SearchParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_businesses_service(&params.q, repo.get_ref()) {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(err) => error_response(err),
    }
}

#[get("/business/category/{id}")]
pub async fn list_by_category(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_by_category_service(&id, repo.get_ref()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => error_response(err),
    }
}

#[get("/business/{id}")]
pub async fn get_business(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match get_business_service(id.into_inner(), repo.get_ref()) {
        Ok(business) => HttpResponse::Ok().json(business),
        Err(err) => error_response(err),
    }
}

#[patch("/business/{id}")]
pub async fn update_business(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateBusinessForm>,
) -> impl Responder {
    let payload: UpdateBusinessPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match update_business_service(id.into_inner(), payload, repo.get_ref()) {
        Ok(business) => HttpResponse::Ok().json(business),
        Err(err) => error_response(err),
    }
}

#[delete("/business/{id}")]
pub async fn delete_business(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_business_service(id.into_inner(), repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => error_response(err),
    }
}

#[post("/business/{id}/reviews")]
pub async fn add_review(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddReviewForm>,
) -> impl Responder {
    let payload: AddReviewPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    match add_review_service(id.into_inner(), payload, repo.get_ref()) {
        Ok(business) => HttpResponse::Created().json(business),
        Err(err) => error_response(err),
    }
}

#[get("/business/{id}/reviews")]
pub async fn list_reviews(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_reviews_service(id.into_inner(), repo.get_ref()) {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => error_response(err),
    }
}

/// Registers every business and review route. Literal paths come before
/// `/business/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search_businesses)
        .service(list_by_category)
        .service(create_business)
        .service(list_businesses)
        .service(get_business)
        .service(update_business)
        .service(delete_business)
        .service(add_review)
        .service(list_reviews);
}

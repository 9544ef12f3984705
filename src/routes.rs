use std::sync::Arc;
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use tracing::warn;

use crate::auth::RequireApiToken;
use crate::config::Settings;
use crate::error::ApiError;
use crate::models::*;
use crate::repo::Repo;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, req| {
                warn!(path = %req.path(), error = %err, "rejected request body");
                ApiError::BadRequest(format!("Invalid data. {err}")).into()
            }),
    )
    .service(web::resource("/").route(web::get().to(hello)))
    .service(
        web::scope("/card")
            .wrap(RequireApiToken)
            .service(
                web::resource("")
                    .route(web::get().to(list_cards))
                    .route(web::post().to(create_card)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_card))
                    .route(web::delete().to(delete_card)),
            ),
    )
    .service(
        web::scope("/list")
            .wrap(RequireApiToken)
            .service(
                web::resource("")
                    .route(web::get().to(list_lists))
                    .route(web::post().to(create_list)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_list))
                    .route(web::delete().to(delete_list)),
            ),
    )
    .default_service(web::to(not_found));
}

#[derive(Clone)]
pub struct AppState { pub repo: Arc<dyn Repo>, pub settings: Arc<Settings> }

impl AppState {
    fn location(&self, kind: &str, id: &str) -> String {
        format!("{}/{}/{}", self.settings.public_url, kind, id)
    }
}

pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body("Hello, world!")
}

async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    warn!(method = %req.method(), path = %req.path(), "no route matched");
    Err(ApiError::NotFound(format!("No route for {} {}", req.method(), req.path())))
}

// ---------------- Cards -----------------------

#[utoipa::path(
    get,
    path = "/card",
    tag = "cards",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All cards in insertion order", body = [Card]),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn list_cards(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let cards = data.repo.list_cards().await?;
    Ok(HttpResponse::Ok().json(cards))
}

#[utoipa::path(
    get,
    path = "/card/{id}",
    tag = "cards",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Card id")),
    responses(
        (status = 200, description = "Card", body = Card),
        (status = 404, description = "Card not found"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn get_card(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let card = data.repo.get_card(&path).await?;
    Ok(HttpResponse::Ok().json(card))
}

#[utoipa::path(
    post,
    path = "/card",
    tag = "cards",
    security(("bearer" = [])),
    request_body = NewCard,
    responses(
        (status = 201, description = "Card created", body = Card),
        (status = 400, description = "Title or content missing"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn create_card(
    data: web::Data<AppState>,
    payload: web::Json<NewCard>,
) -> Result<HttpResponse, ApiError> {
    let card = data.repo.create_card(payload.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, data.location("card", &card.id)))
        .json(card))
}

#[utoipa::path(
    delete,
    path = "/card/{id}",
    tag = "cards",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Card id")),
    responses(
        (status = 204, description = "Card deleted and removed from every list"),
        (status = 404, description = "Card not found"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn delete_card(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    data.repo.delete_card(&path).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---------------- Lists -----------------------

#[utoipa::path(
    get,
    path = "/list",
    tag = "lists",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All lists in insertion order", body = [List]),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn list_lists(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let lists = data.repo.list_lists().await?;
    Ok(HttpResponse::Ok().json(lists))
}

#[utoipa::path(
    get,
    path = "/list/{id}",
    tag = "lists",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "List id")),
    responses(
        (status = 200, description = "List", body = List),
        (status = 404, description = "List not found"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn get_list(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let list = data.repo.get_list(&path).await?;
    Ok(HttpResponse::Ok().json(list))
}

#[utoipa::path(
    post,
    path = "/list",
    tag = "lists",
    security(("bearer" = [])),
    request_body = NewList,
    responses(
        (status = 201, description = "List created", body = List),
        (status = 400, description = "Header missing or a card id does not exist"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn create_list(
    data: web::Data<AppState>,
    payload: web::Json<NewList>,
) -> Result<HttpResponse, ApiError> {
    let list = data.repo.create_list(payload.into_inner()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, data.location("list", &list.id)))
        .json(list))
}

#[utoipa::path(
    delete,
    path = "/list/{id}",
    tag = "lists",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "List id")),
    responses(
        (status = 204, description = "List deleted"),
        (status = 404, description = "List not found"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn delete_list(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    data.repo.delete_list(&path).await?;
    Ok(HttpResponse::NoContent().finish())
}

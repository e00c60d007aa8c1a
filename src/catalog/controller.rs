use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use crate::books::domain::model::Record;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::get_stats_cmd::{GetStatsCommand, GetStatsCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::domain::model::CatalogStats;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, server_error, ServerError};

const MIN_ISBN_LEN: usize = 10;
const MAX_ISBN_LEN: usize = 17;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/books", get(list_books).post(add_book))
        .route("/books/:isbn", get(find_book_by_isbn).delete(remove_book))
        .route("/stats", get(get_stats))
        .with_state(state)
}

pub(crate) async fn root(State(state): State<AppState>) -> Json<Value> {
    let count = state.catalog.count().await;
    Json(json!({
        "message": format!("Welcome to the library catalog API! Books in catalog: {}", count),
        "success": true,
    }))
}

pub(crate) async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ServerError> {
    let res = ListBooksCommand::new(state.catalog).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res.books))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<(StatusCode, Json<Record>), ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let len = req.isbn.trim().chars().count();
    if !(MIN_ISBN_LEN..=MAX_ISBN_LEN).contains(&len) {
        return Err(server_error(StatusCode::BAD_REQUEST,
                                format!("isbn must be {} to {} characters long", MIN_ISBN_LEN, MAX_ISBN_LEN).as_str()));
    }
    let res = AddBookCommand::new(state.catalog).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res.book)))
}

pub(crate) async fn find_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<Record>, ServerError> {
    let req = GetBookCommandRequest { isbn };
    let res = GetBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res.book))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let req = RemoveBookCommandRequest { isbn };
    let res = RemoveBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn get_stats(State(state): State<AppState>) -> Result<Json<CatalogStats>, ServerError> {
    let res = GetStatsCommand::new(state.catalog).execute(GetStatsCommandRequest::default()).await?;
    Ok(Json(res))
}

//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult, StoreContext},
    models::book::{Book, BookMessage, CreateBook, MessageResponse, UpdateCategory, UpdateCount},
    AppState,
};

use super::JsonBody;

/// Ids that cannot be parsed can never match a stored book
fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>().map_err(|_| AppError::book_not_found())
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>),
        (status = 500, description = "Store error", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .list_all()
        .await
        .store_context("Error fetching books")?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .catalog
        .get_by_id(parse_id(&id)?)
        .await
        .store_context("Error fetching book")?;
    Ok(Json(book))
}

/// List books in a category (exact, case-sensitive match)
#[utoipa::path(
    get,
    path = "/books/category/{category}",
    tag = "books",
    params(("category" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Books in the category", body = Vec<Book>)
    )
)]
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .list_by_category(&category)
        .await
        .store_context("Error fetching by category")?;
    Ok(Json(books))
}

/// List books published in a year
#[utoipa::path(
    get,
    path = "/books/year/{year}",
    tag = "books",
    params(("year" = i32, Path, description = "Publication year")),
    responses(
        (status = 200, description = "Books published that year", body = Vec<Book>),
        (status = 400, description = "Year is not a number", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_by_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .catalog
        .list_by_year(&year)
        .await
        .store_context("Error fetching by year")?;
    Ok(Json(books))
}

/// Add a new book
#[utoipa::path(
    post,
    path = "/add-book",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book added", body = BookMessage),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<CreateBook>,
) -> AppResult<(StatusCode, Json<BookMessage>)> {
    let book = state
        .services
        .inventory
        .add_book(data)
        .await
        .store_context("Error adding book")?;
    Ok((
        StatusCode::CREATED,
        Json(BookMessage {
            message: "Book added successfully".to_string(),
            book,
        }),
    ))
}

/// Update the number of available copies
#[utoipa::path(
    patch,
    path = "/books/update-count/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = UpdateCount,
    responses(
        (status = 200, description = "Count updated", body = BookMessage),
        (status = 400, description = "Invalid count", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_count(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(data): JsonBody<UpdateCount>,
) -> AppResult<Json<BookMessage>> {
    let book = state
        .services
        .inventory
        .update_count(parse_id(&id)?, data)
        .await
        .store_context("Error updating count")?;
    Ok(Json(BookMessage {
        message: "Book count updated".to_string(),
        book,
    }))
}

/// Update the category of a book
#[utoipa::path(
    patch,
    path = "/books/update-category/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = BookMessage),
        (status = 400, description = "Invalid category", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(data): JsonBody<UpdateCategory>,
) -> AppResult<Json<BookMessage>> {
    let book = state
        .services
        .inventory
        .update_category(parse_id(&id)?, data)
        .await
        .store_context("Error updating category")?;
    Ok(Json(BookMessage {
        message: "Book category updated".to_string(),
        book,
    }))
}

/// Delete a book, only allowed once no copies are available
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 400, description = "Copies remain", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .inventory
        .delete_book(parse_id(&id)?)
        .await
        .store_context("Error deleting book")?;
    Ok(Json(MessageResponse {
        message: "Book deleted successfully".to_string(),
    }))
}

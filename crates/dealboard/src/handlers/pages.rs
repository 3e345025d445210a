//! Server-rendered pages.
//!
//! Listing pages degrade to an empty set when the store fails so browsing
//! stays available while the database is down; only the detail page
//! surfaces a store error to the client.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use dealboard_core::listing::Listing;

use crate::{handlers::AppError, state::AppState};

/// Number of listings shown on the home page.
const HOME_PAGE_LIMIT: i64 = 20;

/// Template wrapper that converts Askama templates into HTML responses.
struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {err}"),
            )
                .into_response(),
        }
    }
}

/// Home page template showing the most recent listings.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    listings: Vec<Listing>,
}

/// Full listing page template.
#[derive(Template)]
#[template(path = "items.html")]
struct ItemsTemplate {
    listings: Vec<Listing>,
}

/// Detail page template for a single listing.
#[derive(Template)]
#[template(path = "item.html")]
struct ItemTemplate {
    listing: Listing,
}

/// Submission form template.
#[derive(Template)]
#[template(path = "add.html")]
struct AddTemplate;

/// About page template.
#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate;

/// Handler for the home page (GET /).
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let listings = match state.store.recent(HOME_PAGE_LIMIT).await {
        Ok(listings) => listings,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load recent listings");
            Vec::new()
        }
    };

    HtmlTemplate(IndexTemplate { listings })
}

/// Handler for the full listing page (GET /items).
pub async fn items(State(state): State<AppState>) -> impl IntoResponse {
    let listings = match state.store.list_all().await {
        Ok(listings) => listings,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load listings");
            Vec::new()
        }
    };

    HtmlTemplate(ItemsTemplate { listings })
}

/// Handler for a single listing (GET /item/{id}).
///
/// Unknown ids redirect back to the listing page instead of rendering an
/// error.
pub async fn item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    match state.store.get(id).await? {
        Some(listing) => Ok(HtmlTemplate(ItemTemplate { listing }).into_response()),
        None => Ok(Redirect::to("/items").into_response()),
    }
}

/// Handler for the submission form (GET /add).
pub async fn add() -> impl IntoResponse {
    HtmlTemplate(AddTemplate)
}

/// Handler for the about page (GET /about).
pub async fn about() -> impl IntoResponse {
    HtmlTemplate(AboutTemplate)
}

use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::Form;
use chrono::Utc;

use crate::{
    error::AppError,
    forms::ShowForm,
    routes::{
        response::{HtmlResult, page, render},
        views::home::flash_page,
    },
    services::{ServiceContext, listing::ShowListing},
    state::AppState,
};

#[derive(Template)]
#[template(path = "pages/shows.html")]
struct ShowsPage {
    shows: Vec<ShowListing>,
}

#[derive(Template)]
#[template(path = "forms/show.html")]
struct ShowFormPage {
    form: ShowForm,
    errors: Vec<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
        .with_state(state)
}

async fn list_shows(State(state): State<Arc<AppState>>) -> HtmlResult {
    let service = ServiceContext::from_state(state.as_ref()).show();
    let shows = service.list_upcoming(Utc::now().fixed_offset()).await?;
    Ok(render(&ShowsPage { shows })?.into_response())
}

async fn create_show_form() -> HtmlResult {
    let form = ShowForm {
        start_time: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ..ShowForm::default()
    };
    Ok(render(&ShowFormPage {
        form,
        errors: Vec::new(),
    })?
    .into_response())
}

async fn create_show(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShowForm>,
) -> HtmlResult {
    let input = match form.validate() {
        Ok(input) => input,
        Err(err) => return rejected(form, err),
    };

    let services = ServiceContext::from_state(state.as_ref());
    match services.show().create(input).await {
        Ok(_) => flash_page(&services, "Show was successfully listed!".to_string()).await,
        Err(err @ AppError::ReferentialIntegrity(_)) => rejected(form, err),
        Err(err) => Err(err),
    }
}

fn rejected(form: ShowForm, err: AppError) -> HtmlResult {
    page(
        StatusCode::BAD_REQUEST,
        &ShowFormPage {
            form,
            errors: err.messages(),
        },
    )
}

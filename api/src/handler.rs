use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::{info, warn};

use crate::app::AppState;
use crate::error::AppError;
use crate::flash::{self, Notice};
use crate::model::{Category, NewEvent};
use crate::regression::{Features, RegressionModel};
use crate::schema::{AddEventForm, ValidatedEvent, ValidationError};
use crate::views;

const DATE_TIME_FORMAT: &str = "%B %d, %Y %I:%M %p";

/// Render `html`, expiring the flash cookie if a notice was shown on it.
fn page(html: String, notice: Option<Notice>) -> Response {
    match notice {
        Some(_) => (flash::clear(), Html(html)).into_response(),
        None => Html(html).into_response(),
    }
}

fn redirect_with(notice: Notice, to: &str) -> Response {
    (flash::set(notice), Redirect::to(to)).into_response()
}

/// Predicted wasted servings for a validated submission, never negative.
pub fn estimate_waste(model: &RegressionModel, event: &ValidatedEvent) -> f64 {
    if event.guest_no == 0 || event.serve_no == 0 {
        return 0.0;
    }

    let predicted = model.predict(Features {
        guest_no: event.guest_no as f64,
        serve_no: event.serve_no as f64,
        customer_rank: event.customer.rank() as f64,
        prep_rank: event.prep_method.rank() as f64,
        price_rank: event.pricing.rank() as f64,
    });
    predicted.max(0.0)
}

pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let notice = flash::peek(&headers);
    let recorded = state.store.count().await?;
    Ok(page(views::index(recorded, notice), notice))
}

pub async fn add_form(headers: HeaderMap) -> Response {
    let notice = flash::peek(&headers);
    page(views::add_form(notice), notice)
}

pub async fn add_event(
    State(state): State<AppState>,
    form: Result<Form<AddEventForm>, FormRejection>,
) -> Result<Response, AppError> {
    let submitted = match form {
        Ok(Form(form)) => form.validate(),
        Err(rejection) => Err(ValidationError::Malformed(rejection.body_text())),
    };

    let event = match submitted {
        Ok(event) => event,
        Err(err) => {
            warn!(reason = ?err, "rejected submission");
            return Ok(redirect_with(Notice::from(&err), "/add/"));
        }
    };

    let servings_wasted = estimate_waste(&state.model, &event);
    let now = (state.clock)();
    let record = NewEvent {
        epoch: now.timestamp(),
        guest_no: event.guest_no,
        servings_no: event.serve_no,
        pricing: event.pricing,
        prep_method: event.prep_method,
        customer: event.customer,
        servings_wasted: Some(servings_wasted),
        date_time: now.format(DATE_TIME_FORMAT).to_string(),
    };

    state.store.insert(&record).await?;

    info!(
        epoch = record.epoch,
        guest_no = record.guest_no,
        servings_no = record.servings_no,
        servings_wasted,
        "recorded event"
    );
    Ok(redirect_with(Notice::Added, "/view/"))
}

pub async fn view_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let notice = flash::peek(&headers);
    let records = state.store.list_all().await?;
    Ok(page(views::view(&records, notice), notice))
}

use std::sync::Arc;

use axum::{routing::get, Router};
use chrono::{DateTime, Local};

use crate::handler::{add_event, add_form, index, view_events};
use crate::regression::RegressionModel;
use crate::store::EventStore;

pub type Clock = fn() -> DateTime<Local>;

#[derive(Clone)]
pub struct AppState {
    pub store: EventStore,
    pub model: Arc<RegressionModel>,
    pub clock: Clock,
}

impl AppState {
    pub fn new(store: EventStore) -> Self {
        Self {
            store,
            model: Arc::new(RegressionModel::new()),
            clock: Local::now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add/", get(add_form).post(add_event))
        .route("/view/", get(view_events))
        .route("/view", get(view_events))
        .with_state(app_state)
}

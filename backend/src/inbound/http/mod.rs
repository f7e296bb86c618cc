//! HTTP inbound adapter exposing the groups and users REST endpoints.

pub mod error;
pub mod groups;
pub mod health;
pub mod outcome;
pub mod resource_id;
pub mod schemas;
pub mod state;
#[cfg(test)]
mod test_logs;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::{ApiError, ApiResult};
pub use validation::json_config;

/// Register the resource routes and the shared JSON decoder settings.
///
/// The caller supplies `web::Data<HttpState>`.
///
/// ```
/// use actix_web::{App, web};
/// use roster::inbound::http::{configure, state::HttpState};
/// use roster::outbound::memory::InMemoryStore;
///
/// let state = web::Data::new(HttpState::from_store(InMemoryStore::new()));
/// let _app = App::new().app_data(state).configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(groups::list_groups)
        .service(groups::get_group)
        .service(groups::create_group)
        .service(groups::update_group)
        .service(groups::delete_group)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user);
}

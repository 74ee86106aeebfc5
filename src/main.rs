//! Module Tree Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod logging;
mod models;
mod tree;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::from_build_env() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    logging::init_logging(config.log_level);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "invalid build configuration, using defaults");
    }
    tracing::info!(api = %config.api_base_url, scheme = ?config.order_scheme, "starting module tree");

    mount_to_body(move || view! { <App config=config.clone() /> });
}

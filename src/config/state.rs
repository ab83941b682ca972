// Application state module
// Everything a connection needs, built once before the first accept

use super::types::Config;
use crate::error::ServerError;
use crate::logger;
use crate::routing::RouteTable;

/// Application state, shared read-only by every connection
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let routes = RouteTable::from_config(&config.routes)?;
        if routes.is_empty() {
            logger::log_warning("No routes registered, every request will get 404");
        } else {
            logger::log_info(&format!("{} routes registered", routes.len()));
        }
        Ok(Self { config, routes })
    }
}

pub mod config;
pub mod error;
pub mod fare;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

use std::sync::Arc;

use fare::{FareEstimator, PromoCatalog};

pub use config::Config;
pub use error::{AppError, AppResult, FareError};

#[derive(Clone)]
pub struct AppState {
    pub estimator: FareEstimator,
    pub promos: Arc<PromoCatalog>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, promos: PromoCatalog) -> Self {
        let promos = Arc::new(promos);
        Self {
            estimator: FareEstimator::new(promos.clone()),
            promos,
            config,
        }
    }
}

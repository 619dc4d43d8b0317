pub mod api;
pub mod model;
pub mod notify;
pub mod service;

use std::sync::Arc;

use axum::Router;
use robostore_core::Module;

use service::ShopService;

/// Shop Module — customers, robots, orders.
pub struct ShopModule {
    service: Arc<ShopService>,
}

impl ShopModule {
    pub fn new(service: ShopService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl Module for ShopModule {
    fn name(&self) -> &str {
        "shop"
    }

    fn routes(&self) -> Router {
        api::router(self.service.clone())
    }
}

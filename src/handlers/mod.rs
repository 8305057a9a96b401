pub mod analytics;
pub mod checklist;
pub mod delivery_proofs;
pub mod orders;
pub mod products;
pub mod vehicles;

use std::sync::Arc;

use crate::db::DbPool;
use crate::services::{
    analytics::AnalyticsService, checklist::ChecklistService,
    delivery_proofs::DeliveryProofService, orders::OrderService, products::ProductService,
    vehicles::VehicleService,
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductService>,
    pub vehicles: Arc<VehicleService>,
    pub orders: Arc<OrderService>,
    pub delivery_proofs: Arc<DeliveryProofService>,
    pub checklist: Arc<ChecklistService>,
    pub analytics: Arc<AnalyticsService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        let products = Arc::new(ProductService::new(db_pool.clone()));
        let vehicles = Arc::new(VehicleService::new(db_pool.clone()));
        let orders = Arc::new(OrderService::new(db_pool.clone()));
        let delivery_proofs = Arc::new(DeliveryProofService::new(db_pool.clone()));
        let checklist = Arc::new(ChecklistService::new(
            vehicles.clone(),
            products.clone(),
            orders.clone(),
            delivery_proofs.clone(),
        ));
        let analytics = Arc::new(AnalyticsService::new(db_pool));

        Self {
            products,
            vehicles,
            orders,
            delivery_proofs,
            checklist,
            analytics,
        }
    }
}

use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    dto::{ChecklistProgressResponse, ChecklistStepCode},
    entities::order::OrderStatus,
    errors::ServiceError,
    services::{
        delivery_proofs::DeliveryProofService, orders::OrderService, products::ProductService,
        vehicles::VehicleService,
    },
};

/// Derives a user's onboarding checklist from the records they own
#[derive(Clone)]
pub struct ChecklistService {
    vehicles: Arc<VehicleService>,
    products: Arc<ProductService>,
    orders: Arc<OrderService>,
    delivery_proofs: Arc<DeliveryProofService>,
}

impl ChecklistService {
    pub fn new(
        vehicles: Arc<VehicleService>,
        products: Arc<ProductService>,
        orders: Arc<OrderService>,
        delivery_proofs: Arc<DeliveryProofService>,
    ) -> Self {
        Self {
            vehicles,
            products,
            orders,
            delivery_proofs,
        }
    }

    #[instrument(skip(self))]
    pub async fn progress(&self, user_id: Uuid) -> Result<ChecklistProgressResponse, ServiceError> {
        let (vehicles, products, orders, delivered, proofs, active_orders) = tokio::try_join!(
            self.vehicles.count_for_owner(user_id),
            self.products.count_for_owner(user_id),
            self.orders.count_for_owner(user_id, None),
            self.orders
                .count_for_owner(user_id, Some(OrderStatus::Delivered)),
            self.delivery_proofs.count_for_owner(user_id),
            self.orders.count_active_for_owner(user_id),
        )?;

        let progress =
            ChecklistProgressResponse::from_predicate(user_id, active_orders, |step| match step {
                ChecklistStepCode::AddVehicle => vehicles > 0,
                ChecklistStepCode::AddProduct => products > 0,
                ChecklistStepCode::CreateOrder => orders > 0,
                ChecklistStepCode::CompleteDelivery => delivered > 0,
                ChecklistStepCode::CaptureDeliveryProof => proofs > 0,
            });

        debug!(
            completed_steps = progress.completed_steps,
            percentage = progress.percentage,
            "Checklist computed"
        );
        Ok(progress)
    }
}

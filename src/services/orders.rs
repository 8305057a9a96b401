use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    dto::{CreateOrderRequest, OrderResponse},
    entities::{
        order::{self, Column as OrderColumn, Entity as Order, OrderStatus},
        vehicle::Entity as Vehicle,
    },
    errors::ServiceError,
};

/// `ORD-` followed by eight upper-case hex characters
pub fn generate_order_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("ORD-{}", id[..8].to_uppercase())
}

#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
}

impl OrderService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a pending order, checking the assigned vehicle exists
    #[instrument(skip(self, request), fields(owner_id = %request.owner_id))]
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        request.validate()?;
        let db = &*self.db_pool;

        if let Some(vehicle_id) = request.vehicle_id {
            if Vehicle::find_by_id(vehicle_id).one(db).await?.is_none() {
                warn!(vehicle_id = %vehicle_id, "Order references unknown vehicle");
                return Err(ServiceError::NotFound(format!(
                    "Vehicle {} not found",
                    vehicle_id
                )));
            }
        }

        let now = chrono::Utc::now();
        let order_number = generate_order_number();
        let model = order::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_number: Set(order_number.clone()),
            owner_id: Set(request.owner_id),
            customer_name: Set(request.customer_name),
            delivery_address: Set(request.delivery_address),
            status: Set(OrderStatus::Pending),
            vehicle_id: Set(request.vehicle_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .map_err(|e| {
            ServiceError::from_insert_error(
                e,
                format!("Order number {} already exists", order_number),
            )
        })?;

        info!(order_id = %model.id, order_number = %model.order_number, "Order created");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: Uuid) -> Result<OrderResponse, ServiceError> {
        self.find_order(id).await.map(OrderResponse::from)
    }

    pub(crate) async fn find_order(&self, id: Uuid) -> Result<order::Model, ServiceError> {
        Order::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        owner_id: Option<Uuid>,
        status: Option<OrderStatus>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<OrderResponse>, u64), ServiceError> {
        let mut query = Order::find().order_by_desc(OrderColumn::CreatedAt);
        if let Some(owner_id) = owner_id {
            query = query.filter(OrderColumn::OwnerId.eq(owner_id));
        }
        if let Some(status) = status {
            query = query.filter(OrderColumn::Status.eq(status));
        }

        let paginator = query.paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((orders.into_iter().map(Into::into).collect(), total))
    }

    /// Moves an order to `status`. Delivered and cancelled orders are final.
    #[instrument(skip(self), fields(order_id = %order_id, new_status = %status))]
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<OrderResponse, ServiceError> {
        let txn = self.db_pool.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for status update");
            ServiceError::DatabaseError(e)
        })?;

        let order = Order::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                warn!("Order not found for status update");
                ServiceError::NotFound(format!("Order {} not found", order_id))
            })?;

        let old_status = order.status;
        if old_status.is_terminal() {
            return Err(ServiceError::InvalidOperation(format!(
                "Order {} is already {} and cannot change status",
                order.order_number, old_status
            )));
        }

        let mut active: order::ActiveModel = order.into();
        active.status = Set(status);
        let updated = active.update(&txn).await?;

        txn.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit status update transaction");
            ServiceError::DatabaseError(e)
        })?;

        info!(old_status = %old_status, "Order status updated");
        Ok(updated.into())
    }

    pub async fn count_for_owner(
        &self,
        owner_id: Uuid,
        status: Option<OrderStatus>,
    ) -> Result<u64, ServiceError> {
        let mut query = Order::find().filter(OrderColumn::OwnerId.eq(owner_id));
        if let Some(status) = status {
            query = query.filter(OrderColumn::Status.eq(status));
        }
        Ok(query.count(&*self.db_pool).await?)
    }

    /// Orders that are neither delivered nor cancelled
    pub async fn count_active_for_owner(&self, owner_id: Uuid) -> Result<u64, ServiceError> {
        Ok(Order::find()
            .filter(OrderColumn::OwnerId.eq(owner_id))
            .filter(OrderColumn::Status.is_not_in(OrderStatus::terminal_statuses()))
            .count(&*self.db_pool)
            .await?)
    }
}

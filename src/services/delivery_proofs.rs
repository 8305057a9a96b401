use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    dto::{CreateDeliveryProofRequest, DeliveryProofResponse, SimplifiedDeliveryProofResponse},
    entities::{
        delivery_proof::{self, Column as ProofColumn, Entity as DeliveryProof},
        order::{self, Entity as Order, OrderStatus},
    },
    errors::ServiceError,
};

/// Evidence captured when an order is handed over
#[derive(Clone)]
pub struct DeliveryProofService {
    db_pool: Arc<DbPool>,
}

impl DeliveryProofService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    async fn find_order(&self, order_id: Uuid) -> Result<order::Model, ServiceError> {
        Order::find_by_id(order_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))
    }

    #[instrument(skip(self, request), fields(proof_type = %request.proof_type))]
    pub async fn capture(
        &self,
        order_id: Uuid,
        request: CreateDeliveryProofRequest,
    ) -> Result<DeliveryProofResponse, ServiceError> {
        request.validate()?;

        let order = self.find_order(order_id).await?;
        if order.status == OrderStatus::Cancelled {
            return Err(ServiceError::InvalidOperation(format!(
                "Order {} is cancelled",
                order.order_number
            )));
        }

        let now = Utc::now();
        let model = delivery_proof::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            proof_type: Set(request.proof_type),
            file_path: Set(request.file_path),
            recipient_name: Set(request.recipient_name),
            notes: Set(request.notes),
            captured_at: Set(request.captured_at.unwrap_or(now)),
            created_at: Set(now),
        }
        .insert(&*self.db_pool)
        .await?;

        info!(proof_id = %model.id, "Delivery proof captured");
        Ok(model.into())
    }

    /// Proofs for one order, newest capture first
    #[instrument(skip(self))]
    pub async fn list_for_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<SimplifiedDeliveryProofResponse>, ServiceError> {
        self.find_order(order_id).await?;

        let proofs = DeliveryProof::find()
            .filter(ProofColumn::OrderId.eq(order_id))
            .order_by_desc(ProofColumn::CapturedAt)
            .all(&*self.db_pool)
            .await?;

        Ok(proofs.into_iter().map(Into::into).collect())
    }

    /// Proofs attached to any order owned by `owner_id`
    pub async fn count_for_owner(&self, owner_id: Uuid) -> Result<u64, ServiceError> {
        Ok(DeliveryProof::find()
            .join(JoinType::InnerJoin, delivery_proof::Relation::Order.def())
            .filter(order::Column::OwnerId.eq(owner_id))
            .count(&*self.db_pool)
            .await?)
    }
}

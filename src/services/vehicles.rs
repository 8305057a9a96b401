use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    dto::{CreateVehicleRequest, VehicleResponse},
    entities::vehicle::{self, Column as VehicleColumn, Entity as Vehicle},
    errors::ServiceError,
};

/// Fleet records
#[derive(Clone)]
pub struct VehicleService {
    db_pool: Arc<DbPool>,
}

impl VehicleService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Registers a vehicle. The request is validated before the database is touched.
    #[instrument(skip(self, request), fields(owner_id = %request.owner_id))]
    pub async fn create_vehicle(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<VehicleResponse, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let plate = request.normalized_plate();
        let conflict_message = format!("Vehicle with license plate '{}' already exists", plate);

        let existing = Vehicle::find()
            .filter(VehicleColumn::LicensePlate.eq(plate.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            warn!(license_plate = %plate, "Rejected duplicate license plate");
            return Err(ServiceError::Conflict(conflict_message));
        }

        let model = vehicle::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(request.owner_id),
            license_plate: Set(plate),
            vehicle_type: Set(request.vehicle_type.trim().to_string()),
            capacity_kg: Set(request.capacity),
            volume_m3: Set(request.volume),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .map_err(|e| ServiceError::from_insert_error(e, conflict_message))?;

        info!(vehicle_id = %model.id, license_plate = %model.license_plate, "Vehicle registered");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    pub async fn get_vehicle(&self, id: Uuid) -> Result<VehicleResponse, ServiceError> {
        self.find_vehicle(id).await.map(VehicleResponse::from)
    }

    pub(crate) async fn find_vehicle(&self, id: Uuid) -> Result<vehicle::Model, ServiceError> {
        Vehicle::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Vehicle {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_vehicles(
        &self,
        owner_id: Option<Uuid>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<VehicleResponse>, u64), ServiceError> {
        let mut query = Vehicle::find().order_by_desc(VehicleColumn::CreatedAt);
        if let Some(owner_id) = owner_id {
            query = query.filter(VehicleColumn::OwnerId.eq(owner_id));
        }

        let paginator = query.paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let vehicles = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((vehicles.into_iter().map(Into::into).collect(), total))
    }

    pub async fn count_for_owner(&self, owner_id: Uuid) -> Result<u64, ServiceError> {
        Ok(Vehicle::find()
            .filter(VehicleColumn::OwnerId.eq(owner_id))
            .count(&*self.db_pool)
            .await?)
    }
}

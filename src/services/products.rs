use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    dto::{CreateProductRequest, ProductResponse},
    entities::{
        product::{self, Column as ProductColumn, Entity as Product},
        ProductStatus, ProductStatusConverter,
    },
    errors::ServiceError,
};

/// Service for managing catalog products
#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Create a new product; duplicate SKUs are rejected with `Conflict`
    #[instrument(skip(self, request), fields(sku = %request.sku))]
    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        request.validate()?;
        let db = &*self.db_pool;

        let existing = Product::find()
            .filter(ProductColumn::Sku.eq(request.sku.as_str()))
            .one(db)
            .await?;
        if existing.is_some() {
            warn!("Rejected duplicate SKU");
            return Err(ServiceError::Conflict(format!(
                "Product with SKU '{}' already exists",
                request.sku
            )));
        }

        let status = request.status.unwrap_or_default();
        let conflict_message = format!("Product with SKU '{}' already exists", request.sku);
        let model = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(request.owner_id),
            sku: Set(request.sku),
            name: Set(request.name),
            category: Set(request.category),
            status: Set(ProductStatusConverter::to_database_column(Some(status))),
            stock_quantity: Set(request.stock_quantity),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(|e| ServiceError::from_insert_error(e, conflict_message))?;

        info!(product_id = %model.id, status = %status, "Product created");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> Result<ProductResponse, ServiceError> {
        Product::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))
    }

    /// Returns one page of products and the total count
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        owner_id: Option<Uuid>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<ProductResponse>, u64), ServiceError> {
        let mut query = Product::find().order_by_desc(ProductColumn::CreatedAt);
        if let Some(owner_id) = owner_id {
            query = query.filter(ProductColumn::OwnerId.eq(owner_id));
        }

        let paginator = query.paginate(&*self.db_pool, limit);
        let total = paginator.num_items().await?;
        let products = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((products.into_iter().map(Into::into).collect(), total))
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ProductStatus,
    ) -> Result<ProductResponse, ServiceError> {
        let db = &*self.db_pool;
        let existing = Product::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

        let previous = existing.product_status();
        let mut active: product::ActiveModel = existing.into();
        active.status = Set(ProductStatusConverter::to_database_column(Some(status)));
        let updated = active.update(db).await?;

        info!(
            product_id = %id,
            from = ?previous,
            to = %status,
            "Product status changed"
        );
        Ok(updated.into())
    }

    pub async fn count_for_owner(&self, owner_id: Uuid) -> Result<u64, ServiceError> {
        Ok(Product::find()
            .filter(ProductColumn::OwnerId.eq(owner_id))
            .count(&*self.db_pool)
            .await?)
    }
}

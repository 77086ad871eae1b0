use crate::{
    db::DbPool,
    entities::product::{
        self, ActiveModel as ProductActiveModel, Entity as ProductEntity, Model as ProductModel,
    },
    entities::supplier::{
        self, ActiveModel as SupplierActiveModel, Entity as SupplierEntity,
        Model as SupplierModel,
    },
    errors::ServiceError,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateSupplierRequest {
    #[validate(length(min = 1, message = "Supplier name is required"))]
    pub name: String,
    pub contact_person: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub purchase_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub supplier_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub purchase_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub supplier_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

/// Suppliers and the product catalog.
#[derive(Clone)]
pub struct CatalogService {
    db_pool: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_supplier(
        &self,
        request: CreateSupplierRequest,
    ) -> Result<SupplierModel, ServiceError> {
        request.validate()?;

        let model = SupplierActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            contact_person: Set(request.contact_person),
            email: Set(request.email),
            phone: Set(request.phone),
            address: Set(request.address),
            website: Set(request.website),
            description: Set(request.description),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(supplier_id = %model.id, "supplier created");
        Ok(model)
    }

    #[instrument(skip(self), fields(supplier_id = %supplier_id))]
    pub async fn get_supplier(&self, supplier_id: Uuid) -> Result<SupplierModel, ServiceError> {
        SupplierEntity::find_by_id(supplier_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("supplier {} not found", supplier_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> Result<Vec<SupplierModel>, ServiceError> {
        Ok(SupplierEntity::find()
            .filter(supplier::Column::IsActive.eq(true))
            .order_by_asc(supplier::Column::Name)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self), fields(supplier_id = %supplier_id))]
    pub async fn deactivate_supplier(
        &self,
        supplier_id: Uuid,
    ) -> Result<SupplierModel, ServiceError> {
        let supplier = self.get_supplier(supplier_id).await?;
        let mut active: SupplierActiveModel = supplier.into();
        active.is_active = Set(false);
        Ok(active.update(&*self.db_pool).await?)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductModel, ServiceError> {
        request.validate()?;

        if let Some(supplier_id) = request.supplier_id {
            self.get_supplier(supplier_id).await?;
        }
        if let Some(sku) = &request.sku {
            let clash = ProductEntity::find()
                .filter(product::Column::Sku.eq(sku.clone()))
                .one(&*self.db_pool)
                .await?;
            if clash.is_some() {
                return Err(ServiceError::Conflict(format!("SKU {} is already in use", sku)));
            }
        }

        let model = ProductActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            sku: Set(request.sku),
            description: Set(request.description),
            purchase_price: Set(request.purchase_price),
            selling_price: Set(request.selling_price),
            supplier_id: Set(request.supplier_id),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await?;

        info!(product_id = %model.id, "product created");
        Ok(model)
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: Uuid) -> Result<ProductModel, ServiceError> {
        ProductEntity::find_by_id(product_id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {} not found", product_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        supplier_id: Option<Uuid>,
        include_inactive: bool,
    ) -> Result<Vec<ProductModel>, ServiceError> {
        let mut query = ProductEntity::find().order_by_asc(product::Column::Name);
        if let Some(supplier_id) = supplier_id {
            query = query.filter(product::Column::SupplierId.eq(supplier_id));
        }
        if !include_inactive {
            query = query.filter(product::Column::IsActive.eq(true));
        }
        Ok(query.all(&*self.db_pool).await?)
    }

    #[instrument(skip(self, request), fields(product_id = %product_id))]
    pub async fn update_product(
        &self,
        product_id: Uuid,
        request: UpdateProductRequest,
    ) -> Result<ProductModel, ServiceError> {
        let product = self.get_product(product_id).await?;

        if let Some(supplier_id) = request.supplier_id {
            self.get_supplier(supplier_id).await?;
        }

        let mut active: ProductActiveModel = product.into();
        if let Some(name) = request.name {
            if name.is_empty() {
                return Err(ServiceError::ValidationError("product name is required".into()));
            }
            active.name = Set(name);
        }
        if let Some(description) = request.description {
            active.description = Set(Some(description));
        }
        if let Some(purchase_price) = request.purchase_price {
            active.purchase_price = Set(Some(purchase_price));
        }
        if let Some(selling_price) = request.selling_price {
            active.selling_price = Set(Some(selling_price));
        }
        if let Some(supplier_id) = request.supplier_id {
            active.supplier_id = Set(Some(supplier_id));
        }
        if let Some(is_active) = request.is_active {
            active.is_active = Set(is_active);
        }

        Ok(active.update(&*self.db_pool).await?)
    }
}

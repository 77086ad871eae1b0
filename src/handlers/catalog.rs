use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::product::Model as ProductModel,
    entities::supplier::Model as SupplierModel,
    services::catalog::{CreateProductRequest, CreateSupplierRequest, UpdateProductRequest},
    ApiResponse, ApiResult, AppState,
};

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub supplier_id: Option<Uuid>,
    #[serde(default)]
    pub include_inactive: bool,
}

pub async fn create_supplier(
    State(state): State<AppState>,
    Json(request): Json<CreateSupplierRequest>,
) -> ApiResult<SupplierModel> {
    let supplier = state.services.catalog.create_supplier(request).await?;
    Ok(Json(ApiResponse::success(supplier)))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<SupplierModel> {
    let supplier = state.services.catalog.get_supplier(id).await?;
    Ok(Json(ApiResponse::success(supplier)))
}

pub async fn list_suppliers(State(state): State<AppState>) -> ApiResult<Vec<SupplierModel>> {
    let suppliers = state.services.catalog.list_suppliers().await?;
    Ok(Json(ApiResponse::success(suppliers)))
}

pub async fn deactivate_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<SupplierModel> {
    let supplier = state.services.catalog.deactivate_supplier(id).await?;
    Ok(Json(ApiResponse::message(supplier, "supplier deactivated")))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<ProductModel> {
    let product = state.services.catalog.create_product(request).await?;
    Ok(Json(ApiResponse::success(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ProductModel> {
    let product = state.services.catalog.get_product(id).await?;
    Ok(Json(ApiResponse::success(product)))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<Vec<ProductModel>> {
    let products = state
        .services
        .catalog
        .list_products(query.supplier_id, query.include_inactive)
        .await?;
    Ok(Json(ApiResponse::success(products)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProductRequest>,
) -> ApiResult<ProductModel> {
    let product = state.services.catalog.update_product(id, request).await?;
    Ok(Json(ApiResponse::success(product)))
}

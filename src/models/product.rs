// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,

    #[schema(example = "Chopp Pilsen")]
    pub name: String,

    #[schema(example = "20.00")]
    pub price_per_liter: Decimal,

    // Preço do barril fechado (venda para evento).
    #[schema(example = "500.00")]
    pub keg_price: Decimal,

    #[schema(example = "50.00")]
    pub keg_volume_liters: Decimal,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProductPayload {
    #[validate(length(min = 1, max = 120, message = "Nome deve ter entre 1 e 120 caracteres."))]
    #[schema(example = "Chopp Pilsen")]
    pub name: String,

    pub price_per_liter: Decimal,
    pub keg_price: Decimal,
    pub keg_volume_liters: Decimal,
}

// src/models/sale.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_kind", rename_all = "snake_case")] // Banco
#[serde(rename_all = "snake_case")] // JSON
pub enum SaleKind {
    Market,   // Venda de feira
    KegEvent, // Barril fechado para evento
    Invoice,  // Boleto: só custo, sem receita
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-07-01")]
    pub sale_date: NaiveDate,

    // Nome do dia em inglês (ex: "Tuesday"), derivado da data no registro.
    #[schema(example = "Tuesday")]
    pub weekday: String,

    pub kind: SaleKind,

    #[schema(example = "150.00")]
    pub total: Option<Decimal>,

    // Quebra por canal de pagamento. Informativa: nunca entra nos totais.
    pub card: Option<Decimal>,
    pub cash: Option<Decimal>,
    pub pix: Option<Decimal>,

    pub labor_cost: Option<Decimal>,
    pub cups_cost: Option<Decimal>,
    pub invoice_cost: Option<Decimal>,

    // Calculado no registro: receita menos custos, ou custo negativo do boleto.
    #[schema(example = "125.00")]
    pub profit: Option<Decimal>,

    pub product_id: Option<Uuid>,

    pub notes: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSalePayload {
    #[schema(value_type = String, format = Date, example = "2025-07-01")]
    pub sale_date: NaiveDate,

    pub kind: SaleKind,

    #[schema(example = "150.00")]
    pub total: Option<Decimal>,

    pub card: Option<Decimal>,
    pub cash: Option<Decimal>,
    pub pix: Option<Decimal>,

    pub labor_cost: Option<Decimal>,
    pub cups_cost: Option<Decimal>,
    pub invoice_cost: Option<Decimal>,

    pub product_id: Option<Uuid>,

    #[validate(length(max = 500, message = "Observações devem ter no máximo 500 caracteres."))]
    pub notes: Option<String>,
}

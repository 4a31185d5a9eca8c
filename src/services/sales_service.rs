// src/services/sales_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{ProductRepository, SalesRepository},
    models::sale::{NewSalePayload, Sale, SaleKind},
};

#[derive(Clone)]
pub struct SalesService {
    sales: SalesRepository,
    products: ProductRepository,
}

impl SalesService {
    pub fn new(sales: SalesRepository, products: ProductRepository) -> Self {
        Self { sales, products }
    }

    /// Registra uma venda aplicando as regras do domínio: o rótulo do dia da
    /// semana sai da data e o lucro é calculado conforme o tipo.
    pub async fn register_sale(&self, payload: NewSalePayload) -> Result<Sale, AppError> {
        let profit = computed_profit(&payload)?;

        // Produto informado precisa existir.
        if let Some(product_id) = payload.product_id {
            self.products
                .find_by_id(product_id)
                .await?
                .ok_or(AppError::ProductNotFound)?;
        }

        let weekday = weekday_label(payload.sale_date);
        self.sales.create(&payload, &weekday, profit).await
    }
}

// Nome do dia em inglês, como as planilhas sempre gravaram.
fn weekday_label(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

// Boleto é custo puro; venda de feira ou de barril rende total menos custos.
fn computed_profit(payload: &NewSalePayload) -> Result<Decimal, AppError> {
    match payload.kind {
        SaleKind::Invoice => {
            let cost = payload.invoice_cost.ok_or_else(|| {
                AppError::InvalidSale("Boleto precisa do custo informado.".to_string())
            })?;
            Ok(-cost)
        }
        SaleKind::Market | SaleKind::KegEvent => {
            let total = payload.total.ok_or_else(|| {
                AppError::InvalidSale("Venda precisa do total informado.".to_string())
            })?;
            Ok(total
                - payload.labor_cost.unwrap_or(Decimal::ZERO)
                - payload.cups_cost.unwrap_or(Decimal::ZERO))
        }
    }
}

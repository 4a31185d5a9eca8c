// src/services/reporting.rs

//! Motor de agregação dos relatórios.
//!
//! Funções puras sobre vendas já carregadas do banco. Tanto os handlers HTTP
//! quanto o interpretador de comandos do WhatsApp passam por aqui, então os
//! dois canais sempre devolvem os mesmos números para o mesmo período.

use std::collections::{HashMap, HashSet};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    product::Product,
    report::{DayRevenue, GeneralReport, ProductProfit},
    sale::{Sale, SaleKind},
};

// Valores monetários saem sempre com 2 casas, meio-termo longe do zero.
fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Resumo financeiro de uma lista de vendas. `None` quando a lista é vazia.
///
/// Boletos não têm receita: ficam fora da receita bruta, da média e da
/// contagem de dias, mas o custo deles entra no gasto total.
pub fn general_report(sales: &[Sale]) -> Option<GeneralReport> {
    if sales.is_empty() {
        return None;
    }

    let mut gross_revenue = Decimal::ZERO;
    let mut labor_cost = Decimal::ZERO;
    let mut cups_cost = Decimal::ZERO;
    let mut invoice_cost = Decimal::ZERO;
    let mut revenue_entries = 0u32;
    let mut distinct_days: HashSet<chrono::NaiveDate> = HashSet::new();

    for sale in sales {
        labor_cost += sale.labor_cost.unwrap_or(Decimal::ZERO);
        cups_cost += sale.cups_cost.unwrap_or(Decimal::ZERO);
        invoice_cost += sale.invoice_cost.unwrap_or(Decimal::ZERO);

        if sale.kind != SaleKind::Invoice {
            gross_revenue += sale.total.unwrap_or(Decimal::ZERO);
            revenue_entries += 1;
            distinct_days.insert(sale.sale_date);
        }
    }

    let total_cost = labor_cost + cups_cost + invoice_cost;
    let average_sale = if revenue_entries > 0 {
        gross_revenue / Decimal::from(revenue_entries)
    } else {
        Decimal::ZERO
    };

    Some(GeneralReport {
        gross_revenue: round_currency(gross_revenue),
        net_revenue: round_currency(gross_revenue - total_cost),
        average_sale: round_currency(average_sale),
        labor_cost: round_currency(labor_cost),
        cups_cost: round_currency(cups_cost),
        invoice_cost: round_currency(invoice_cost),
        total_cost: round_currency(total_cost),
        days_recorded: distinct_days.len() as u32,
    })
}

/// Faturamento somado por dia da semana, do maior para o menor.
///
/// Ranking por faturamento, não por lucro: nenhum tipo de venda é filtrado
/// aqui — boletos entram com o total que tiverem (normalmente zero). Empates
/// preservam a ordem de chegada.
pub fn day_ranking(sales: &[Sale]) -> Option<Vec<DayRevenue>> {
    if sales.is_empty() {
        return None;
    }

    let mut encounter_order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, Decimal> = HashMap::new();

    for sale in sales {
        let Some(total) = sale.total else { continue };
        if sale.weekday.is_empty() {
            continue;
        }
        if !totals.contains_key(sale.weekday.as_str()) {
            encounter_order.push(sale.weekday.as_str());
        }
        *totals.entry(sale.weekday.as_str()).or_insert(Decimal::ZERO) += total;
    }

    let mut ranking: Vec<DayRevenue> = encounter_order
        .into_iter()
        .map(|weekday| DayRevenue {
            weekday: weekday.to_string(),
            revenue: round_currency(totals[weekday]),
        })
        .collect();

    // sort_by é estável: empates ficam na ordem em que os dias apareceram.
    ranking.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    Some(ranking)
}

/// Lucro somado por produto, do maior para o menor.
///
/// Fora do ranking: boletos, vendas sem lucro calculado e vendas sem produto
/// resolvível na lista recebida.
pub fn product_profit_ranking(sales: &[Sale], products: &[Product]) -> Option<Vec<ProductProfit>> {
    if sales.is_empty() {
        return None;
    }

    let names: HashMap<uuid::Uuid, &str> = products
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();

    let mut encounter_order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, Decimal> = HashMap::new();

    for sale in sales {
        if sale.kind == SaleKind::Invoice {
            continue;
        }
        let (Some(product_id), Some(profit)) = (sale.product_id, sale.profit) else {
            continue;
        };
        let Some(&name) = names.get(&product_id) else {
            continue;
        };
        if !totals.contains_key(name) {
            encounter_order.push(name);
        }
        *totals.entry(name).or_insert(Decimal::ZERO) += profit;
    }

    let mut ranking: Vec<ProductProfit> = encounter_order
        .into_iter()
        .map(|name| ProductProfit {
            product_name: name.to_string(),
            profit: round_currency(totals[name]),
        })
        .collect();

    ranking.sort_by(|a, b| b.profit.cmp(&a.profit));
    Some(ranking)
}

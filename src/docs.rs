// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Relatórios ---
        handlers::reports::monthly_report,
        handlers::reports::annual_report,
        handlers::reports::best_days,
        handlers::reports::product_profit,

        // --- Vendas ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,

        // --- Produtos ---
        handlers::products::create_product,
        handlers::products::list_products,

        // --- WhatsApp ---
        handlers::whatsapp::inbound_message,
    ),
    components(
        schemas(
            models::sale::Sale,
            models::sale::SaleKind,
            models::sale::NewSalePayload,
            models::product::Product,
            models::product::NewProductPayload,
            models::report::GeneralReport,
            models::report::DayRevenue,
            models::report::ProductProfit,
            handlers::reports::PeriodReportResponse,
            handlers::whatsapp::InboundMessage,
        )
    ),
    tags(
        (name = "Relatórios", description = "Relatórios financeiros e rankings"),
        (name = "Vendas", description = "Registro e consulta de vendas"),
        (name = "Produtos", description = "Catálogo de chopps"),
        (name = "WhatsApp", description = "Webhook de comandos via chat")
    )
)]
pub struct ApiDoc;

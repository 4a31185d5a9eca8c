//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let report_routes = Router::new()
        .route("/monthly", get(handlers::reports::monthly_report))
        .route("/annual", get(handlers::reports::annual_report))
        .route("/best-days", get(handlers::reports::best_days))
        .route("/product-profit", get(handlers::reports::product_profit));

    let sales_routes = Router::new().route(
        "/",
        post(handlers::sales::create_sale).get(handlers::sales::list_sales),
    );

    let product_routes = Router::new().route(
        "/",
        post(handlers::products::create_product).get(handlers::products::list_products),
    );

    let whatsapp_routes =
        Router::new().route("/webhook", post(handlers::whatsapp::inbound_message));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/reports", report_routes)
        .nest("/api/sales", sales_routes)
        .nest("/api/products", product_routes)
        .nest("/whatsapp", whatsapp_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

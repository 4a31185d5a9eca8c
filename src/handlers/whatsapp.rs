// src/handlers/whatsapp.rs

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Form,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::config::AppState;

// O gateway manda um form urlencoded com vários campos; só o texto interessa.
#[derive(Debug, Deserialize, ToSchema)]
pub struct InboundMessage {
    #[serde(rename = "Body")]
    pub body: String,
}

// POST /whatsapp/webhook
#[utoipa::path(
    post,
    path = "/whatsapp/webhook",
    tag = "WhatsApp",
    request_body(content = InboundMessage, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "TwiML com a mensagem de resposta", body = String, content_type = "application/xml")
    )
)]
pub async fn inbound_message(
    State(app_state): State<AppState>,
    Form(payload): Form<InboundMessage>,
) -> impl IntoResponse {
    let reply = app_state.chat_service.interpret(&payload.body).await;

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        twiml_message(&reply),
    )
}

// TwiML mínimo: uma única <Message> por resposta.
fn twiml_message(text: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        xml_escape(text)
    )
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twiml_embrulha_a_mensagem() {
        let xml = twiml_message("Relatório 2025-07");
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>Relatório 2025-07</Message></Response>"
        );
    }

    #[test]
    fn twiml_escapa_caracteres_reservados() {
        let xml = twiml_message("Use: relatorio <mês> <ano> & ajuda");
        assert!(xml.contains("relatorio &lt;mês&gt; &lt;ano&gt; &amp; ajuda"), "{xml}");
    }
}

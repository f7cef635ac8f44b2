//! E-mail de notificações via SMTP
//!
//! Os envios saem em segundo plano e nunca seguram a resposta HTTP.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::EmailConfig;
use crate::errors::{NpjError, Result};

struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

pub struct Mailer {
    smtp: Option<SmtpMailer>,
    system_name: String,
}

impl Mailer {
    pub fn new(config: &EmailConfig, system_name: &str) -> Result<Self> {
        if !config.enabled {
            info!("Email delivery disabled");
            return Ok(Self::disabled(system_name));
        }

        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_address)
            .parse()
            .map_err(|e| NpjError::email(format!("Remetente inválido: {e}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| NpjError::email(format!("Servidor SMTP inválido: {e}")))?
            .port(config.smtp_port);
        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        info!("Email delivery through {}:{}", config.smtp_host, config.smtp_port);
        Ok(Self {
            smtp: Some(SmtpMailer {
                transport: builder.build(),
                from,
            }),
            system_name: system_name.to_string(),
        })
    }

    pub fn disabled(system_name: &str) -> Self {
        Self {
            smtp: None,
            system_name: system_name.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.smtp.is_some()
    }

    pub async fn send(&self, to: &str, subject: &str, body: String) -> Result<()> {
        let Some(ref smtp) = self.smtp else {
            debug!("Email disabled, skipping message to {}", to);
            return Ok(());
        };

        let to: Mailbox = to
            .parse()
            .map_err(|e| NpjError::email(format!("Destinatário inválido '{to}': {e}")))?;

        let message = Message::builder()
            .from(smtp.from.clone())
            .to(to)
            .subject(format!("[{}] {}", self.system_name, subject))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| NpjError::email(format!("Falha ao montar mensagem: {e}")))?;

        smtp.transport
            .send(message)
            .await
            .map_err(|e| NpjError::email(format!("Falha no envio SMTP: {e}")))?;

        Ok(())
    }

    /// Dispara o envio sem aguardar; erros só vão para o log
    pub fn send_in_background(self: &Arc<Self>, to: String, title: String, content: Option<String>) {
        if !self.is_enabled() {
            return;
        }
        let mailer = Arc::clone(self);
        tokio::spawn(async move {
            let body = render_notification(&mailer.system_name, &title, content.as_deref());
            match mailer.send(&to, &title, body).await {
                Ok(()) => debug!("Notification email sent to {}", to),
                Err(e) => warn!("Notification email to {} failed: {}", to, e),
            }
        });
    }
}

/// Corpo em texto puro da notificação
pub fn render_notification(system_name: &str, title: &str, content: Option<&str>) -> String {
    let mut body = format!("{title}\n\n");
    if let Some(content) = content.filter(|c| !c.trim().is_empty()) {
        body.push_str(content.trim());
        body.push_str("\n\n");
    }
    body.push_str(&format!(
        "Acesse o sistema {system_name} para mais detalhes.\n\nEsta é uma mensagem automática, não responda."
    ));
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_notification() {
        let body = render_notification("NPJ", "Novo andamento", Some("Petição protocolada"));
        assert!(body.starts_with("Novo andamento\n\n"));
        assert!(body.contains("Petição protocolada"));
        assert!(body.contains("sistema NPJ"));

        let without_content = render_notification("NPJ", "Aviso", Some("  "));
        assert!(!without_content.contains("\n\n\n"));
    }

    #[tokio::test]
    async fn test_disabled_mailer_skips() {
        let mailer = Mailer::disabled("NPJ");
        assert!(!mailer.is_enabled());
        assert!(mailer.send("x@npj.local", "t", String::new()).await.is_ok());
    }
}

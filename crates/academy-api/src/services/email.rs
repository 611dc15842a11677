//! Email service for inquiry notifications via SMTP.
//!
//! Sending is best-effort: delivery failures are logged and never fail the
//! request that triggered them.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

use academy_core::models::Inquiry;
use academy_core::Config;

/// Email service for inquiry notifications.
/// No-op if notifications are disabled or SMTP is not configured.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    academy_name: String,
    inquiry_inbox: Option<String>,
}

impl EmailService {
    /// Create email service from config. Returns `None` if disabled or SMTP not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.email_notifications_enabled() {
            tracing::debug!("Email notifications disabled (EMAIL_NOTIFICATIONS_ENABLED=false)");
            return None;
        }
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let port = config.smtp_port().unwrap_or(587);

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(
                host = %host,
                port = port,
                "Email service initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
            academy_name: config.academy_name().to_string(),
            inquiry_inbox: config.inquiry_inbox().map(String::from),
        })
    }

    /// Send a plain-text email to the given recipient.
    pub async fn send(&self, to: &str, subject: &str, body_plain: &str) -> Result<(), String> {
        let to_addr: Mailbox = to
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| format!("Invalid SMTP_FROM: {}", e))?;

        let email = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body_plain.to_string())
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Fire the confirmation email to the inquirer and the notification to the
    /// staff inbox. Spawned so the submitting request never waits on SMTP.
    pub fn notify_inquiry_submitted(&self, inquiry: &Inquiry) {
        let service = self.clone();
        let inquiry = inquiry.clone();
        tokio::spawn(async move {
            let subject = format!("{}: we received your inquiry", service.academy_name);
            let body = format!(
                "Hi {},\n\nThank you for your interest in {}. We received your inquiry \
                 about the {} course ({:?} classes) and will get back to you soon.\n",
                inquiry.full_name, service.academy_name, inquiry.course, inquiry.class_mode
            );
            if let Err(e) = service.send(&inquiry.email, &subject, &body).await {
                tracing::warn!(
                    error = %e,
                    inquiry_id = %inquiry.id,
                    "Failed to send inquiry confirmation email"
                );
            }

            if let Some(inbox) = &service.inquiry_inbox {
                let subject = format!("New inquiry from {}", inquiry.full_name);
                let body = format!(
                    "Name: {}\nEmail: {}\nPhone: {}\nCourse: {}\nClass mode: {:?}\nMessage: {}\n",
                    inquiry.full_name,
                    inquiry.email,
                    inquiry.phone,
                    inquiry.course,
                    inquiry.class_mode,
                    inquiry.message.as_deref().unwrap_or("-")
                );
                if let Err(e) = service.send(inbox, &subject, &body).await {
                    tracing::warn!(
                        error = %e,
                        inquiry_id = %inquiry.id,
                        "Failed to send inquiry notification email"
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::config::{AcademyConfig, BaseConfig};
    use academy_core::StorageBackend;

    fn config(enabled: bool, smtp_host: Option<&str>, smtp_from: Option<&str>) -> Config {
        Config(Box::new(AcademyConfig {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec!["http://localhost:3000".to_string()],
                db_max_connections: 5,
                db_timeout_seconds: 30,
                admin_api_key: "a".repeat(32),
                environment: "development".to_string(),
            },
            database_url: "postgres://localhost/academy".to_string(),
            storage_backend: Some(StorageBackend::Local),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: Some("/tmp/academy-media".to_string()),
            local_storage_base_url: Some("http://localhost:4000/media".to_string()),
            max_photo_size_bytes: 10 * 1024 * 1024,
            photo_allowed_extensions: vec!["jpg".to_string()],
            photo_allowed_content_types: vec!["image/jpeg".to_string()],
            max_video_size_bytes: 200 * 1024 * 1024,
            video_allowed_extensions: vec!["mp4".to_string()],
            video_allowed_content_types: vec!["video/mp4".to_string()],
            email_notifications_enabled: enabled,
            smtp_host: smtp_host.map(String::from),
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            smtp_from: smtp_from.map(String::from),
            smtp_tls: false,
            inquiry_inbox: None,
            academy_name: "Dance Academy".to_string(),
        }))
    }

    #[test]
    fn disabled_config_yields_no_service() {
        assert!(EmailService::from_config(&config(false, None, None)).is_none());
    }

    #[test]
    fn enabled_without_smtp_host_yields_no_service() {
        assert!(EmailService::from_config(&config(true, None, Some("from@example.com"))).is_none());
    }

    #[test]
    fn enabled_with_smtp_yields_service() {
        let service =
            EmailService::from_config(&config(true, Some("localhost"), Some("from@example.com")));
        assert!(service.is_some());
    }
}

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::Deserialize;
use tracing::debug;

use crate::error::MailError;
use crate::Mailer;

/// SMTP transport configuration, deserialized from the server's
/// `[smtp]` config section.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Sender address on every outgoing message.
    #[serde(default = "default_from")]
    pub from: String,
}

fn default_smtp_port() -> u16 {
    25
}

fn default_from() -> String {
    "from@example.com".into()
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 25,
            username: None,
            password: None,
            from: default_from(),
        }
    }
}

/// SmtpMailer sends mail through a plaintext SMTP relay using lettre's
/// blocking transport. TLS is expected to be handled by the relay;
/// credentials are attached only when both username and password are set.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| MailError::Address(format!("{}: {e}", config.from)))?;

        let mut builder =
            SmtpTransport::builder_dangerous(config.host.as_str()).port(config.port);
        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| MailError::Address(format!("{to}: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to.clone())
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| MailError::Message(e.to_string()))?;

        debug!(%to, subject, "sending mail via smtp");
        self.transport
            .send(&message)
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

pub mod error;
pub mod smtp;

pub use error::MailError;
pub use smtp::{SmtpConfig, SmtpMailer};

/// Mailer provides synchronous delivery of a subject/body/recipient triple.
///
/// The notification dispatcher holds an `Arc<dyn Mailer>` so tests can
/// swap in a recording fake. A send either succeeds or returns an error;
/// there is no retry or queueing at this layer.
pub trait Mailer: Send + Sync {
    /// Send one message. Blocks until the transport accepts or rejects it.
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

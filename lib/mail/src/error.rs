use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(String),

    #[error("message build error: {0}")]
    Message(String),

    #[error("transport error: {0}")]
    Transport(String),
}

pub mod user;
pub mod repository;
pub mod payment;
pub mod checkout;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Could not issue a unique booking reference after {attempts} attempts")]
    ReferenceExhausted { attempts: u32 },
    /// The processor could not be reached or rejected the request itself.
    #[error("Payment gateway error: {0}")]
    PaymentGateway(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

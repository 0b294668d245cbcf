use dwrs_core::CoreError;
use dwrs_entity::EntityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("ship id space exhausted")]
    ShipIdsExhausted,

    /// A transition was refused; the policy or the loop broke a protocol.
    #[error("invariant violated: {0}")]
    Invariant(#[from] EntityError),
}

pub type SimResult<T> = Result<T, SimError>;

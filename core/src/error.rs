use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid slot index")]
    InvalidSlot,
    #[error("Value width does not match the configured digit width")]
    WidthMismatch,
    #[error("Sequence length does not match the configured count")]
    LengthMismatch,
    #[error("Inputs are only accepted during the recall phase")]
    NotAcceptingInput,
    #[error("Round already ended, no new input is accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

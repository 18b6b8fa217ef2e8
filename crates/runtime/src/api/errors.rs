//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule rejections, worker coordination failures and provider errors so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use skirmish_core::{ExecuteError, TurnError, UnitId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player action provider not set")]
    ProviderNotSet,

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("action rejected: {0}")]
    Rejected(#[from] ExecuteError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("runtime requires an initial game state before building")]
    MissingState,

    #[error("no scripted action left for unit {unit}")]
    ScriptExhausted { unit: UnitId },

    #[error("match still undecided after {rounds} rounds")]
    RoundLimit { rounds: u32 },
}

impl RuntimeError {
    /// Rule rejections are part of normal play; everything else is plumbing.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

//! Async orchestration for the skirmish simulation.
//!
//! A single simulation worker owns the authoritative [`GameState`] and applies
//! commands sent through a cloneable [`RuntimeHandle`]. [`Runtime`] drives the
//! match: it asks an [`ActionProvider`] for player actions, hands enemy turns
//! to the built-in AI, and stops when one side is wiped out.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] bundles the read-only collaborators the rules consult
//!
//! [`GameState`]: skirmish_core::GameState
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, AutoPlayerProvider, Progress, Result, RuntimeError, RuntimeHandle,
    ScriptedActionProvider, WaitActionProvider,
};
pub use events::{Event, EventBus, GameStateEvent, Topic, TurnEvent};
pub use oracle::OracleBundle;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};

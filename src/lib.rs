//! Оркестратор пошаговой покерной сессии (no-limit холдем).
//!
//! Регистрирует агентов, проигрывает скрипт раздачи (буквально или с
//! импровизацией) и принимает ходы агентов с проверкой очереди и
//! допустимости через движок правил.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod orchestrator;

pub use api::{ApiError, Command, CommandResponse, PokerTable, Query, QueryResponse};
pub use domain::{Card, Chips, GameParams, PlayerNumber, PlayerStatus, Street};
pub use engine::{ActionKind, HoldemEngine, HoldemFactory, RandomSource, RulesEngine, RulesEngineFactory};
pub use infra::{DeterministicRng, RngSeed, SystemRng};
pub use orchestrator::{
    ActionRequest, AdvanceOutcome, AgentId, Script, Session, SessionConfig, SessionError, SessionPhase, Snapshot,
    StallPolicy,
};

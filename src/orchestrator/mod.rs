//! Оркестратор сессии поверх движка правил.
//!
//! - `registry` – регистрация агентов и лимит мест;
//! - `script` / `interpreter` – разбор и проигрывание скрипта раздачи;
//! - `session` – конечный автомат сессии и публичный API действий;
//! - `snapshot` – публикуемый снимок состояния.

pub mod action_log;
pub mod config;
pub mod errors;
pub mod interpreter;
pub mod registry;
pub mod script;
pub mod session;
pub mod snapshot;

pub use action_log::{ActionLog, ActionOrigin, LogEntry, LogEntryKind};
pub use config::{ConfigError, SessionConfig, StallPolicy};
pub use errors::{ErrorClass, ScriptError, SessionError};
pub use interpreter::{Interpreter, InterpreterYield, ScriptCursor};
pub use registry::{AgentId, AgentRegistry};
pub use script::{DealTarget, Script, ScriptHeader, ScriptedAction, Step};
pub use session::{ActionRequest, AdvanceOutcome, Session, SessionPhase};
pub use snapshot::{PlayerView, PotView, Snapshot};

use serde::{Deserialize, Serialize};

use crate::orchestrator::Snapshot;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Текущий снимок сессии.
    GetState,

    /// Закончена ли раздача (по сигналу движка).
    IsTerminal,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    State(Snapshot),
    Terminal(bool),
}

use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, PlayerNumber, Street};
use crate::engine::ActionKind;
use crate::orchestrator::registry::AgentId;
use crate::orchestrator::script::DealTarget;

/// Кто решил, какое действие применить.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionOrigin {
    Agent(AgentId),
    /// Буквальный шаг скрипта.
    Script,
    /// Случайный выбор вместо шага скрипта.
    Improvised,
}

/// Тип записи в журнале.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogEntryKind {
    /// Розданы карты (карманные или борд).
    Dealt { target: DealTarget, cards: Vec<Card> },

    /// Применено действие.
    Acted {
        player: PlayerNumber,
        kind: ActionKind,
        amount: Option<Chips>,
        origin: ActionOrigin,
    },

    /// Импровизация выпала на pass – ничего не применено.
    Passed { player: Option<PlayerNumber> },
}

/// Запись журнала с порядковым номером и улицей, на которой она сделана.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub index: u32,
    pub street: Street,
    pub kind: LogEntryKind,
}

/// Журнал раздачи в порядке применения.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionLog {
    pub entries: Vec<LogEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, street: Street, kind: LogEntryKind) {
        let index = self.entries.len() as u32;
        self.entries.push(LogEntry { index, street, kind });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Только применённые действия, без раздач и пасов.
    pub fn actions(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.kind, LogEntryKind::Acted { .. }))
    }
}

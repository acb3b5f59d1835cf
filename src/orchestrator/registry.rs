use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::SeatIndex;
use crate::orchestrator::errors::SessionError;

/// Идентификатор агента: 1, 2, 3, ... Внутри одного реестра не переиспользуется.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AgentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(AgentId)
            .map_err(|_| format!("идентификатор агента должен быть числом, получено {s:?}"))
    }
}

/// Реестр агентов.
///
/// Слот регистрации k (в порядке регистрации) управляет местом k.
/// Размер таблицы никогда не превышает требование скрипта.
#[derive(Clone, Debug, Default)]
pub struct AgentRegistry {
    required: usize,
    slots: Vec<AgentId>,
    /// Сколько идентификаторов выдано за всё время (и после clear тоже).
    issued: u32,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Новое требование от загруженного скрипта. Таблица очищается.
    pub fn set_requirement(&mut self, required: usize) {
        self.required = required;
        self.clear();
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn registered(&self) -> usize {
        self.slots.len()
    }

    pub fn agents(&self) -> &[AgentId] {
        &self.slots
    }

    pub fn is_complete(&self) -> bool {
        self.slots.len() == self.required
    }

    pub fn register(&mut self) -> Result<AgentId, SessionError> {
        if self.slots.len() >= self.required {
            return Err(SessionError::CapacityExceeded {
                required: self.required,
            });
        }
        self.issued += 1;
        let id = AgentId(self.issued);
        self.slots.push(id);
        tracing::info!(agent = %id, slot = self.slots.len() - 1, "агент зарегистрирован");
        Ok(id)
    }

    /// Сбросить регистрацию. Выданные идентификаторы остаются "протухшими".
    pub fn clear(&mut self) {
        if !self.slots.is_empty() {
            tracing::info!(dropped = self.slots.len(), "регистрация агентов сброшена");
        }
        self.slots.clear();
    }

    pub fn is_registered(&self, id: AgentId) -> bool {
        self.slots.contains(&id)
    }

    /// Идентификатор выдавался раньше, но его регистрация сброшена.
    pub fn is_stale(&self, id: AgentId) -> bool {
        id.0 >= 1 && id.0 <= self.issued && !self.is_registered(id)
    }

    pub fn seat_of(&self, id: AgentId) -> Option<SeatIndex> {
        self.slots.iter().position(|a| *a == id)
    }

    pub fn agent_for_seat(&self, seat: SeatIndex) -> Option<AgentId> {
        self.slots.get(seat).copied()
    }

    pub fn ensure_complete(&self) -> Result<(), SessionError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(SessionError::InsufficientAgents {
                registered: self.slots.len(),
                required: self.required,
            })
        }
    }
}

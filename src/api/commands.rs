use serde::{Deserialize, Serialize};

use crate::orchestrator::{AdvanceOutcome, AgentId, Snapshot};

/// Команда верхнего уровня: всё, что меняет состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Занять следующий слот агента.
    RegisterAgent,

    /// Сбросить регистрацию агентов.
    ClearAgents,

    /// Загрузить скрипт раздачи и создать новую сессию.
    LoadSpecificGame(LoadGameCommand),

    /// Ход агента.
    MakeMove(MakeMoveCommand),

    /// Прогнать скрипт до хода агента или конца раздачи.
    AdvanceScript,
}

/// Загрузка игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadGameCommand {
    /// Текст скрипта: заголовок и шаги, по одному на строку.
    pub script: String,
    /// Стартовые стеки по местам. Их число задаёт число игроков.
    pub stacks: Vec<u64>,
    pub agent_count: usize,
}

/// Ход агента в том виде, как он приходит снаружи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MakeMoveCommand {
    /// Десятичный идентификатор, выданный при регистрации.
    pub identifier: String,
    /// fold / check / call / check_or_call / raise, регистр не важен.
    pub action: String,
    /// Сумма "рейза до", только для raise.
    pub amount: Option<u64>,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    AgentRegistered(AgentId),
    /// Успешный результат без доп.данных.
    Ok,
    GameLoaded(Snapshot),
    State(Snapshot),
    Advanced(AdvanceOutcome),
}

use crate::domain::{Chips, PlayerNumber};
use crate::engine::{ActionKind, RulesError};
use crate::orchestrator::registry::AgentId;

use thiserror::Error;

/// Ошибки целостности скрипта. Все фатальны для текущей сессии.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("строка {line} скрипта некорректна ({reason}): {content:?}")]
    InvalidScriptLine {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("скрипт закончился на шаге {cursor}, а раздача ещё не завершена")]
    ScriptExhausted { cursor: usize },

    #[error("шаг {cursor} – ход агента, но ход за игроком {player:?}, за которым нет агента")]
    AgentTurnUnassigned {
        cursor: usize,
        player: Option<PlayerNumber>,
    },

    #[error("шаг {cursor} не согласуется с игрой: {source}")]
    StepRejected {
        cursor: usize,
        #[source]
        source: RulesError,
    },
}

/// Класс ошибки – как с ней должен обходиться вызывающий.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Регистрация агентов: поправить регистрацию и повторить.
    Capacity,
    /// Конкретный запрос отклонён, состояние не изменилось.
    TurnOrLegality,
    /// Скрипт битый или неполный – сессия прервана.
    ScriptIntegrity,
    /// Сессия уже завершена – только новая игра.
    Terminal,
    /// Игру нельзя создать с такими параметрами.
    Setup,
    /// Нарушен контракт движка правил – сессия прервана.
    Internal,
}

/// Ошибки оркестратора сессии.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("все {required} мест(а) для агентов уже заняты")]
    CapacityExceeded { required: usize },

    #[error("зарегистрировано агентов: {registered}, а скрипт требует {required}")]
    InsufficientAgents { registered: usize, required: usize },

    #[error("агент {0} неизвестен (регистрация была сброшена)")]
    UnknownAgent(AgentId),

    #[error("сейчас не ход агента {0}")]
    OutOfTurn(AgentId),

    #[error("действие {0} сейчас недопустимо")]
    IllegalAction(ActionKind),

    #[error("для рейза нужна сумма")]
    MissingAmount,

    #[error("для действия {0} сумма не указывается")]
    UnexpectedAmount(ActionKind),

    #[error("рейз до {amount} вне диапазона [{min}, {max}]")]
    AmountOutOfRange { amount: Chips, min: Chips, max: Chips },

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("раздача завершена, действия больше не принимаются")]
    SessionTerminal,

    #[error("сессия прервана после фатальной ошибки, загрузите игру заново")]
    SessionAborted,

    #[error("некорректная настройка игры: {0}")]
    InvalidSetup(String),

    #[error("нарушено сохранение фишек: было {expected}, стало {actual}")]
    ChipConservation { expected: Chips, actual: Chips },

    #[error("движок правил отклонил проверенное действие: {0}")]
    Rules(#[from] RulesError),
}

impl SessionError {
    pub fn class(&self) -> ErrorClass {
        match self {
            SessionError::CapacityExceeded { .. } | SessionError::InsufficientAgents { .. } => ErrorClass::Capacity,
            SessionError::UnknownAgent(_)
            | SessionError::OutOfTurn(_)
            | SessionError::IllegalAction(_)
            | SessionError::MissingAmount
            | SessionError::UnexpectedAmount(_)
            | SessionError::AmountOutOfRange { .. } => ErrorClass::TurnOrLegality,
            SessionError::Script(_) => ErrorClass::ScriptIntegrity,
            SessionError::SessionTerminal | SessionError::SessionAborted => ErrorClass::Terminal,
            SessionError::InvalidSetup(_) => ErrorClass::Setup,
            SessionError::ChipConservation { .. } | SessionError::Rules(_) => ErrorClass::Internal,
        }
    }

    /// Фатальная ошибка прерывает сессию.
    pub fn is_fatal(&self) -> bool {
        matches!(self.class(), ErrorClass::ScriptIntegrity | ErrorClass::Internal)
    }

    /// Стабильный машинный код причины (для API).
    pub fn reason_code(&self) -> &'static str {
        match self {
            SessionError::CapacityExceeded { .. } => "capacity_exceeded",
            SessionError::InsufficientAgents { .. } => "insufficient_agents",
            SessionError::UnknownAgent(_) => "unknown_agent",
            SessionError::OutOfTurn(_) => "out_of_turn",
            SessionError::IllegalAction(_) => "illegal_action",
            SessionError::MissingAmount => "missing_amount",
            SessionError::UnexpectedAmount(_) => "unexpected_amount",
            SessionError::AmountOutOfRange { .. } => "amount_out_of_range",
            SessionError::Script(ScriptError::InvalidScriptLine { .. }) => "invalid_script_line",
            SessionError::Script(ScriptError::ScriptExhausted { .. }) => "script_exhausted",
            SessionError::Script(ScriptError::AgentTurnUnassigned { .. }) => "agent_turn_unassigned",
            SessionError::Script(ScriptError::StepRejected { .. }) => "script_step_rejected",
            SessionError::SessionTerminal => "session_terminal",
            SessionError::SessionAborted => "session_aborted",
            SessionError::InvalidSetup(_) => "invalid_setup",
            SessionError::ChipConservation { .. } => "chip_conservation",
            SessionError::Rules(_) => "rules_engine",
        }
    }
}

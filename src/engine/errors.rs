use crate::domain::{Card, Chips, SeatIndex, Street};
use crate::engine::actions::ActionKind;

use thiserror::Error;

/// Ошибки движка правил.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("некорректные параметры раздачи: {0}")]
    InvalidParams(String),

    #[error("сейчас никто не ходит")]
    NoActor,

    #[error("действие {0} сейчас недопустимо")]
    IllegalAction(ActionKind),

    #[error("рейз до {amount} вне диапазона [{min}, {max}]")]
    RaiseOutOfRange { amount: Chips, min: Chips, max: Chips },

    #[error("раздача сейчас не ждёт карт борда")]
    BoardNotExpected,

    #[error("ожидается улица {expected}, а пришла {got}")]
    WrongStreet { expected: Street, got: Street },

    #[error("нужно {expected} карт(ы), передано {got}")]
    WrongCardCount { expected: usize, got: usize },

    #[error("карты {0} нет в колоде")]
    CardUnavailable(Card),

    #[error("колода закончилась")]
    DeckExhausted,

    #[error("места {0} не существует")]
    InvalidSeat(SeatIndex),

    #[error("игроку на месте {0} карманные карты уже розданы")]
    HoleAlreadyDealt(SeatIndex),

    #[error("раздача завершена")]
    Terminal,

    #[error("внутренняя ошибка: {0}")]
    Internal(&'static str),
}

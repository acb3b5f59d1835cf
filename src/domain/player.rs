use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;

/// Индекс места внутри движка (0..player_count-1).
pub type SeatIndex = usize;

/// Номер игрока так, как он пишется в скриптах и отдаётся наружу: 1, 2, ...
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerNumber(pub u32);

impl PlayerNumber {
    pub fn from_seat(seat: SeatIndex) -> Self {
        PlayerNumber(seat as u32 + 1)
    }

    /// None для нулевого номера.
    pub fn seat(self) -> Option<SeatIndex> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Статус игрока в текущей раздаче.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен и может ходить.
    Active,
    /// Игрок сфолдил и больше не участвует в банке.
    Folded,
    /// Игрок в оллыне – не может больше делать ставки.
    AllIn,
}

/// Состояние одного места в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatState {
    pub stack: Chips,
    /// Ставка на текущей улице (анте сюда не входит).
    pub street_bet: Chips,
    /// Сколько всего внесено в банк за раздачу (для сайд-потов).
    pub contributed: Chips,
    pub status: PlayerStatus,
    pub hole_cards: Vec<Card>,
}

impl SeatState {
    pub fn new(stack: Chips) -> Self {
        Self {
            stack,
            street_bet: Chips::ZERO,
            contributed: Chips::ZERO,
            status: PlayerStatus::Active,
            hole_cards: Vec::new(),
        }
    }

    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    pub fn can_bet(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Списать со стека не более amount, вернуть реально списанное.
    /// Обнулившийся стек переводит игрока в all-in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.stack);
        self.stack -= real;
        self.contributed += real;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        real
    }
}

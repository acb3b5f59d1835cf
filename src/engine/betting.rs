use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::SeatIndex;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Размер последнего полного повышения (для минимального рейза).
    pub last_raise_size: Chips,
    /// Seat последнего агрессора (bet/raise).
    pub last_aggressor: Option<SeatIndex>,
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Очередь ходящих: кто ещё должен сделать действие на этой улице.
    pub to_act: Vec<SeatIndex>,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, last_raise_size: Chips, to_act: Vec<SeatIndex>) -> Self {
        Self {
            current_bet,
            last_raise_size,
            last_aggressor: None,
            street,
            to_act,
        }
    }

    /// Удалить seat из очереди to_act, если он там есть.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
    }

    /// Обновить состояние после bet/raise. Неполный all-in рейз
    /// (меньше минимального шага) не меняет last_raise_size.
    pub fn on_raise(&mut self, seat: SeatIndex, new_bet: Chips, min_increment: Chips, new_to_act: Vec<SeatIndex>) {
        let raise_size = new_bet - self.current_bet;
        if raise_size >= min_increment {
            self.last_raise_size = raise_size;
        }
        self.current_bet = new_bet;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
    }

    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }
}

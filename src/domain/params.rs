use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Блайнды и страддл: (small blind, big blind, straddle).
/// Нулевой страддл = страддла нет.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindsOrStraddles {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub straddle: Chips,
}

/// Параметры создания раздачи в движке правил.
///
/// Всё, кроме стеков, приходит из заголовка скрипта,
/// стеки передаёт тот, кто загружает игру.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameParams {
    /// Анте одинаковые у всех (обрезаются по самому короткому стеку).
    pub uniform_antes: bool,
    pub ante: Chips,
    pub blinds: BlindsOrStraddles,
    /// Минимальная ставка / минимальный шаг рейза.
    pub min_bet: Chips,
    pub starting_stacks: Vec<Chips>,
}

impl GameParams {
    pub fn player_count(&self) -> usize {
        self.starting_stacks.len()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.starting_stacks.len() < 2 {
            return Err(format!(
                "нужно минимум 2 игрока, передано стеков: {}",
                self.starting_stacks.len()
            ));
        }
        if let Some(idx) = self.starting_stacks.iter().position(|s| s.is_zero()) {
            return Err(format!("стек игрока {} равен нулю", idx + 1));
        }
        if self.blinds.big_blind.is_zero() {
            return Err("big_blind = 0".into());
        }
        if self.min_bet.is_zero() {
            return Err("min_bet = 0".into());
        }
        if !self.blinds.straddle.is_zero() && self.starting_stacks.len() < 3 {
            return Err("страддл требует минимум 3 игроков".into());
        }
        Ok(())
    }
}

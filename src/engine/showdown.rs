use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::player::SeatState;
use crate::domain::SeatIndex;
use crate::engine::pot::PotShare;

/// Кто и сколько получает из одного банка на шоудауне.
///
/// Сила рук вне зоны ответственности оркестратора: сюда подставляется
/// любой внешний оценщик. Сумма выплат обязана совпадать с `pot.amount`.
pub trait ShowdownResolver {
    fn award(&self, pot: &PotShare, seats: &[SeatState], board: &[Card]) -> Vec<(SeatIndex, Chips)>;
}

/// Делит каждый банк поровну между претендентами, лишние фишки – младшим местам.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplitPotResolver;

impl ShowdownResolver for SplitPotResolver {
    fn award(&self, pot: &PotShare, seats: &[SeatState], _board: &[Card]) -> Vec<(SeatIndex, Chips)> {
        let mut winners: Vec<SeatIndex> = pot
            .eligible_seats
            .iter()
            .copied()
            .filter(|&seat| seats.get(seat).map(|s| s.is_in_hand()).unwrap_or(false))
            .collect();
        winners.sort_unstable();

        if winners.is_empty() {
            return Vec::new();
        }

        let share = pot.amount.0 / winners.len() as u64;
        let mut remainder = pot.amount.0 % winners.len() as u64;

        winners
            .into_iter()
            .map(|seat| {
                let mut prize = share;
                if remainder > 0 {
                    prize += 1;
                    remainder -= 1;
                }
                (seat, Chips(prize))
            })
            .collect()
    }
}

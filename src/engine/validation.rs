use std::collections::BTreeSet;

use crate::domain::chips::Chips;
use crate::domain::player::SeatState;
use crate::domain::SeatIndex;
use crate::engine::actions::ActionKind;
use crate::engine::betting::BettingState;

/// Какие действия доступны игроку на месте `actor` при текущем состоянии ставок.
///
/// - Fold — только если есть что уравнивать.
/// - CheckOrCall — всегда.
/// - Raise — если стек больше суммы колла и кто-то ещё может ответить.
pub fn legal_actions(seats: &[SeatState], actor: SeatIndex, betting: &BettingState) -> BTreeSet<ActionKind> {
    let mut legal = BTreeSet::new();
    let Some(player) = seats.get(actor) else {
        return legal;
    };
    if !player.can_bet() {
        return legal;
    }

    let to_call = diff_to_call(player, betting);

    if !to_call.is_zero() {
        legal.insert(ActionKind::Fold);
    }
    legal.insert(ActionKind::CheckOrCall);

    let others_can_respond = seats
        .iter()
        .enumerate()
        .any(|(seat, s)| seat != actor && s.can_bet());
    if player.stack > to_call && others_can_respond {
        legal.insert(ActionKind::Raise);
    }

    legal
}

/// Границы "рейза до" для игрока: (min, max).
/// Если стека не хватает на полный минимальный рейз — минимум равен оллыну.
pub fn raise_bounds(player: &SeatState, betting: &BettingState, min_bet: Chips) -> (Chips, Chips) {
    let max = player.street_bet + player.stack;
    let increment = betting.last_raise_size.max(min_bet);
    let min = (betting.current_bet + increment).min(max);
    (min, max)
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
pub fn diff_to_call(player: &SeatState, betting: &BettingState) -> Chips {
    betting.current_bet.saturating_sub(player.street_bet)
}

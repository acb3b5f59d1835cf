use crate::domain::player::SeatState;
use crate::domain::SeatIndex;

/// Места по кругу, начиная со start (включительно), только те, кто ещё может ставить.
pub fn betting_order_from(seats: &[SeatState], start: SeatIndex) -> Vec<SeatIndex> {
    let n = seats.len();
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| (start + i) % n)
        .filter(|&seat| seats[seat].can_bet())
        .collect()
}

/// Очередь после рейза: все, кто может ставить, начиная со следующего за рейзером.
pub fn betting_order_after_raise(seats: &[SeatState], raiser: SeatIndex) -> Vec<SeatIndex> {
    let n = seats.len();
    betting_order_from(seats, (raiser + 1) % n.max(1))
        .into_iter()
        .filter(|&seat| seat != raiser)
        .collect()
}

/// Кто первым ходит на постфлопе: хедз-ап – большой блайнд (seat 1),
/// иначе – первый активный от малого блайнда.
pub fn postflop_start(player_count: usize) -> SeatIndex {
    if player_count == 2 {
        1
    } else {
        0
    }
}

/// Сколько игроков ещё участвуют в раздаче (не сфолдили).
pub fn count_in_hand(seats: &[SeatState]) -> usize {
    seats.iter().filter(|s| s.is_in_hand()).count()
}

/// Сколько игроков ещё могут делать ставки (не сфолдили и не в оллыне).
pub fn count_can_bet(seats: &[SeatState]) -> usize {
    seats.iter().filter(|s| s.can_bet()).count()
}

use crate::domain::chips::Chips;
use crate::domain::player::SeatState;
use crate::domain::SeatIndex;
use crate::engine::pot::PotShare;

/// Разложить вклады игроков на основной банк и сайд-поты.
///
/// Уровни берутся по вкладам тех, кто ещё в раздаче; фишки сфолдивших
/// остаются в тех банках, до которых они дотянулись.
/// Выход: банки в порядке "от младших" к "старшим", первый — основной.
pub fn compute_side_pots(seats: &[SeatState]) -> Vec<PotShare> {
    let mut levels: Vec<Chips> = seats
        .iter()
        .filter(|s| s.is_in_hand() && !s.contributed.is_zero())
        .map(|s| s.contributed)
        .collect();
    levels.sort();
    levels.dedup();

    let mut pots: Vec<PotShare> = Vec::new();
    let mut prev_level = Chips::ZERO;

    for &level in &levels {
        // Каждый вносит в этот уровень то, что у него лежит между prev_level и level.
        let amount: Chips = seats
            .iter()
            .map(|s| s.contributed.min(level) - s.contributed.min(prev_level))
            .sum();

        let eligible: Vec<SeatIndex> = seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_in_hand() && s.contributed >= level)
            .map(|(seat, _)| seat)
            .collect();

        match pots.last_mut() {
            // Тот же состав претендентов – это всё ещё один банк.
            Some(last) if last.eligible_seats == eligible => last.amount += amount,
            _ => pots.push(PotShare {
                amount,
                eligible_seats: eligible,
            }),
        }

        prev_level = level;
    }

    // Хвост вкладов сфолдивших выше последнего уровня.
    let residual: Chips = seats.iter().map(|s| s.contributed - s.contributed.min(prev_level)).sum();
    if !residual.is_zero() {
        match pots.last_mut() {
            Some(last) => last.amount += residual,
            None => pots.push(PotShare {
                amount: residual,
                eligible_seats: Vec::new(),
            }),
        }
    }

    pots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::PlayerStatus;

    fn seat(contributed: u64, status: PlayerStatus) -> SeatState {
        let mut s = SeatState::new(Chips(1_000));
        s.contributed = Chips(contributed);
        s.status = status;
        s
    }

    #[test]
    fn single_pot_when_everyone_matched() {
        let seats = vec![
            seat(100, PlayerStatus::Active),
            seat(100, PlayerStatus::Active),
            seat(50, PlayerStatus::Folded),
        ];
        let pots = compute_side_pots(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, Chips(250));
        assert_eq!(pots[0].eligible_seats, vec![0, 1]);
    }

    #[test]
    fn short_all_in_creates_side_pot() {
        let seats = vec![
            seat(300, PlayerStatus::AllIn),
            seat(1_000, PlayerStatus::Active),
            seat(1_000, PlayerStatus::Active),
        ];
        let pots = compute_side_pots(&seats);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, Chips(900));
        assert_eq!(pots[0].eligible_seats, vec![0, 1, 2]);
        assert_eq!(pots[1].amount, Chips(1_400));
        assert_eq!(pots[1].eligible_seats, vec![1, 2]);
        assert_eq!(PotShare::total(&pots), Chips(2_300));
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Один банк: основной (первый в списке) или сайд-пот.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotShare {
    pub amount: Chips,
    /// Кто может выиграть этот банк (не сфолдившие с достаточным вкладом).
    pub eligible_seats: Vec<SeatIndex>,
}

impl PotShare {
    pub fn total(pots: &[PotShare]) -> Chips {
        pots.iter().map(|p| p.amount).sum()
    }
}

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Тип решения игрока. Bet и raise в no-limit сводятся к "рейзу до суммы",
/// check и call — к одному check-or-call.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    Fold,
    CheckOrCall,
    Raise,
}

impl ActionKind {
    pub fn requires_amount(self) -> bool {
        matches!(self, ActionKind::Raise)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Fold => "fold",
            ActionKind::CheckOrCall => "check_or_call",
            ActionKind::Raise => "raise",
        };
        f.write_str(name)
    }
}

/// Разбор названия действия без учёта регистра:
/// fold / check / call / check_or_call / raise / bet.
impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(ActionKind::Fold),
            "check" | "call" | "check_or_call" => Ok(ActionKind::CheckOrCall),
            "raise" | "bet" => Ok(ActionKind::Raise),
            other => Err(format!("неизвестное действие: {other:?}")),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, PlayerNumber, PlayerStatus, Street};
use crate::engine::{ActionKind, PotShare, RulesEngine};
use crate::orchestrator::action_log::ActionLog;
use crate::orchestrator::registry::{AgentId, AgentRegistry};

/// Игрок в снимке.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub player: PlayerNumber,
    pub stack: Chips,
    pub status: PlayerStatus,
    /// Агент, управляющий этим местом (если зарегистрирован).
    pub agent: Option<AgentId>,
}

/// Банк в снимке: основной первым, дальше сайд-поты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotView {
    pub amount: Chips,
    pub eligible: Vec<PlayerNumber>,
}

impl From<&PotShare> for PotView {
    fn from(pot: &PotShare) -> Self {
        Self {
            amount: pot.amount,
            eligible: pot.eligible_seats.iter().map(|&s| PlayerNumber::from_seat(s)).collect(),
        }
    }
}

/// Публичный снимок сессии.
///
/// Неизменяем: после каждого перехода сессия собирает новый целиком.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub street: Street,
    pub board: Vec<Card>,
    pub pots: Vec<PotView>,
    pub total_pot: Chips,
    pub players: Vec<PlayerView>,
    pub legal_actions: Vec<ActionKind>,
    pub current_actor: Option<PlayerNumber>,
    pub current_agent: Option<AgentId>,
    pub min_raise_to: Option<Chips>,
    pub max_raise_to: Option<Chips>,
    pub action_log: ActionLog,
    pub terminal: bool,
    /// Позиция курсора скрипта и длина скрипта.
    pub cursor: usize,
    pub script_len: usize,
}

impl Snapshot {
    pub fn capture<E: RulesEngine>(
        engine: &E,
        registry: &AgentRegistry,
        log: &ActionLog,
        cursor: usize,
        script_len: usize,
    ) -> Self {
        let pots: Vec<PotView> = engine.pots().iter().map(PotView::from).collect();
        let total_pot = pots.iter().map(|p| p.amount).sum();

        let players = engine
            .stacks()
            .into_iter()
            .zip(engine.statuses())
            .enumerate()
            .map(|(seat, (stack, status))| PlayerView {
                player: PlayerNumber::from_seat(seat),
                stack,
                status,
                agent: registry.agent_for_seat(seat),
            })
            .collect();

        let actor = engine.current_actor();

        Self {
            street: engine.street(),
            board: engine.board(),
            pots,
            total_pot,
            players,
            legal_actions: engine.legal_actions().into_iter().collect(),
            current_actor: actor.map(PlayerNumber::from_seat),
            current_agent: actor.and_then(|seat| registry.agent_for_seat(seat)),
            min_raise_to: engine.min_raise_to(),
            max_raise_to: engine.max_raise_to(),
            action_log: log.clone(),
            terminal: engine.is_terminal(),
            cursor,
            script_len,
        }
    }

    /// Все фишки за столом: стеки плюс банки.
    pub fn chips_in_play(&self) -> Chips {
        let stacks: Chips = self.players.iter().map(|p| p.stack).sum();
        stacks + self.total_pot
    }

    pub fn stack_of(&self, player: PlayerNumber) -> Option<Chips> {
        self.players.iter().find(|p| p.player == player).map(|p| p.stack)
    }

    pub fn is_legal(&self, kind: ActionKind) -> bool {
        self.legal_actions.contains(&kind)
    }
}

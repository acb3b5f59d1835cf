//! Свойства на случайных раздачах (proptest):
//! - сохранение фишек после каждого применённого действия;
//! - ходит ровно один актёр, чужой ход – OutOfTurn без изменений;
//! - действие вне набора допустимых – IllegalAction без изменений.

use std::sync::Arc;

use proptest::prelude::*;

use poker_orchestrator::domain::{BlindsOrStraddles, Chips, GameParams, PlayerStatus};
use poker_orchestrator::engine::{
    start_hand, ActionKind, HandPhase, HoldemEngine, HoldemFactory, PotShare, RulesEngine, SplitPotResolver,
};
use poker_orchestrator::infra::DeterministicRng;
use poker_orchestrator::orchestrator::{
    ActionRequest, AdvanceOutcome, AgentId, Script, Session, SessionConfig, SessionError, Snapshot,
};

const ALL_KINDS: [ActionKind; 3] = [ActionKind::Fold, ActionKind::CheckOrCall, ActionKind::Raise];

fn stacks_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(150u64..5_000, 2..6)
}

fn choices_strategy() -> impl Strategy<Value = Vec<(usize, u64)>> {
    prop::collection::vec((0usize..3, any::<u64>()), 1..60)
}

fn params_for(stacks: &[u64]) -> GameParams {
    GameParams {
        uniform_antes: false,
        ante: Chips(10),
        blinds: BlindsOrStraddles {
            small_blind: Chips(50),
            big_blind: Chips(100),
            straddle: Chips::ZERO,
        },
        min_bet: Chips(100),
        starting_stacks: stacks.iter().map(|&s| Chips(s)).collect(),
    }
}

fn total_chips<E: RulesEngine>(engine: &E) -> Chips {
    let stacks: Chips = engine.stacks().into_iter().sum();
    stacks + PotShare::total(&engine.pots())
}

/// Выбрать действие из допустимых по случайному индексу.
fn pick(legal: &[ActionKind], min: Option<Chips>, max: Option<Chips>, choice: (usize, u64)) -> (ActionKind, Option<Chips>) {
    let kind = legal[choice.0 % legal.len()];
    let amount = match (kind, min, max) {
        (ActionKind::Raise, Some(min), Some(max)) => Some(Chips(min.0 + choice.1 % (max.0 - min.0 + 1))),
        _ => None,
    };
    (kind, amount)
}

/// Скрипт из одних ходов агентов: хватает на весь префлоп.
fn agents_only_script() -> Script {
    let mut text = String::from("False 0 50 100 0 100\n");
    for _ in 0..64 {
        text.push_str("Agent\n");
    }
    text.parse().unwrap()
}

fn load_all_agents(stacks: &[u64]) -> (Session<HoldemEngine, DeterministicRng>, Vec<AgentId>) {
    let mut session = Session::load(
        &HoldemFactory::default(),
        agents_only_script(),
        stacks.iter().map(|&s| Chips(s)).collect(),
        stacks.len(),
        &SessionConfig::default(),
        DeterministicRng::from_u64(17),
    )
    .unwrap();
    let agents = (0..stacks.len()).map(|_| session.register_agent().unwrap()).collect();
    (session, agents)
}

fn unchanged(session: &Session<HoldemEngine, DeterministicRng>, before: &Arc<Snapshot>) -> bool {
    Arc::ptr_eq(&session.snapshot(), before)
}

proptest! {
    /// Движок: стеки плюс банки постоянны, пока раздача играется до конца.
    #[test]
    fn engine_conserves_chips_through_random_hands(
        stacks in stacks_strategy(),
        choices in choices_strategy(),
    ) {
        let mut rng = DeterministicRng::from_u64(3);
        let mut engine = start_hand(&params_for(&stacks), &mut rng, SplitPotResolver).unwrap();
        let total = Chips(stacks.iter().sum());
        prop_assert_eq!(total_chips(&engine), total);

        let mut choices = choices.into_iter();
        while !engine.is_terminal() {
            match engine.phase() {
                HandPhase::AwaitingBoard(street) => {
                    engine.deal_board(street, None).unwrap();
                }
                HandPhase::Betting => {
                    let Some(choice) = choices.next() else { break };
                    let actor = engine.current_actor();
                    prop_assert!(actor.is_some());
                    let actor = actor.unwrap();
                    prop_assert_eq!(engine.statuses()[actor], PlayerStatus::Active);

                    let legal: Vec<ActionKind> = engine.legal_actions().into_iter().collect();
                    let (kind, amount) = pick(&legal, engine.min_raise_to(), engine.max_raise_to(), choice);
                    prop_assert_eq!(engine.apply(kind, amount), Ok(()));
                }
                HandPhase::Finished => break,
            }
            prop_assert_eq!(total_chips(&engine), total);
        }

        if engine.is_terminal() {
            prop_assert!(engine.pots().is_empty());
            let stacks: Chips = engine.stacks().into_iter().sum();
            prop_assert_eq!(stacks, total);
        }
    }

    /// Сессия: только текущий агент может ходить, только допустимыми действиями.
    #[test]
    fn session_enforces_turns_and_legality(
        stacks in stacks_strategy(),
        choices in choices_strategy(),
    ) {
        let (mut session, agents) = load_all_agents(&stacks);
        let total = session.snapshot().chips_in_play();

        for choice in choices {
            let current = match session.advance_script() {
                Ok(AdvanceOutcome::AwaitingAgent { agent, .. }) => agent,
                Ok(AdvanceOutcome::Terminal) => break,
                // Префлоп закрыт: следующий ход агента без актёра – конец прогона.
                Err(err) => {
                    prop_assert!(err.is_fatal());
                    break;
                }
            };
            let before = session.snapshot();
            prop_assert_eq!(before.current_agent, Some(current));

            for &other in agents.iter().filter(|&&a| a != current) {
                let res = session.submit_action(ActionRequest::check_or_call(other));
                prop_assert_eq!(res, Err(SessionError::OutOfTurn(other)));
                prop_assert!(unchanged(&session, &before));
            }

            for kind in ALL_KINDS.into_iter().filter(|k| !before.is_legal(*k)) {
                let request = ActionRequest {
                    agent: current,
                    kind,
                    amount: kind.requires_amount().then_some(Chips(1)),
                };
                prop_assert_eq!(session.submit_action(request), Err(SessionError::IllegalAction(kind)));
                prop_assert!(unchanged(&session, &before));
            }

            let (kind, amount) = pick(&before.legal_actions, before.min_raise_to, before.max_raise_to, choice);
            let after = session.submit_action(ActionRequest { agent: current, kind, amount }).unwrap();
            prop_assert_eq!(after.chips_in_play(), total);
            prop_assert_eq!(session.cursor(), before.cursor + 1);
        }
    }
}

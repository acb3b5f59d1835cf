//! Импровизация: вместо заскриптованных действий – случайный выбор.
//!
//! Жребий подставляется заранее заданной последовательностью, чтобы
//! проверять каждую ветку политики.

use std::collections::VecDeque;

use poker_orchestrator::domain::{Chips, PlayerNumber};
use poker_orchestrator::engine::{ActionKind, HoldemEngine, HoldemFactory, RandomSource};
use poker_orchestrator::infra::DeterministicRng;
use poker_orchestrator::orchestrator::{
    ActionOrigin, AdvanceOutcome, LogEntryKind, Script, ScriptError, Session, SessionConfig, SessionError,
    SessionPhase, StallPolicy,
};

/// RNG с заранее заданными выпадениями. Колоду не тасует.
#[derive(Debug, Default)]
struct FixedDraws {
    draws: VecDeque<usize>,
}

impl FixedDraws {
    fn new(draws: &[usize]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }
}

impl RandomSource for FixedDraws {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn pick_index(&mut self, len: usize) -> usize {
        self.draws.pop_front().unwrap_or(0) % len
    }
}

/// Раздача чеками до шоудауна, если играть буквально.
const CHECK_DOWN: &str = "\
False 0 50 100 0 100
call
raise 500
flop
check
check
turn
check
check
river
check
check
";

fn load<R: RandomSource>(script: &str, policy: StallPolicy, rng: R) -> Session<HoldemEngine, R> {
    let script: Script = script.parse().unwrap();
    Session::load(
        &HoldemFactory::default(),
        script,
        vec![Chips(1000), Chips(1000)],
        0,
        &SessionConfig::improvising(policy),
        rng,
    )
    .unwrap()
}

fn improvised_kinds(log: &[poker_orchestrator::orchestrator::LogEntry]) -> Vec<ActionKind> {
    log.iter()
        .filter_map(|e| match e.kind {
            LogEntryKind::Acted {
                kind,
                origin: ActionOrigin::Improvised,
                ..
            } => Some(kind),
            _ => None,
        })
        .collect()
}

/// Выпал фолд малого блайнда – раздача окончена, остаток скрипта не нужен.
#[test]
fn improvised_fold_ends_hand() {
    let mut session = load(CHECK_DOWN, StallPolicy::GuaranteeProgress, FixedDraws::new(&[0]));

    assert_eq!(session.advance_script(), Ok(AdvanceOutcome::Terminal));
    let snap = session.snapshot();
    assert_eq!(snap.stack_of(PlayerNumber(1)), Some(Chips(950)));
    assert_eq!(snap.stack_of(PlayerNumber(2)), Some(Chips(1050)));
    assert_eq!(improvised_kinds(&snap.action_log.entries), vec![ActionKind::Fold]);
}

/// Недопустимый фолд без ставки превращается в чек: каждый шаг – ровно одно действие.
#[test]
fn guarantee_progress_degrades_illegal_fold() {
    let mut session = load(
        CHECK_DOWN,
        StallPolicy::GuaranteeProgress,
        FixedDraws::new(&[1, 0, 0, 0, 1, 1, 0, 0]),
    );

    assert_eq!(session.advance_script(), Ok(AdvanceOutcome::Terminal));
    let snap = session.snapshot();
    assert_eq!(improvised_kinds(&snap.action_log.entries), vec![ActionKind::CheckOrCall; 8]);
    assert_eq!(snap.stack_of(PlayerNumber(1)), Some(Chips(1000)));
    assert_eq!(snap.stack_of(PlayerNumber(2)), Some(Chips(1000)));
    assert_eq!(session.phase(), SessionPhase::Terminal);
}

/// Pass оставляет ход неразрешённым, скрипт кончается раньше раздачи.
#[test]
fn permit_pass_stalls_until_exhausted() {
    let mut session = load("False 0 50 100 0 100\ncall\n", StallPolicy::Permit, FixedDraws::new(&[2]));

    assert_eq!(
        session.advance_script(),
        Err(SessionError::Script(ScriptError::ScriptExhausted { cursor: 1 }))
    );
    let snap = session.snapshot();
    assert_eq!(
        snap.action_log.entries.last().map(|e| &e.kind),
        Some(&LogEntryKind::Passed {
            player: Some(PlayerNumber(1))
        })
    );
    assert_eq!(snap.total_pot, Chips(150));
    assert_eq!(session.phase(), SessionPhase::Aborted);
}

/// При Permit недопустимый фолд тоже считается pass.
#[test]
fn permit_illegal_fold_is_a_pass() {
    let mut session = load(
        "False 0 50 100 0 100\ncall\ncheck\ncall\n",
        StallPolicy::Permit,
        FixedDraws::new(&[1, 0, 1]),
    );

    // SB коллирует, у BB фолд недопустим (pass), затем BB чекает.
    let _ = session.advance_script();
    let snap = session.snapshot();
    let kinds: Vec<&LogEntryKind> = snap.action_log.entries.iter().map(|e| &e.kind).collect();
    assert_eq!(kinds.len(), 3);
    assert_eq!(
        kinds[1],
        &LogEntryKind::Passed {
            player: Some(PlayerNumber(2))
        }
    );
    assert_eq!(improvised_kinds(&snap.action_log.entries), vec![ActionKind::CheckOrCall; 2]);
}

/// Один seed – один и тот же импровизированный прогон.
#[test]
fn improvisation_is_reproducible_with_seed() {
    let run = |seed: u64| {
        let mut session = load(CHECK_DOWN, StallPolicy::GuaranteeProgress, DeterministicRng::from_u64(seed));
        let outcome = session.advance_script();
        (outcome, (*session.snapshot()).clone())
    };

    let (outcome_a, snap_a) = run(2024);
    let (outcome_b, snap_b) = run(2024);
    assert_eq!(outcome_a, outcome_b);
    assert_eq!(snap_a, snap_b);
    assert_eq!(outcome_a, Ok(AdvanceOutcome::Terminal));
    assert_eq!(snap_a.chips_in_play(), Chips(2000));
}

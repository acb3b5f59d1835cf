//! Тесты внешнего API: фасад PokerTable, команды/запросы и ошибки.

use poker_orchestrator::api::{
    ApiError, Command, CommandResponse, LoadGameCommand, MakeMoveCommand, PokerTable, Query, QueryResponse,
};
use poker_orchestrator::domain::{Chips, PlayerNumber};
use poker_orchestrator::orchestrator::{AdvanceOutcome, AgentId, SessionConfig};

const SCRIPT: &str = "False 0 50 100 0 100\nhole A1\nAgent1 turn\n";

/// Утилита: стол с фиксированным seed и загруженной игрой на одного агента.
fn loaded_table() -> PokerTable {
    let mut table = PokerTable::new(SessionConfig::default().with_seed(11));
    table.load_specific_game(SCRIPT, &[20_000, 20_000], 1).unwrap();
    table
}

#[test]
fn raise_through_facade() {
    let mut table = loaded_table();
    assert_eq!(table.register_agent(), Ok(AgentId(1)));

    let snap = table.make_move("1", "raise", Some(300)).unwrap();
    assert_eq!(snap.stack_of(PlayerNumber(1)), Some(Chips(19_700)));
    assert_eq!(snap.total_pot, Chips(400));
    assert_eq!(snap.current_actor, Some(PlayerNumber(2)));
    assert!(!table.is_terminal());
}

/// Ход не в свою очередь: код причины out_of_turn, состояние не изменилось.
#[test]
fn out_of_turn_reported_with_reason() {
    let mut table = loaded_table();
    table.register_agent().unwrap();
    let before = table.get_state().unwrap();

    let err = table.make_move("2", "fold", None).unwrap_err();
    assert_eq!(err.reason(), "out_of_turn");
    assert!(matches!(err, ApiError::Rejected { .. }));
    assert_eq!(*table.get_state().unwrap(), *before);
}

#[test]
fn missing_amount_and_capacity_reasons() {
    let mut table = loaded_table();
    table.register_agent().unwrap();

    assert_eq!(table.make_move("1", "RAISE", None).unwrap_err().reason(), "missing_amount");

    let err = table.register_agent().unwrap_err();
    assert_eq!(err.reason(), "capacity_exceeded");
    assert!(matches!(err, ApiError::Capacity { .. }));
}

#[test]
fn malformed_requests_are_bad_requests() {
    let mut table = loaded_table();
    table.register_agent().unwrap();

    assert!(matches!(table.make_move("one", "fold", None), Err(ApiError::BadRequest(_))));
    assert!(matches!(table.make_move("1", "shove", None), Err(ApiError::BadRequest(_))));
}

#[test]
fn nothing_to_do_without_a_game() {
    let mut table: PokerTable = PokerTable::default();

    assert_eq!(table.get_state(), Err(ApiError::NoGameLoaded));
    assert_eq!(table.make_move("1", "fold", None), Err(ApiError::NoGameLoaded));
    assert_eq!(table.advance_script(), Err(ApiError::NoGameLoaded));
    assert_eq!(table.register_agent().unwrap_err().reason(), "capacity_exceeded");
    assert!(table.clear_agents().is_ok());
    assert!(!table.is_terminal());
}

/// Битый скрипт: фатальная ошибка, стол остаётся без игры.
#[test]
fn broken_script_leaves_no_game() {
    let mut table = loaded_table();
    let err = table
        .load_specific_game("False 0 50 100 0 100\ndance\n", &[1000, 1000], 0)
        .unwrap_err();
    assert_eq!(err.reason(), "invalid_script_line");
    assert!(matches!(err, ApiError::Fatal { .. }));
    assert_eq!(table.get_state(), Err(ApiError::NoGameLoaded));

    let err = table.load_specific_game(SCRIPT, &[20_000], 1).unwrap_err();
    assert_eq!(err.reason(), "invalid_setup");
}

/// Команды и запросы через execute/query, с JSON туда и обратно.
#[test]
fn commands_and_queries_dispatch() {
    let mut table = PokerTable::new(SessionConfig::default().with_seed(3));

    let load = Command::LoadSpecificGame(LoadGameCommand {
        script: "False 0 50 100 0 100\nAgent1\nfold\n".into(),
        stacks: vec![1000, 1000],
        agent_count: 1,
    });
    let json = serde_json::to_string(&load).unwrap();
    let load: Command = serde_json::from_str(&json).unwrap();
    assert!(matches!(table.execute(load), Ok(CommandResponse::GameLoaded(_))));

    assert_eq!(
        table.execute(Command::RegisterAgent),
        Ok(CommandResponse::AgentRegistered(AgentId(1)))
    );
    assert_eq!(
        table.execute(Command::AdvanceScript),
        Ok(CommandResponse::Advanced(AdvanceOutcome::AwaitingAgent {
            agent: AgentId(1),
            player: PlayerNumber(1)
        }))
    );

    let call = Command::MakeMove(MakeMoveCommand {
        identifier: "1".into(),
        action: "call".into(),
        amount: None,
    });
    assert!(matches!(table.execute(call), Ok(CommandResponse::State(_))));

    // Заскриптованный фолд большого блайнда недопустим без ставки – скрипт битый.
    let err = table.execute(Command::AdvanceScript).unwrap_err();
    assert_eq!(err.reason(), "script_step_rejected");
    assert_eq!(
        table.execute(Command::AdvanceScript).unwrap_err().reason(),
        "session_aborted"
    );

    assert_eq!(table.query(Query::IsTerminal), Ok(QueryResponse::Terminal(false)));
    assert!(matches!(table.query(Query::GetState), Ok(QueryResponse::State(_))));
}

/// Один seed – одинаковые раздачи, номер загрузки меняет колоду.
#[test]
fn seeded_tables_replay_identically() {
    let deal = |table: &mut PokerTable| {
        table
            .load_specific_game("False 0 50 100 0 100\nhole 1\nhole 2\nfold\n", &[1000, 1000], 0)
            .unwrap();
        table.advance_script().unwrap();
        table.get_state().unwrap().action_log.clone()
    };

    let mut a = PokerTable::new(SessionConfig::default().with_seed(99));
    let mut b = PokerTable::new(SessionConfig::default().with_seed(99));

    let first_a = deal(&mut a);
    let first_b = deal(&mut b);
    assert_eq!(first_a, first_b);

    let second_a = deal(&mut a);
    assert_ne!(first_a, second_a);
    assert!(a.is_terminal());
}

#[test]
fn api_error_serializes() {
    let err = ApiError::Rejected {
        reason: "out_of_turn".into(),
        message: "сейчас не ход агента 2".into(),
    };
    let json = serde_json::to_string(&err).unwrap();
    let back: ApiError = serde_json::from_str(&json).unwrap();
    assert_eq!(back, err);
    assert_eq!(back.to_string(), "сейчас не ход агента 2");
}

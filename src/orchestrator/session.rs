//! Сессия: владеет движком, реестром агентов, интерпретатором скрипта и
//! публикуемым снимком. Все изменения идут через `submit_action`
//! и `advance_script`, по одному вызову за раз.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerNumber};
use crate::engine::{ActionKind, PotShare, RandomSource, RulesEngine, RulesEngineFactory, RulesError};
use crate::orchestrator::action_log::{ActionLog, ActionOrigin, LogEntryKind};
use crate::orchestrator::config::SessionConfig;
use crate::orchestrator::errors::{ScriptError, SessionError};
use crate::orchestrator::interpreter::{Interpreter, InterpreterYield};
use crate::orchestrator::registry::{AgentId, AgentRegistry};
use crate::orchestrator::script::{Script, Step};
use crate::orchestrator::snapshot::Snapshot;

/// Фаза сессии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionPhase {
    /// Кто-то (агент или скрипт) должен сходить.
    AwaitingAction,
    /// Идёт проверка и применение. Снаружи не наблюдается.
    Applying,
    Terminal,
    /// Фатальная ошибка скрипта или движка. Нужна новая загрузка.
    Aborted,
}

/// Результат `advance_script`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Скрипт ждёт хода агента `agent` за игрока `player`.
    AwaitingAgent { agent: AgentId, player: PlayerNumber },
    Terminal,
}

/// Запрос агента на действие.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRequest {
    pub agent: AgentId,
    pub kind: ActionKind,
    pub amount: Option<Chips>,
}

impl ActionRequest {
    pub fn fold(agent: AgentId) -> Self {
        Self {
            agent,
            kind: ActionKind::Fold,
            amount: None,
        }
    }

    pub fn check_or_call(agent: AgentId) -> Self {
        Self {
            agent,
            kind: ActionKind::CheckOrCall,
            amount: None,
        }
    }

    pub fn raise_to(agent: AgentId, amount: Chips) -> Self {
        Self {
            agent,
            kind: ActionKind::Raise,
            amount: Some(amount),
        }
    }
}

pub struct Session<E, R> {
    engine: E,
    rng: R,
    registry: AgentRegistry,
    interpreter: Interpreter,
    log: ActionLog,
    phase: SessionPhase,
    /// Сумма стартовых стеков. Стеки плюс банки всегда равны ей.
    chips_total: Chips,
    snapshot: Arc<Snapshot>,
}

impl<E: RulesEngine, R: RandomSource> Session<E, R> {
    /// Загрузить игру: раздача создаётся из заголовка скрипта и стеков,
    /// реестр ждёт `agent_count` регистраций.
    pub fn load<F>(
        factory: &F,
        script: Script,
        stacks: Vec<Chips>,
        agent_count: usize,
        config: &SessionConfig,
        mut rng: R,
    ) -> Result<Self, SessionError>
    where
        F: RulesEngineFactory<Engine = E>,
    {
        let params = script.header().game_params(stacks);
        params.validate().map_err(SessionError::InvalidSetup)?;

        let players = params.player_count();
        script.validate_for(players)?;
        if agent_count > players {
            return Err(SessionError::InvalidSetup(format!(
                "агентов {agent_count}, а игроков всего {players}"
            )));
        }

        let engine = factory.create_session(&params, &mut rng).map_err(|e| match e {
            RulesError::InvalidParams(reason) => SessionError::InvalidSetup(reason),
            other => SessionError::Rules(other),
        })?;

        let mut registry = AgentRegistry::new();
        registry.set_requirement(agent_count);

        let chips_total: Chips = params.starting_stacks.iter().copied().sum();
        let log = ActionLog::new();
        let snapshot = Arc::new(Snapshot::capture(&engine, &registry, &log, 0, script.len()));

        tracing::info!(
            players,
            agents = agent_count,
            steps = script.len(),
            agent_turns = script.agent_turns(),
            follow_script = config.follow_script,
            "игра загружена"
        );

        Ok(Self {
            engine,
            rng,
            registry,
            interpreter: Interpreter::new(script, config),
            log,
            phase: SessionPhase::AwaitingAction,
            chips_total,
            snapshot,
        })
    }

    pub fn register_agent(&mut self) -> Result<AgentId, SessionError> {
        self.ensure_not_aborted()?;
        let id = self.registry.register()?;
        self.publish();
        Ok(id)
    }

    pub fn clear_agents(&mut self) -> Result<(), SessionError> {
        self.ensure_not_aborted()?;
        self.registry.clear();
        self.publish();
        Ok(())
    }

    /// Применить действие агента.
    ///
    /// Любой отказ, кроме фатального, не меняет состояние. При успехе
    /// применяется ровно одно действие и публикуется новый снимок.
    pub fn submit_action(&mut self, request: ActionRequest) -> Result<Arc<Snapshot>, SessionError> {
        let result = self.try_submit(request);
        self.settle(result)
    }

    /// Прогнать скрипт до хода агента или до конца раздачи.
    pub fn advance_script(&mut self) -> Result<AdvanceOutcome, SessionError> {
        let result = self.try_advance();
        self.settle(result)
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Отражает сигнал движка, а не собственный флаг сессии.
    pub fn is_terminal(&self) -> bool {
        self.engine.is_terminal()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.interpreter.cursor().position()
    }

    pub fn script(&self) -> &Script {
        self.interpreter.script()
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn ensure_not_aborted(&self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Aborted {
            return Err(SessionError::SessionAborted);
        }
        Ok(())
    }

    fn ensure_live(&self) -> Result<(), SessionError> {
        self.ensure_not_aborted()?;
        if self.engine.is_terminal() {
            return Err(SessionError::SessionTerminal);
        }
        Ok(())
    }

    fn try_submit(&mut self, request: ActionRequest) -> Result<Arc<Snapshot>, SessionError> {
        let ActionRequest { agent, kind, amount } = request;
        self.ensure_live()?;

        if self.registry.is_stale(agent) {
            return Err(SessionError::UnknownAgent(agent));
        }
        self.registry.ensure_complete()?;

        let seat = self.registry.seat_of(agent).ok_or(SessionError::OutOfTurn(agent))?;
        if self.engine.current_actor() != Some(seat) {
            tracing::debug!(%agent, seat, actor = ?self.engine.current_actor(), "ход не этого агента");
            return Err(SessionError::OutOfTurn(agent));
        }
        match self.interpreter.next_decision() {
            Some(Step::AgentTurn) => {}
            Some(_) => {
                tracing::debug!(%agent, cursor = self.cursor(), "скрипт сейчас ходит сам");
                return Err(SessionError::OutOfTurn(agent));
            }
            None => {
                return Err(ScriptError::ScriptExhausted { cursor: self.cursor() }.into());
            }
        }

        if !self.engine.legal_actions().contains(&kind) {
            tracing::debug!(%agent, %kind, "недопустимое действие");
            return Err(SessionError::IllegalAction(kind));
        }
        match (kind.requires_amount(), amount) {
            (true, None) => return Err(SessionError::MissingAmount),
            (false, Some(_)) => return Err(SessionError::UnexpectedAmount(kind)),
            _ => {}
        }
        if let Some(amount) = amount {
            let (Some(min), Some(max)) = (self.engine.min_raise_to(), self.engine.max_raise_to()) else {
                return Err(SessionError::IllegalAction(kind));
            };
            if amount < min || amount > max {
                return Err(SessionError::AmountOutOfRange { amount, min, max });
            }
        }

        self.phase = SessionPhase::Applying;
        self.interpreter.apply_pending_holes(&mut self.engine, &mut self.log)?;

        let street = self.engine.street();
        self.engine.apply(kind, amount)?;
        self.log.push(
            street,
            LogEntryKind::Acted {
                player: PlayerNumber::from_seat(seat),
                kind,
                amount,
                origin: ActionOrigin::Agent(agent),
            },
        );
        self.interpreter.complete_agent_turn();
        tracing::debug!(%agent, seat, %kind, ?amount, "действие агента применено");

        self.after_transition()?;
        Ok(self.snapshot())
    }

    fn try_advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        self.ensure_not_aborted()?;
        if self.engine.is_terminal() {
            self.phase = SessionPhase::Terminal;
            return Ok(AdvanceOutcome::Terminal);
        }
        self.registry.ensure_complete()?;

        self.phase = SessionPhase::Applying;
        let outcome = self.interpreter.run(&mut self.engine, &mut self.rng, &mut self.log)?;
        self.after_transition()?;

        match outcome {
            InterpreterYield::Terminal => Ok(AdvanceOutcome::Terminal),
            InterpreterYield::AgentTurn => {
                let seat = self.engine.current_actor();
                match seat.and_then(|s| self.registry.agent_for_seat(s).map(|agent| (s, agent))) {
                    Some((seat, agent)) => {
                        let player = PlayerNumber::from_seat(seat);
                        tracing::debug!(%agent, %player, cursor = self.cursor(), "ждём ход агента");
                        Ok(AdvanceOutcome::AwaitingAgent { agent, player })
                    }
                    None => Err(ScriptError::AgentTurnUnassigned {
                        cursor: self.cursor(),
                        player: seat.map(PlayerNumber::from_seat),
                    }
                    .into()),
                }
            }
        }
    }

    /// Проверка сохранения фишек, новая фаза и новый снимок.
    fn after_transition(&mut self) -> Result<(), SessionError> {
        let stacks: Chips = self.engine.stacks().into_iter().sum();
        let actual = stacks + PotShare::total(&self.engine.pots());
        tracing::debug!(expected = %self.chips_total, %actual, "проверка сохранения фишек");
        if actual != self.chips_total {
            return Err(SessionError::ChipConservation {
                expected: self.chips_total,
                actual,
            });
        }

        if self.engine.is_terminal() {
            if self.phase != SessionPhase::Terminal {
                tracing::info!(cursor = self.cursor(), "раздача завершена");
            }
            self.phase = SessionPhase::Terminal;
        } else {
            self.phase = SessionPhase::AwaitingAction;
        }
        self.publish();
        Ok(())
    }

    /// Фатальная ошибка переводит сессию в `Aborted`, остальные
    /// возвращают фазу, в которой сессия была до вызова.
    fn settle<T>(&mut self, result: Result<T, SessionError>) -> Result<T, SessionError> {
        match result {
            Err(err) if err.is_fatal() => {
                tracing::warn!(error = %err, cursor = self.cursor(), "сессия прервана");
                self.phase = SessionPhase::Aborted;
                self.publish();
                Err(err)
            }
            Err(err) => {
                if self.phase == SessionPhase::Applying {
                    self.phase = SessionPhase::AwaitingAction;
                }
                Err(err)
            }
            ok => ok,
        }
    }

    fn publish(&mut self) {
        self.snapshot = Arc::new(Snapshot::capture(
            &self.engine,
            &self.registry,
            &self.log,
            self.cursor(),
            self.interpreter.script().len(),
        ));
    }
}

use std::sync::Arc;

use crate::domain::Chips;
use crate::engine::{ActionKind, HoldemFactory, RulesEngineFactory};
use crate::infra::{DeterministicRng, RngSeed};
use crate::orchestrator::{
    ActionRequest, AdvanceOutcome, AgentId, Script, Session, SessionConfig, SessionError, Snapshot,
};

use super::commands::{Command, CommandResponse, LoadGameCommand, MakeMoveCommand};
use super::errors::ApiError;
use super::queries::{Query, QueryResponse};

/// Стол: текущая сессия (если игра загружена) и настройки.
///
/// Каждая загрузка получает свой RNG-поток `seed.derive(номер загрузки)`,
/// так что весь прогон воспроизводится по базовому seed.
pub struct PokerTable<F: RulesEngineFactory = HoldemFactory> {
    factory: F,
    config: SessionConfig,
    seed: RngSeed,
    loads: u64,
    session: Option<Session<F::Engine, DeterministicRng>>,
}

impl PokerTable<HoldemFactory> {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_factory(HoldemFactory::default(), config)
    }
}

impl Default for PokerTable<HoldemFactory> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<F: RulesEngineFactory> PokerTable<F> {
    pub fn with_factory(factory: F, config: SessionConfig) -> Self {
        let seed = match config.seed {
            Some(seed) => RngSeed::from_u64(seed),
            None => RngSeed::from_bytes(rand::random()),
        };
        Self {
            factory,
            config,
            seed,
            loads: 0,
            session: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session<F::Engine, DeterministicRng>> {
        self.session.as_ref()
    }

    /// Без загруженной игры мест нет вовсе.
    pub fn register_agent(&mut self) -> Result<AgentId, ApiError> {
        match self.session.as_mut() {
            Some(session) => Ok(session.register_agent()?),
            None => Err(SessionError::CapacityExceeded { required: 0 }.into()),
        }
    }

    pub fn clear_agents(&mut self) -> Result<(), ApiError> {
        match self.session.as_mut() {
            Some(session) => Ok(session.clear_agents()?),
            None => Ok(()),
        }
    }

    /// Загрузить новую игру. Старая сессия уничтожается в любом случае:
    /// при ошибке загрузки стол остаётся без игры.
    pub fn load_specific_game(
        &mut self,
        script: &str,
        stacks: &[u64],
        agent_count: usize,
    ) -> Result<Arc<Snapshot>, ApiError> {
        self.session = None;

        let script: Script = script.parse().map_err(SessionError::from)?;
        let stacks = stacks.iter().map(|&s| Chips(s)).collect();
        let rng = self.seed.derive(self.loads).to_rng();
        self.loads += 1;

        let session = Session::load(&self.factory, script, stacks, agent_count, &self.config, rng)?;
        let snapshot = session.snapshot();
        self.session = Some(session);
        Ok(snapshot)
    }

    pub fn make_move(&mut self, identifier: &str, action: &str, amount: Option<u64>) -> Result<Arc<Snapshot>, ApiError> {
        let agent: AgentId = identifier.parse().map_err(ApiError::BadRequest)?;
        let kind: ActionKind = action.parse().map_err(ApiError::BadRequest)?;
        let session = self.session.as_mut().ok_or(ApiError::NoGameLoaded)?;

        let request = ActionRequest {
            agent,
            kind,
            amount: amount.map(Chips),
        };
        Ok(session.submit_action(request)?)
    }

    pub fn advance_script(&mut self) -> Result<AdvanceOutcome, ApiError> {
        let session = self.session.as_mut().ok_or(ApiError::NoGameLoaded)?;
        Ok(session.advance_script()?)
    }

    pub fn get_state(&self) -> Result<Arc<Snapshot>, ApiError> {
        self.session
            .as_ref()
            .map(|s| s.snapshot())
            .ok_or(ApiError::NoGameLoaded)
    }

    /// Без загруженной игры – false.
    pub fn is_terminal(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_terminal())
    }

    /// Выполнить команду.
    pub fn execute(&mut self, command: Command) -> Result<CommandResponse, ApiError> {
        match command {
            Command::RegisterAgent => self.register_agent().map(CommandResponse::AgentRegistered),
            Command::ClearAgents => self.clear_agents().map(|_| CommandResponse::Ok),
            Command::LoadSpecificGame(LoadGameCommand {
                script,
                stacks,
                agent_count,
            }) => self
                .load_specific_game(&script, &stacks, agent_count)
                .map(|s| CommandResponse::GameLoaded((*s).clone())),
            Command::MakeMove(MakeMoveCommand {
                identifier,
                action,
                amount,
            }) => self
                .make_move(&identifier, &action, amount)
                .map(|s| CommandResponse::State((*s).clone())),
            Command::AdvanceScript => self.advance_script().map(CommandResponse::Advanced),
        }
    }

    /// Выполнить запрос "только чтение".
    pub fn query(&self, query: Query) -> Result<QueryResponse, ApiError> {
        match query {
            Query::GetState => self.get_state().map(|s| QueryResponse::State((*s).clone())),
            Query::IsTerminal => Ok(QueryResponse::Terminal(self.is_terminal())),
        }
    }
}

//! Интерпретатор скрипта: проигрывает шаги через движок правил до ближайшего
//! хода агента или до конца раздачи.

use crate::domain::{Card, Chips, PlayerNumber};
use crate::engine::{ActionKind, RandomSource, RulesEngine, RulesError};
use crate::orchestrator::action_log::{ActionLog, ActionOrigin, LogEntryKind};
use crate::orchestrator::config::{SessionConfig, StallPolicy};
use crate::orchestrator::errors::ScriptError;
use crate::orchestrator::script::{DealTarget, Script, ScriptedAction, Step};

/// Позиция в скрипте. Только растёт и не выходит за длину скрипта.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptCursor {
    position: usize,
    len: usize,
}

impl ScriptCursor {
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.len
    }

    pub fn peek<'a>(&self, script: &'a Script) -> Option<&'a Step> {
        script.step(self.position)
    }

    pub fn advance(&mut self) {
        if self.position < self.len {
            self.position += 1;
        }
    }
}

/// Чем закончился прогон интерпретатора.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpreterYield {
    /// Курсор стоит на ходе агента.
    AgentTurn,
    Terminal,
}

#[derive(Clone, Debug)]
pub struct Interpreter {
    script: Script,
    cursor: ScriptCursor,
    follow_script: bool,
    stall_policy: StallPolicy,
}

impl Interpreter {
    pub fn new(script: Script, config: &SessionConfig) -> Self {
        let cursor = ScriptCursor::new(script.len());
        Self {
            script,
            cursor,
            follow_script: config.follow_script,
            stall_policy: config.stall_policy,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn cursor(&self) -> ScriptCursor {
        self.cursor
    }

    /// Гнать шаги, пока не встретится ход агента или раздача не закончится.
    pub fn run<E: RulesEngine, R: RandomSource>(
        &mut self,
        engine: &mut E,
        rng: &mut R,
        log: &mut ActionLog,
    ) -> Result<InterpreterYield, ScriptError> {
        loop {
            if engine.is_terminal() {
                return Ok(InterpreterYield::Terminal);
            }

            let at = self.cursor.position();
            let Some(step) = self.cursor.peek(&self.script).cloned() else {
                tracing::warn!(cursor = at, "скрипт закончился раньше раздачи");
                return Err(ScriptError::ScriptExhausted { cursor: at });
            };

            match step {
                Step::AgentTurn => return Ok(InterpreterYield::AgentTurn),
                Step::Deal { target, cards } => self.deal(engine, target, cards, log)?,
                Step::Action(action) if self.follow_script => self.play_literal(engine, action, log)?,
                Step::Action(_) => self.improvise(engine, rng, log)?,
            }
            self.cursor.advance();
        }
    }

    /// Ближайший шаг, требующий решения: раздачи карманных карт пропускаются,
    /// всё остальное (ход агента, действие, борд) возвращается как есть.
    pub fn next_decision(&self) -> Option<&Step> {
        self.script.steps()[self.cursor.position()..].iter().find(|step| {
            !matches!(
                step,
                Step::Deal {
                    target: DealTarget::Hole(_),
                    ..
                }
            )
        })
    }

    /// Раздать карманные карты, стоящие перед ходом агента.
    pub fn apply_pending_holes<E: RulesEngine>(&mut self, engine: &mut E, log: &mut ActionLog) -> Result<(), ScriptError> {
        while let Some(Step::Deal {
            target: target @ DealTarget::Hole(_),
            cards,
        }) = self.cursor.peek(&self.script).cloned()
        {
            self.deal(engine, target, cards, log)?;
            self.cursor.advance();
        }
        Ok(())
    }

    /// Ход агента разрешён – курсор уходит с шага `AgentTurn`.
    pub fn complete_agent_turn(&mut self) {
        if matches!(self.cursor.peek(&self.script), Some(Step::AgentTurn)) {
            self.cursor.advance();
        }
    }

    fn rejected(&self, source: RulesError) -> ScriptError {
        let cursor = self.cursor.position();
        tracing::warn!(cursor, error = %source, "шаг скрипта не согласуется с игрой");
        ScriptError::StepRejected { cursor, source }
    }

    fn deal<E: RulesEngine>(
        &self,
        engine: &mut E,
        target: DealTarget,
        cards: Option<Vec<Card>>,
        log: &mut ActionLog,
    ) -> Result<(), ScriptError> {
        let dealt = match target {
            DealTarget::Hole(player) => {
                let seat = player
                    .seat()
                    .ok_or_else(|| self.rejected(RulesError::InvalidSeat(0)))?;
                engine.deal_hole(seat, cards)
            }
            DealTarget::Board(street) => engine.deal_board(street, cards),
        }
        .map_err(|e| self.rejected(e))?;

        tracing::debug!(cursor = self.cursor.position(), ?target, "карты розданы");
        log.push(engine.street(), LogEntryKind::Dealt { target, cards: dealt });
        Ok(())
    }

    fn play_literal<E: RulesEngine>(
        &self,
        engine: &mut E,
        action: ScriptedAction,
        log: &mut ActionLog,
    ) -> Result<(), ScriptError> {
        self.act(engine, action.kind(), action.amount(), ActionOrigin::Script, log)
    }

    fn improvise<E: RulesEngine, R: RandomSource>(
        &self,
        engine: &mut E,
        rng: &mut R,
        log: &mut ActionLog,
    ) -> Result<(), ScriptError> {
        let actor = engine.current_actor().map(PlayerNumber::from_seat);
        let legal = engine.legal_actions();

        let chosen = match self.stall_policy {
            StallPolicy::Permit => {
                let drawn = match rng.pick_index(3) {
                    0 => Some(ActionKind::Fold),
                    1 => Some(ActionKind::CheckOrCall),
                    _ => None,
                };
                drawn.filter(|kind| legal.contains(kind))
            }
            StallPolicy::GuaranteeProgress => {
                if actor.is_none() {
                    return Err(self.rejected(RulesError::NoActor));
                }
                match rng.pick_index(2) {
                    0 if legal.contains(&ActionKind::Fold) => Some(ActionKind::Fold),
                    _ => Some(ActionKind::CheckOrCall),
                }
            }
        };

        match chosen {
            Some(kind) => self.act(engine, kind, None, ActionOrigin::Improvised, log),
            None => {
                tracing::warn!(cursor = self.cursor.position(), player = ?actor, "импровизация: pass, ход не разрешён");
                log.push(engine.street(), LogEntryKind::Passed { player: actor });
                Ok(())
            }
        }
    }

    fn act<E: RulesEngine>(
        &self,
        engine: &mut E,
        kind: ActionKind,
        amount: Option<Chips>,
        origin: ActionOrigin,
        log: &mut ActionLog,
    ) -> Result<(), ScriptError> {
        let seat = engine.current_actor().ok_or_else(|| self.rejected(RulesError::NoActor))?;
        let street = engine.street();
        engine.apply(kind, amount).map_err(|e| self.rejected(e))?;

        tracing::debug!(cursor = self.cursor.position(), seat, %kind, ?amount, ?origin, "шаг скрипта применён");
        log.push(
            street,
            LogEntryKind::Acted {
                player: PlayerNumber::from_seat(seat),
                kind,
                amount,
                origin,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GameParams;
    use crate::engine::HoldemFactory;
    use crate::engine::RulesEngineFactory;
    use crate::infra::DeterministicRng;

    fn engine_for(script: &Script, stacks: &[u64]) -> crate::engine::HoldemEngine {
        let params: GameParams = script
            .header()
            .game_params(stacks.iter().map(|&s| Chips(s)).collect());
        let mut rng = DeterministicRng::from_u64(1);
        HoldemFactory::default().create_session(&params, &mut rng).unwrap()
    }

    #[test]
    fn stops_on_agent_turn_without_advancing() {
        let script: Script = "False 0 50 100 0 100\nhole 1\nhole 2\nAgent1\n".parse().unwrap();
        let mut engine = engine_for(&script, &[1000, 1000]);
        let mut interp = Interpreter::new(script, &SessionConfig::default());
        let mut log = ActionLog::new();
        let mut rng = DeterministicRng::from_u64(2);

        let y = interp.run(&mut engine, &mut rng, &mut log).unwrap();
        assert_eq!(y, InterpreterYield::AgentTurn);
        assert_eq!(interp.cursor().position(), 2);
        assert_eq!(log.len(), 2);

        // Повторный прогон стоит на месте.
        let y = interp.run(&mut engine, &mut rng, &mut log).unwrap();
        assert_eq!(y, InterpreterYield::AgentTurn);
        assert_eq!(interp.cursor().position(), 2);
    }

    #[test]
    fn literal_fold_ends_the_hand() {
        let script: Script = "False 0 50 100 0 100\nfold\ncheck\n".parse().unwrap();
        let mut engine = engine_for(&script, &[1000, 1000]);
        let mut interp = Interpreter::new(script, &SessionConfig::default());
        let mut log = ActionLog::new();
        let mut rng = DeterministicRng::from_u64(3);

        let y = interp.run(&mut engine, &mut rng, &mut log).unwrap();
        assert_eq!(y, InterpreterYield::Terminal);
        assert_eq!(engine.stacks(), vec![Chips(950), Chips(1050)]);
    }

    #[test]
    fn next_decision_skips_only_hole_deals() {
        let script: Script = "False 0 50 100 0 100\nhole 1\nflop\nAgent1\n".parse().unwrap();
        let interp = Interpreter::new(script, &SessionConfig::default());
        assert!(matches!(
            interp.next_decision(),
            Some(Step::Deal {
                target: DealTarget::Board(_),
                ..
            })
        ));
    }
}

use std::collections::BTreeSet;

use crate::domain::{Card, Chips, GameParams, PlayerStatus, SeatIndex, Street};
use crate::engine::actions::ActionKind;
use crate::engine::errors::RulesError;
use crate::engine::pot::PotShare;
use crate::engine::RandomSource;

/// Контракт движка правил, которым пользуется оркестратор.
///
/// Движок – единственный источник истины о том, чей ход и что допустимо.
/// Никакого кэширования: после любого изменяющего вызова оркестратор
/// заново спрашивает актёра и набор действий.
pub trait RulesEngine {
    /// Чей сейчас ход. None – ход ничей (ждём карты борда или раздача окончена).
    fn current_actor(&self) -> Option<SeatIndex>;

    /// Допустимые действия для текущего актёра (пусто, если актёра нет).
    fn legal_actions(&self) -> BTreeSet<ActionKind>;

    fn fold(&mut self) -> Result<(), RulesError>;

    fn check_or_call(&mut self) -> Result<(), RulesError>;

    /// Bet или raise до общей суммы ставки на улице.
    fn complete_bet_or_raise_to(&mut self, amount: Chips) -> Result<(), RulesError>;

    /// Раздать карманные карты. None – взять из колоды.
    fn deal_hole(&mut self, seat: SeatIndex, cards: Option<Vec<Card>>) -> Result<Vec<Card>, RulesError>;

    /// Открыть карты борда для улицы `street`. None – взять из колоды.
    fn deal_board(&mut self, street: Street, cards: Option<Vec<Card>>) -> Result<Vec<Card>, RulesError>;

    fn is_terminal(&self) -> bool;

    fn street(&self) -> Street;

    fn board(&self) -> Vec<Card>;

    /// Основной банк первым, дальше сайд-поты.
    fn pots(&self) -> Vec<PotShare>;

    fn stacks(&self) -> Vec<Chips>;

    fn statuses(&self) -> Vec<PlayerStatus>;

    /// Минимальная сумма "рейза до" для текущего актёра, если рейз допустим.
    fn min_raise_to(&self) -> Option<Chips>;

    /// Максимальная сумма "рейза до" (оллын), если рейз допустим.
    fn max_raise_to(&self) -> Option<Chips>;

    /// Единая точка применения действия по его виду.
    fn apply(&mut self, kind: ActionKind, amount: Option<Chips>) -> Result<(), RulesError> {
        match (kind, amount) {
            (ActionKind::Fold, _) => self.fold(),
            (ActionKind::CheckOrCall, _) => self.check_or_call(),
            (ActionKind::Raise, Some(amount)) => self.complete_bet_or_raise_to(amount),
            (ActionKind::Raise, None) => Err(RulesError::IllegalAction(ActionKind::Raise)),
        }
    }
}

/// Создание новой раздачи в движке правил.
pub trait RulesEngineFactory {
    type Engine: RulesEngine;

    fn create_session<R: RandomSource>(
        &self,
        params: &GameParams,
        rng: &mut R,
    ) -> Result<Self::Engine, RulesError>;
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::Street;
use crate::domain::params::GameParams;
use crate::domain::player::{PlayerStatus, SeatState};
use crate::domain::SeatIndex;
use crate::engine::actions::ActionKind;
use crate::engine::adapter::{RulesEngine, RulesEngineFactory};
use crate::engine::betting::BettingState;
use crate::engine::errors::RulesError;
use crate::engine::positions::{
    betting_order_after_raise, betting_order_from, count_can_bet, count_in_hand, postflop_start,
};
use crate::engine::pot::PotShare;
use crate::engine::showdown::{ShowdownResolver, SplitPotResolver};
use crate::engine::side_pots::compute_side_pots;
use crate::engine::validation::{diff_to_call, legal_actions, raise_bounds};
use crate::engine::RandomSource;

/// Фаза раздачи внутри движка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandPhase {
    /// Идёт раунд ставок, есть актёр.
    Betting,
    /// Раунд закрыт, ждём карты борда для указанной улицы.
    AwaitingBoard(Street),
    /// Банк разыгран.
    Finished,
}

/// Встроенный движок no-limit холдема: одна раздача от блайндов до выплаты.
#[derive(Clone, Debug)]
pub struct HoldemEngine<S = SplitPotResolver> {
    params: GameParams,
    seats: Vec<SeatState>,
    deck: Deck,
    board: Vec<Card>,
    street: Street,
    betting: BettingState,
    /// Чей сейчас ход (seat).
    current_actor: Option<SeatIndex>,
    phase: HandPhase,
    resolver: S,
}

/// Фабрика встроенного движка.
#[derive(Clone, Debug, Default)]
pub struct HoldemFactory<S = SplitPotResolver> {
    resolver: S,
}

impl<S> HoldemFactory<S> {
    pub fn with_resolver(resolver: S) -> Self {
        Self { resolver }
    }
}

impl<S: ShowdownResolver + Clone> RulesEngineFactory for HoldemFactory<S> {
    type Engine = HoldemEngine<S>;

    fn create_session<R: RandomSource>(
        &self,
        params: &GameParams,
        rng: &mut R,
    ) -> Result<Self::Engine, RulesError> {
        start_hand(params, rng, self.resolver.clone())
    }
}

/// Старт новой раздачи:
/// - тасует колоду;
/// - постит анте и блайнды/страддл;
/// - настраивает префлоп-очередь и current_actor.
pub fn start_hand<R: RandomSource, S: ShowdownResolver>(
    params: &GameParams,
    rng: &mut R,
    resolver: S,
) -> Result<HoldemEngine<S>, RulesError> {
    params.validate().map_err(RulesError::InvalidParams)?;

    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);

    let mut engine = HoldemEngine {
        params: params.clone(),
        seats: params.starting_stacks.iter().map(|&s| SeatState::new(s)).collect(),
        deck,
        board: Vec::new(),
        street: Street::Preflop,
        betting: BettingState::new(Street::Preflop, Chips::ZERO, Chips::ZERO, Vec::new()),
        current_actor: None,
        phase: HandPhase::Betting,
        resolver,
    };

    engine.post_antes();
    let last_forced = engine.post_blinds();

    let n = engine.seats.len();
    let order = betting_order_from(&engine.seats, (last_forced + 1) % n);
    engine.begin_round(order)?;

    tracing::debug!(players = n, actor = ?engine.current_actor, "раздача запущена");
    Ok(engine)
}

impl<S: ShowdownResolver> HoldemEngine<S> {
    pub fn phase(&self) -> HandPhase {
        self.phase
    }

    pub fn seats(&self) -> &[SeatState] {
        &self.seats
    }

    pub fn betting(&self) -> &BettingState {
        &self.betting
    }

    pub fn params(&self) -> &GameParams {
        &self.params
    }

    /// Анте. При uniform_antes все платят одинаково – не больше самого короткого стека.
    fn post_antes(&mut self) {
        let ante = self.params.ante;
        if ante.is_zero() {
            return;
        }
        let per_player = if self.params.uniform_antes {
            let shortest = self.seats.iter().map(|s| s.stack).min().unwrap_or(Chips::ZERO);
            ante.min(shortest)
        } else {
            ante
        };
        for seat in self.seats.iter_mut() {
            seat.commit(per_player);
        }
    }

    /// Блайнды и страддл по порядку мест: 0 – SB, 1 – BB, 2 – страддл.
    /// Возвращает место последней обязательной ставки.
    fn post_blinds(&mut self) -> SeatIndex {
        let blinds = self.params.blinds;
        let mut forced = vec![(0, blinds.small_blind), (1, blinds.big_blind)];
        if !blinds.straddle.is_zero() {
            forced.push((2, blinds.straddle));
        }

        let mut last = 0;
        let mut nominal = Chips::ZERO;
        for (seat, amount) in forced {
            let player = &mut self.seats[seat];
            let paid = player.commit(amount);
            player.street_bet += paid;
            nominal = nominal.max(amount);
            last = seat;
        }

        self.betting.current_bet = nominal;
        self.betting.last_raise_size = nominal;
        self.betting.last_aggressor = Some(last);
        last
    }

    /// Запустить раунд ставок с заданной очередью.
    /// Если играть некому (все в оллыне или уравнено) – раунд сразу закрывается.
    fn begin_round(&mut self, to_act: Vec<SeatIndex>) -> Result<(), RulesError> {
        self.phase = HandPhase::Betting;
        self.betting.to_act = to_act;
        if self.betting.is_round_complete() || self.round_settled() {
            self.finish_round()
        } else {
            self.current_actor = self.betting.to_act.first().copied();
            Ok(())
        }
    }

    /// Раунд можно закрывать: ставить может не больше одного игрока и он уже уравнял.
    fn round_settled(&self) -> bool {
        match count_can_bet(&self.seats) {
            0 => true,
            1 => self
                .seats
                .iter()
                .filter(|s| s.can_bet())
                .all(|s| s.street_bet >= self.betting.current_bet),
            _ => false,
        }
    }

    fn require_actor(&self) -> Result<SeatIndex, RulesError> {
        if self.phase == HandPhase::Finished {
            return Err(RulesError::Terminal);
        }
        self.current_actor.ok_or(RulesError::NoActor)
    }

    fn require_legal(&self, kind: ActionKind) -> Result<SeatIndex, RulesError> {
        let actor = self.require_actor()?;
        if !self.legal_actions().contains(&kind) {
            return Err(RulesError::IllegalAction(kind));
        }
        Ok(actor)
    }

    /// Общий хвост после любого действия: уход из очереди, авто-победа,
    /// закрытие раунда или передача хода.
    fn after_action(&mut self, seat: SeatIndex) -> Result<(), RulesError> {
        self.betting.mark_acted(seat);

        if count_in_hand(&self.seats) == 1 {
            self.award_uncontested();
            return Ok(());
        }

        let seats = &self.seats;
        self.betting.to_act.retain(|&s| seats[s].can_bet());

        if self.betting.is_round_complete() || self.round_settled() {
            self.finish_round()
        } else {
            self.current_actor = self.betting.to_act.first().copied();
            Ok(())
        }
    }

    /// Закрыть улицу: обнулить ставки, дальше – ждать борд или шоудаун.
    fn finish_round(&mut self) -> Result<(), RulesError> {
        for seat in self.seats.iter_mut() {
            seat.street_bet = Chips::ZERO;
        }
        self.betting.to_act.clear();
        self.current_actor = None;

        if self.street == Street::River {
            self.showdown()
        } else {
            let next = self.street.next();
            tracing::debug!(street = %next, "раунд ставок закрыт, ждём борд");
            self.phase = HandPhase::AwaitingBoard(next);
            Ok(())
        }
    }

    /// Все, кроме одного, сфолдили – он забирает всё без шоудауна.
    fn award_uncontested(&mut self) {
        let total: Chips = self.seats.iter().map(|s| s.contributed).sum();
        if let Some(winner) = self.seats.iter_mut().find(|s| s.is_in_hand()) {
            winner.stack += total;
        }
        self.betting.to_act.clear();
        self.current_actor = None;
        self.phase = HandPhase::Finished;
        tracing::debug!(pot = %total, "банк забран без шоудауна");
    }

    /// Шоудаун: выплаты считаем целиком, и только потом применяем.
    fn showdown(&mut self) -> Result<(), RulesError> {
        self.street = Street::Showdown;
        let pots = compute_side_pots(&self.seats);

        let mut payouts = Vec::new();
        for pot in &pots {
            let awards = self.resolver.award(pot, &self.seats, &self.board);
            let paid: Chips = awards.iter().map(|(_, c)| *c).sum();
            if paid != pot.amount {
                return Err(RulesError::Internal("выплаты не совпадают с размером банка"));
            }
            payouts.extend(awards);
        }

        for (seat, amount) in payouts {
            let player = self.seats.get_mut(seat).ok_or(RulesError::InvalidSeat(seat))?;
            player.stack += amount;
        }

        self.phase = HandPhase::Finished;
        tracing::debug!(pots = pots.len(), "шоудаун разыгран");
        Ok(())
    }

    /// Взять из колоды либо конкретные карты, либо `count` сверху.
    fn take_cards(&mut self, cards: Option<Vec<Card>>, count: usize) -> Result<Vec<Card>, RulesError> {
        match cards {
            Some(cards) => {
                if cards.len() != count {
                    return Err(RulesError::WrongCardCount {
                        expected: count,
                        got: cards.len(),
                    });
                }
                // Сначала проверяем всё, чтобы не снять половину карт.
                for (i, card) in cards.iter().enumerate() {
                    if !self.deck.cards.contains(card) || cards[..i].contains(card) {
                        return Err(RulesError::CardUnavailable(*card));
                    }
                }
                for card in &cards {
                    self.deck.take(*card);
                }
                Ok(cards)
            }
            None => self.deck.draw_n(count).ok_or(RulesError::DeckExhausted),
        }
    }
}

impl<S: ShowdownResolver> RulesEngine for HoldemEngine<S> {
    fn current_actor(&self) -> Option<SeatIndex> {
        match self.phase {
            HandPhase::Betting => self.current_actor,
            _ => None,
        }
    }

    fn legal_actions(&self) -> BTreeSet<ActionKind> {
        match self.current_actor() {
            Some(actor) => legal_actions(&self.seats, actor, &self.betting),
            None => BTreeSet::new(),
        }
    }

    fn fold(&mut self) -> Result<(), RulesError> {
        let actor = self.require_legal(ActionKind::Fold)?;
        self.seats[actor].status = PlayerStatus::Folded;
        self.after_action(actor)
    }

    fn check_or_call(&mut self) -> Result<(), RulesError> {
        let actor = self.require_legal(ActionKind::CheckOrCall)?;
        let to_call = diff_to_call(&self.seats[actor], &self.betting);
        let player = &mut self.seats[actor];
        let paid = player.commit(to_call);
        player.street_bet += paid;
        self.after_action(actor)
    }

    fn complete_bet_or_raise_to(&mut self, amount: Chips) -> Result<(), RulesError> {
        let actor = self.require_legal(ActionKind::Raise)?;
        let (min, max) = raise_bounds(&self.seats[actor], &self.betting, self.params.min_bet);
        if amount < min || amount > max {
            return Err(RulesError::RaiseOutOfRange { amount, min, max });
        }

        let player = &mut self.seats[actor];
        let diff = amount - player.street_bet;
        let paid = player.commit(diff);
        player.street_bet += paid;

        let increment = self.betting.last_raise_size.max(self.params.min_bet);
        let new_to_act = betting_order_after_raise(&self.seats, actor);
        self.betting.on_raise(actor, amount, increment, new_to_act);

        self.after_action(actor)
    }

    fn deal_hole(&mut self, seat: SeatIndex, cards: Option<Vec<Card>>) -> Result<Vec<Card>, RulesError> {
        if self.phase == HandPhase::Finished {
            return Err(RulesError::Terminal);
        }
        let player = self.seats.get(seat).ok_or(RulesError::InvalidSeat(seat))?;
        if !player.hole_cards.is_empty() {
            return Err(RulesError::HoleAlreadyDealt(seat));
        }
        let dealt = self.take_cards(cards, 2)?;
        self.seats[seat].hole_cards = dealt.clone();
        Ok(dealt)
    }

    fn deal_board(&mut self, street: Street, cards: Option<Vec<Card>>) -> Result<Vec<Card>, RulesError> {
        match self.phase {
            HandPhase::Finished => return Err(RulesError::Terminal),
            HandPhase::Betting => return Err(RulesError::BoardNotExpected),
            HandPhase::AwaitingBoard(expected) if expected != street => {
                return Err(RulesError::WrongStreet { expected, got: street })
            }
            HandPhase::AwaitingBoard(_) => {}
        }

        let dealt = self.take_cards(cards, street.board_cards())?;
        self.board.extend(dealt.iter().copied());
        self.street = street;
        self.betting = BettingState::new(street, Chips::ZERO, Chips::ZERO, Vec::new());

        let order = betting_order_from(&self.seats, postflop_start(self.seats.len()));
        self.begin_round(order)?;

        tracing::debug!(%street, actor = ?self.current_actor, "борд открыт");
        Ok(dealt)
    }

    fn is_terminal(&self) -> bool {
        self.phase == HandPhase::Finished
    }

    fn street(&self) -> Street {
        self.street
    }

    fn board(&self) -> Vec<Card> {
        self.board.clone()
    }

    fn pots(&self) -> Vec<PotShare> {
        if self.phase == HandPhase::Finished {
            return Vec::new();
        }
        compute_side_pots(&self.seats)
    }

    fn stacks(&self) -> Vec<Chips> {
        self.seats.iter().map(|s| s.stack).collect()
    }

    fn statuses(&self) -> Vec<PlayerStatus> {
        self.seats.iter().map(|s| s.status).collect()
    }

    fn min_raise_to(&self) -> Option<Chips> {
        let actor = self.current_actor()?;
        if !self.legal_actions().contains(&ActionKind::Raise) {
            return None;
        }
        Some(raise_bounds(&self.seats[actor], &self.betting, self.params.min_bet).0)
    }

    fn max_raise_to(&self) -> Option<Chips> {
        let actor = self.current_actor()?;
        if !self.legal_actions().contains(&ActionKind::Raise) {
            return None;
        }
        Some(raise_bounds(&self.seats[actor], &self.betting, self.params.min_bet).1)
    }
}

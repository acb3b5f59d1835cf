//! Движок правил: контракт, которым пользуется оркестратор, и встроенная
//! реализация no-limit холдема.
//!
//! Высокоуровневый объект: `HoldemEngine` (создаётся через `HoldemFactory`)
//! Основные операции:
//!   - `start_hand` – анте, блайнды, префлоп-очередь
//!   - `fold` / `check_or_call` / `complete_bet_or_raise_to` – действия актёра
//!   - `deal_hole` / `deal_board` – раздача карт по команде скрипта

pub mod actions;
pub mod adapter;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod positions;
pub mod pot;
pub mod showdown;
pub mod side_pots;
pub mod validation;

pub use actions::ActionKind;
pub use adapter::{RulesEngine, RulesEngineFactory};
pub use errors::RulesError;
pub use game_loop::{start_hand, HandPhase, HoldemEngine, HoldemFactory};
pub use pot::PotShare;
pub use showdown::{ShowdownResolver, SplitPotResolver};
pub use side_pots::compute_side_pots;

/// RNG интерфейс для движка и интерпретатора скриптов.
/// Реализации – в infra (обёртки над `rand`), в тестах – свои.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерный индекс в диапазоне 0..len (len > 0).
    fn pick_index(&mut self, len: usize) -> usize;
}

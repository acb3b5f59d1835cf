//! Доменная модель: фишки, карты, колода, улицы, места и параметры раздачи.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod params;
pub mod player;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use params::*;
pub use player::*;

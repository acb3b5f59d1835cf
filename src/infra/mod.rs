//! Инфраструктурный слой вокруг оркестратора:
//! - RNG-реализации для движка и импровизации;
//! - доменное расширение seed на каждую загрузку игры.

pub mod rng;
pub mod rng_seed;

pub use rng::*;
pub use rng_seed::RngSeed;

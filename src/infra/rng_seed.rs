//! RngSeed — доменный seed для RNG сессий.
//!
//! Позволяет:
//!   - хранить базовый seed (u64 или [u8;32])
//!   - делать детерминированное hash-reseeding на каждую загрузку игры:
//!         new = H(domain || base || load_index)
//!   - создавать DeterministicRng из seed
//!
//! Так каждая загруженная игра получает свой поток случайности,
//! а весь прогон целиком воспроизводится по одному базовому seed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    /// Создать seed из 32 байт.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (для удобства тестов и конфига).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Seed для загрузки номер `load_index`.
    pub fn derive(&self, load_index: u64) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(b"POKER_ORCHESTRATOR_RNG_V1");
        hasher.update(self.bytes);
        hasher.update(load_index.to_le_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());

        Self { bytes: out }
    }

    /// Создать DeterministicRng из seed.
    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.bytes)
    }
}

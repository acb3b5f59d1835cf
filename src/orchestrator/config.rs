use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Как импровизация поступает с ходами, которые ничего не меняют.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StallPolicy {
    /// Равновероятно fold / check-or-call / pass. Pass и недопустимый fold
    /// оставляют ход неразрешённым, зависание ловится как `ScriptExhausted`.
    Permit,
    /// Равновероятно fold / check-or-call. Недопустимый fold заменяется на
    /// check-or-call, так что каждый шаг применяет ровно одно действие.
    #[default]
    GuaranteeProgress,
}

/// Настройки сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// true – заскриптованные действия применяются как написано,
    /// false – вместо них импровизация.
    pub follow_script: bool,
    pub stall_policy: StallPolicy,
    /// Базовый seed. None – случайный при создании стола.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            follow_script: true,
            stall_policy: StallPolicy::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось разобрать конфигурацию: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionConfig {
    /// Разбор из JSON, недостающие поля берутся по умолчанию.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn improvising(stall_policy: StallPolicy) -> Self {
        Self {
            follow_script: false,
            stall_policy,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg = SessionConfig::from_json_str(r#"{"follow_script": false}"#).unwrap();
        assert!(!cfg.follow_script);
        assert_eq!(cfg.stall_policy, StallPolicy::GuaranteeProgress);
        assert_eq!(cfg.seed, None);

        let cfg = SessionConfig::from_json_str(r#"{"stall_policy": "permit", "seed": 7}"#).unwrap();
        assert!(cfg.follow_script);
        assert_eq!(cfg.stall_policy, StallPolicy::Permit);
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn unknown_policy_is_an_error() {
        assert!(SessionConfig::from_json_str(r#"{"stall_policy": "never"}"#).is_err());
    }
}

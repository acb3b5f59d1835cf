use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orchestrator::{ErrorClass, SessionError};

/// Ошибки внешнего API (то, что отдаём клиенту).
///
/// Каждый класс ошибок сессии несёт стабильный код причины и текст.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (битый идентификатор, неизвестное действие).
    #[error("некорректный запрос: {0}")]
    BadRequest(String),

    #[error("игра не загружена")]
    NoGameLoaded,

    /// Регистрация не совпадает с требованием скрипта.
    #[error("{message}")]
    Capacity { reason: String, message: String },

    /// Запрос отклонён, состояние не изменилось.
    #[error("{message}")]
    Rejected { reason: String, message: String },

    /// Раздача закончена или сессия прервана.
    #[error("{message}")]
    Terminal { reason: String, message: String },

    /// Скрипт или движок в несогласованном состоянии, сессия прервана.
    #[error("{message}")]
    Fatal { reason: String, message: String },

    #[error("{0}")]
    InvalidSetup(String),
}

impl ApiError {
    /// Машинный код причины.
    pub fn reason(&self) -> &str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::NoGameLoaded => "no_game_loaded",
            ApiError::InvalidSetup(_) => "invalid_setup",
            ApiError::Capacity { reason, .. }
            | ApiError::Rejected { reason, .. }
            | ApiError::Terminal { reason, .. }
            | ApiError::Fatal { reason, .. } => reason,
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let reason = err.reason_code().to_string();
        let message = err.to_string();
        match err.class() {
            ErrorClass::Capacity => ApiError::Capacity { reason, message },
            ErrorClass::TurnOrLegality => ApiError::Rejected { reason, message },
            ErrorClass::Terminal => ApiError::Terminal { reason, message },
            ErrorClass::ScriptIntegrity | ErrorClass::Internal => ApiError::Fatal { reason, message },
            ErrorClass::Setup => ApiError::InvalidSetup(message),
        }
    }
}

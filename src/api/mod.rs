//! Внешний API оркестратора.
//!
//! Здесь описываются:
//! - команды (commands.rs) – всё, что меняет состояние (регистрация, загрузка, ход);
//! - запросы (queries.rs) – только чтение;
//! - ошибки (errors.rs) – то, что видит клиент;
//! - стол (table.rs) – фасад, владеющий текущей сессией.

pub mod commands;
pub mod errors;
pub mod queries;
pub mod table;

pub use commands::*;
pub use errors::*;
pub use queries::*;
pub use table::PokerTable;

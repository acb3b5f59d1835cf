//! Формат скрипта раздачи.
//!
//! Первая строка – заголовок из шести токенов:
//! `True|False ante small_blind big_blind straddle min_bet`.
//! Дальше по одному шагу на строку:
//! - любой токен с подстрокой `Agent` – ход живого агента;
//! - `hole <игрок> [карты]`, `flop [карты]`, `turn [карта]`, `river [карта]` – раздача;
//! - `check`, `call`, `fold`, `raise <сумма>` – заскриптованное действие
//!   (регистр ключевого слова не важен).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{parse_cards, BlindsOrStraddles, Card, Chips, GameParams, PlayerNumber, Street};
use crate::engine::ActionKind;
use crate::orchestrator::errors::ScriptError;

/// Заголовок скрипта: всё для создания раздачи, кроме стеков.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptHeader {
    pub uniform_antes: bool,
    pub ante: Chips,
    pub blinds: BlindsOrStraddles,
    pub min_bet: Chips,
}

impl ScriptHeader {
    pub fn game_params(&self, starting_stacks: Vec<Chips>) -> GameParams {
        GameParams {
            uniform_antes: self.uniform_antes,
            ante: self.ante,
            blinds: self.blinds,
            min_bet: self.min_bet,
            starting_stacks,
        }
    }
}

/// Кому/куда раздаются карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DealTarget {
    Hole(PlayerNumber),
    Board(Street),
}

impl DealTarget {
    pub fn card_count(self) -> usize {
        match self {
            DealTarget::Hole(_) => 2,
            DealTarget::Board(street) => street.board_cards(),
        }
    }
}

/// Заскриптованное действие (check и call различаются только в тексте).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScriptedAction {
    Check,
    Call,
    Fold,
    RaiseTo(Chips),
}

impl ScriptedAction {
    pub fn kind(self) -> ActionKind {
        match self {
            ScriptedAction::Check | ScriptedAction::Call => ActionKind::CheckOrCall,
            ScriptedAction::Fold => ActionKind::Fold,
            ScriptedAction::RaiseTo(_) => ActionKind::Raise,
        }
    }

    pub fn amount(self) -> Option<Chips> {
        match self {
            ScriptedAction::RaiseTo(amount) => Some(amount),
            _ => None,
        }
    }
}

/// Один шаг скрипта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Step {
    /// Карты либо заданы явно, либо берутся из колоды.
    Deal {
        target: DealTarget,
        cards: Option<Vec<Card>>,
    },
    Action(ScriptedAction),
    AgentTurn,
}

/// Неизменяемый скрипт: заголовок и последовательность шагов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Script {
    header: ScriptHeader,
    steps: Vec<Step>,
    /// Номер исходной строки (с 1) для каждого шага – для сообщений об ошибках.
    lines: Vec<usize>,
}

impl Script {
    pub fn parse(text: &str) -> Result<Script, ScriptError> {
        let mut numbered = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header_text) = numbered.next().ok_or_else(|| ScriptError::InvalidScriptLine {
            line: 1,
            content: String::new(),
            reason: "пустой скрипт".into(),
        })?;
        let header = parse_header(header_text).map_err(|reason| invalid(header_line, header_text, reason))?;

        let mut steps = Vec::new();
        let mut lines = Vec::new();
        for (line_no, line) in numbered {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let step = parse_step(&tokens).map_err(|reason| invalid(line_no, line, reason))?;
            steps.push(step);
            lines.push(line_no);
        }

        Ok(Script { header, steps, lines })
    }

    pub fn header(&self) -> &ScriptHeader {
        &self.header
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn line_of(&self, index: usize) -> Option<usize> {
        self.lines.get(index).copied()
    }

    /// Сколько в скрипте ходов агентов.
    pub fn agent_turns(&self) -> usize {
        self.steps.iter().filter(|s| matches!(s, Step::AgentTurn)).count()
    }

    /// Проверка против числа игроков: все адресаты `hole` должны существовать.
    pub fn validate_for(&self, player_count: usize) -> Result<(), ScriptError> {
        for (idx, step) in self.steps.iter().enumerate() {
            if let Step::Deal {
                target: DealTarget::Hole(player),
                ..
            } = step
            {
                if player.0 as usize > player_count {
                    return Err(ScriptError::InvalidScriptLine {
                        line: self.line_of(idx).unwrap_or(0),
                        content: format!("hole {player}"),
                        reason: format!("игрока {player} нет, всего игроков {player_count}"),
                    });
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Script::parse(s)
    }
}

fn invalid(line: usize, content: &str, reason: String) -> ScriptError {
    ScriptError::InvalidScriptLine {
        line,
        content: content.trim().to_string(),
        reason,
    }
}

fn parse_header(line: &str) -> Result<ScriptHeader, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [antes, ante, sb, bb, straddle, min_bet] = tokens.as_slice() else {
        return Err(format!("в заголовке нужно 6 токенов, получено {}", tokens.len()));
    };

    let uniform_antes = match *antes {
        "True" => true,
        "False" => false,
        other => return Err(format!("флаг анте должен быть True или False, получено {other:?}")),
    };

    Ok(ScriptHeader {
        uniform_antes,
        ante: parse_chips(ante)?,
        blinds: BlindsOrStraddles {
            small_blind: parse_chips(sb)?,
            big_blind: parse_chips(bb)?,
            straddle: parse_chips(straddle)?,
        },
        min_bet: parse_chips(min_bet)?,
    })
}

fn parse_chips(token: &str) -> Result<Chips, String> {
    token
        .parse::<u64>()
        .map(Chips)
        .map_err(|_| format!("ожидалась сумма в фишках, получено {token:?}"))
}

fn parse_step(tokens: &[&str]) -> Result<Step, String> {
    if tokens.iter().any(|t| t.contains("Agent")) {
        return Ok(Step::AgentTurn);
    }

    let Some((head, args)) = tokens.split_first() else {
        return Err("пустой шаг".into());
    };

    match *head {
        "hole" => {
            let (target, rest) = args
                .split_first()
                .ok_or_else(|| "у hole не указан игрок".to_string())?;
            let target = DealTarget::Hole(parse_player(target)?);
            Ok(Step::Deal {
                target,
                cards: parse_deal_cards(rest, target.card_count())?,
            })
        }
        "flop" | "turn" | "river" => {
            let street = match *head {
                "flop" => Street::Flop,
                "turn" => Street::Turn,
                _ => Street::River,
            };
            let target = DealTarget::Board(street);
            Ok(Step::Deal {
                target,
                cards: parse_deal_cards(args, target.card_count())?,
            })
        }
        _ => parse_action(head, args).map(Step::Action),
    }
}

fn parse_action(head: &str, args: &[&str]) -> Result<ScriptedAction, String> {
    let keyword = head.to_ascii_lowercase();
    let action = match keyword.as_str() {
        "check" => ScriptedAction::Check,
        "call" => ScriptedAction::Call,
        "fold" => ScriptedAction::Fold,
        "raise" => {
            let [amount] = args else {
                return Err("raise ожидает ровно одну сумму".into());
            };
            return Ok(ScriptedAction::RaiseTo(parse_chips(amount)?));
        }
        _ => return Err(format!("неизвестный шаг {head:?}")),
    };
    if !args.is_empty() {
        return Err(format!("у {keyword} не бывает аргументов"));
    }
    Ok(action)
}

/// Игрок в `hole`: необязательный буквенный префикс и номер с 1 (`A1`, `P2`, `2`).
fn parse_player(token: &str) -> Result<PlayerNumber, String> {
    let digits = token.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    match digits.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(PlayerNumber(n)),
        _ => Err(format!("не удалось разобрать игрока {token:?}")),
    }
}

/// Карты раздачи: пусто – из колоды; иначе склеенные или через пробел.
fn parse_deal_cards(args: &[&str], expected: usize) -> Result<Option<Vec<Card>>, String> {
    if args.is_empty() {
        return Ok(None);
    }
    let cards = parse_cards(&args.concat()).map_err(|e| e.to_string())?;
    if cards.len() != expected {
        return Err(format!("нужно {expected} карт(ы), указано {}", cards.len()));
    }
    Ok(Some(cards))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_steps() {
        let script = Script::parse("False 0 50 100 0 100\nhole A1\nAgent1 turn\nCALL\nraise 300\nflop AhKd7c\n")
            .unwrap();
        let header = script.header();
        assert!(!header.uniform_antes);
        assert_eq!(header.blinds.small_blind, Chips(50));
        assert_eq!(header.blinds.big_blind, Chips(100));
        assert_eq!(header.min_bet, Chips(100));

        assert_eq!(script.len(), 5);
        assert_eq!(
            script.step(0),
            Some(&Step::Deal {
                target: DealTarget::Hole(PlayerNumber(1)),
                cards: None
            })
        );
        assert_eq!(script.step(1), Some(&Step::AgentTurn));
        assert_eq!(script.step(2), Some(&Step::Action(ScriptedAction::Call)));
        assert_eq!(script.step(3), Some(&Step::Action(ScriptedAction::RaiseTo(Chips(300)))));
        assert!(matches!(
            script.step(4),
            Some(Step::Deal { target: DealTarget::Board(Street::Flop), cards: Some(c) }) if c.len() == 3
        ));
        assert_eq!(script.agent_turns(), 1);
    }

    #[test]
    fn agent_marker_wins_over_other_keywords() {
        let script = Script::parse("True 5 50 100 0 100\nturn for Agent2\n").unwrap();
        assert_eq!(script.steps(), &[Step::AgentTurn]);
    }

    #[test]
    fn deal_keywords_are_case_sensitive() {
        let err = Script::parse("False 0 50 100 0 100\nFlop\n").unwrap_err();
        assert!(matches!(err, ScriptError::InvalidScriptLine { line: 2, .. }));
    }

    #[test]
    fn rejects_bad_lines_with_line_numbers() {
        let cases = [
            "False 0 50 100 0\n",
            "false 0 50 100 0 100\n",
            "False 0 50 100 0 100\nraise\n",
            "False 0 50 100 0 100\nraise lots\n",
            "False 0 50 100 0 100\ncheck now\n",
            "False 0 50 100 0 100\nflop AhKd\n",
            "False 0 50 100 0 100\nhole\n",
            "False 0 50 100 0 100\nshuffle\n",
        ];
        for text in cases {
            assert!(
                matches!(Script::parse(text), Err(ScriptError::InvalidScriptLine { .. })),
                "должно падать: {text:?}"
            );
        }
    }

    #[test]
    fn hole_target_must_exist() {
        let script = Script::parse("False 0 50 100 0 100\nhole P3\n").unwrap();
        assert!(script.validate_for(3).is_ok());
        assert!(matches!(
            script.validate_for(2),
            Err(ScriptError::InvalidScriptLine { line: 2, .. })
        ));
    }
}

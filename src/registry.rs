use crate::aggregate::apply_classified;
use crate::classify::classify;
use crate::state::MatchState;
use indexmap::IndexMap;
use log::{error, info};

pub const KEY_PREFIX: &str = "game_";

pub fn match_key(ordinal: u32) -> String {
    std::format!("{}{}", KEY_PREFIX, ordinal)
}

/// Match key -> state, in the order matches were encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct MatchRegistry {
    matches: IndexMap<String, MatchState>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        MatchRegistry::default()
    }

    pub fn get(&self, key: &str) -> Option<&MatchState> {
        self.matches.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.matches.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MatchState)> {
        self.matches.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Overwriting an existing key keeps its position.
    fn store(&mut self, key: String, state: MatchState) {
        self.matches.insert(key, state);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub match_starts: usize,
    pub unchanged: usize,
}

/**
 * Folds lines into a registry. One driver per parse: the match ordinal
 * starts at 1 and is bumped by every `InitGame`, including the first one,
 * so the first real match lands under `game_2`.
 */
pub struct Driver {
    ordinal: u32,
    registry: MatchRegistry,
    stats: ParseStats,
}

impl Default for Driver {
    fn default() -> Self {
        Driver::new()
    }
}

impl Driver {
    pub fn new() -> Self {
        Driver {
            ordinal: 1,
            registry: MatchRegistry::new(),
            stats: ParseStats::default(),
        }
    }

    pub fn current_key(&self) -> String {
        match_key(self.ordinal)
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    pub fn registry(&self) -> &MatchRegistry {
        &self.registry
    }

    pub fn push_line(&mut self, line: &str) {
        self.stats.lines += 1;
        let class = classify(line);
        if class.match_start {
            self.ordinal += 1;
            self.stats.match_starts += 1;
            self.registry.store(self.current_key(), MatchState::empty());
            return;
        }
        let key = self.current_key();
        let empty = MatchState::empty();
        let previous = self.registry.get(&key).unwrap_or(&empty);
        let next = apply_classified(line, class, previous);
        if !class.is_other() && next == *previous {
            self.stats.unchanged += 1;
        }
        self.registry.store(key, next);
    }

    pub fn finish(self) -> MatchRegistry {
        info!(
            "Processed {} lines: {} matches started, {} lines without effect",
            self.stats.lines, self.stats.match_starts, self.stats.unchanged
        );
        self.registry
    }
}

/**
 * Builds the registry for one stream of lines. If the stream itself fails
 * the error is reported once and an empty registry comes back rather than
 * whatever was accumulated so far.
 */
pub fn parse_lines<I>(lines: I) -> MatchRegistry
where
    I: IntoIterator<Item = std::io::Result<String>>,
{
    let mut driver = Driver::new();
    for input_line in lines {
        match input_line {
            Ok(line) => driver.push_line(&line),
            Err(e) => {
                error!(
                    "Could not read line {} of input: {}",
                    driver.stats().lines + 1,
                    crate::error::FragError::from(e)
                );
                return MatchRegistry::new();
            }
        }
    }
    driver.finish()
}

mod test {
    #[test]
    fn test_single_match() {
        use super::parse_lines;
        use claim::assert_some;
        let lines = vec![
            "InitGame: ...",
            "ClientUserinfoChanged: 2 n\\Dono\\t\\0",
            "Kill: 1022 2 22: <world> killed Dono by MOD_TRIGGER_HURT",
        ];
        let registry = parse_lines(lines.into_iter().map(|l| Ok(l.to_string())));
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["game_2"]);
        assert_some!(registry.get("game_2"));
        let game = registry.get("game_2").unwrap();
        assert_eq!(game.players.iter().collect::<Vec<_>>(), vec!["Dono"]);
        assert_eq!(game.total_kills, 1);
        assert_eq!(game.kills.iter().collect::<Vec<_>>(), vec![("Dono", 1)]);
        assert_eq!(
            game.kills_by_cause.iter().collect::<Vec<_>>(),
            vec![("MOD_TRIGGER_HURT", 1)]
        );
        assert_eq!(game.ranking, vec!["Dono"]);
    }

    #[test]
    fn test_back_to_back_match_starts() {
        use super::{parse_lines, MatchState};
        let lines = vec!["  0:00 InitGame: \\a\\b", "  0:01 InitGame: \\a\\b"];
        let registry = parse_lines(lines.into_iter().map(|l| Ok(l.to_string())));
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["game_2", "game_3"]);
        for (_, state) in registry.iter() {
            assert_eq!(*state, MatchState::empty());
        }
    }

    #[test]
    fn test_lines_before_first_match_go_to_game_1() {
        use super::parse_lines;
        let lines = vec![
            "  0:00 ------------------------------------------------------------",
            "  0:00 InitGame: \\a\\b",
        ];
        let registry = parse_lines(lines.into_iter().map(|l| Ok(l.to_string())));
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["game_1", "game_2"]);
    }

    #[test]
    fn test_same_victim_twice() {
        use super::parse_lines;
        use claim::assert_some_eq;
        let lines = vec![
            "InitGame:",
            "Kill: 2 3 7: Isgalamido killed Mocinha by MOD_ROCKET",
            "Kill: 3 2 6: Mocinha killed Isgalamido by MOD_ROCKET",
            "Kill: 2 3 7: Isgalamido killed Mocinha by MOD_RAILGUN",
        ];
        let registry = parse_lines(lines.into_iter().map(|l| Ok(l.to_string())));
        let game = registry.get("game_2").unwrap();
        assert_some_eq!(game.kills.get("Mocinha"), 2);
        assert_eq!(game.total_kills, 3);
        assert_eq!(game.ranking, vec!["Mocinha", "Isgalamido"]);
    }

    #[test]
    fn test_malformed_kill_leaves_registry_alone() {
        use super::Driver;
        let mut driver = Driver::new();
        driver.push_line("InitGame:");
        driver.push_line("Kill: 2 3 7: Isgalamido killed Mocinha by MOD_ROCKET");
        let before = driver.registry().clone();
        driver.push_line("Kill: 2 3 7: Isgalamido killed Mocinha");
        assert_eq!(*driver.registry(), before);
        assert_eq!(driver.stats().unchanged, 1);
    }

    #[test]
    fn test_read_error_yields_empty_registry() {
        use super::parse_lines;
        use std::io::{Error, ErrorKind};
        let lines: Vec<std::io::Result<String>> = vec![
            Ok("InitGame:".to_string()),
            Ok("Kill: 2 3 7: Isgalamido killed Mocinha by MOD_ROCKET".to_string()),
            Err(Error::new(ErrorKind::InvalidData, "stream did not contain valid UTF-8")),
        ];
        assert!(parse_lines(lines).is_empty());
    }

    #[test]
    fn test_fresh_driver_restarts_numbering() {
        use super::parse_lines;
        let run = || parse_lines(vec![Ok("InitGame:".to_string())]);
        assert_eq!(run().keys().collect::<Vec<_>>(), vec!["game_2"]);
        assert_eq!(run().keys().collect::<Vec<_>>(), vec!["game_2"]);
    }

    #[test]
    fn test_many_matches_keep_encounter_order() {
        use super::{match_key, parse_lines};
        let lines = (0..20_000).flat_map(|i| -> Vec<std::io::Result<String>> {
            vec![
                Ok("  0:00 InitGame: \\a\\b".to_string()),
                Ok(std::format!("  0:01 Kill: 1022 2 22: <world> killed P{} by MOD_FALLING", i)),
                Ok("  0:02 ShutdownGame:".to_string()),
            ]
        });
        let registry = parse_lines(lines);
        assert_eq!(registry.len(), 20_000);
        let keys: Vec<String> = registry.keys().map(String::from).collect();
        let expected: Vec<String> = (2..20_002).map(match_key).collect();
        assert_eq!(keys, expected);
        let last = registry.get("game_20001").unwrap();
        assert_eq!(last.ranking, vec!["P19999"]);
        assert_eq!(last.total_kills, 1);
    }
}

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

/// A name -> count map that remembers first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Tally {
    counts: IndexMap<String, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Tally::default()
    }

    pub fn increment(&mut self, name: &str) -> u64 {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.counts.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(n, c)| (n.as_str(), *c))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(|n| n.as_str())
    }

    /// Names by count, highest first. Ties keep insertion order.
    pub fn ranked(&self) -> Vec<String> {
        self.counts
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1))
            .map(|(n, _)| n.clone())
            .collect()
    }
}

/**
 * Everything we know about one match. `kills` is a *victim* tally:
 * it counts how often each player died, not how often they scored.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MatchState {
    pub total_kills: u64,
    pub players: IndexSet<String>,
    pub kills: Tally,
    #[serde(rename = "kills_by_means")]
    pub kills_by_cause: Tally,
    #[serde(rename = "player_ranking")]
    pub ranking: Vec<String>,
}

impl MatchState {
    pub fn empty() -> Self {
        MatchState::default()
    }

    /// Returns false if the player was already on the roster.
    pub fn add_player(&mut self, name: &str) -> bool {
        self.players.insert(name.to_string())
    }

    pub fn record_kill(&mut self, victim: &str, cause: &str) {
        self.total_kills += 1;
        self.kills_by_cause.increment(cause);
        self.kills.increment(victim);
        self.ranking = self.kills.ranked();
    }
}

mod test {
    #[test]
    fn test_tally_keeps_insertion_order() {
        use super::Tally;
        let mut t = Tally::new();
        t.increment("MOD_RAILGUN");
        t.increment("MOD_FALLING");
        t.increment("MOD_RAILGUN");
        assert_eq!(t.keys().collect::<Vec<_>>(), vec!["MOD_RAILGUN", "MOD_FALLING"]);
        assert_eq!(t.get("MOD_RAILGUN"), Some(2));
        assert_eq!(t.get("MOD_SHOTGUN"), None);
        assert_eq!(t.total(), 3);
    }

    #[test]
    fn test_ranking_is_stable_on_ties() {
        use super::Tally;
        let mut t = Tally::new();
        for name in &["Zeh", "Isgalamido", "Dono", "Isgalamido", "Mal", "Dono"] {
            t.increment(name);
        }
        // Isgalamido and Dono tie at 2, Zeh and Mal tie at 1
        assert_eq!(t.ranked(), vec!["Isgalamido", "Dono", "Zeh", "Mal"]);
        assert_eq!(t.ranked(), t.ranked());
    }

    #[test]
    fn test_record_kill() {
        use super::MatchState;
        use claim::assert_some_eq;
        let mut s = MatchState::empty();
        s.record_kill("Dono", "MOD_TRIGGER_HURT");
        s.record_kill("Mocinha", "MOD_ROCKET");
        s.record_kill("Mocinha", "MOD_ROCKET");
        assert_eq!(s.total_kills, 3);
        assert_some_eq!(s.kills.get("Mocinha"), 2);
        assert_some_eq!(s.kills_by_cause.get("MOD_ROCKET"), 2);
        assert_eq!(s.ranking, vec!["Mocinha", "Dono"]);
        assert_eq!(s.kills.total(), s.total_kills);
    }

    #[test]
    fn test_players_are_a_set() {
        use super::MatchState;
        let mut s = MatchState::empty();
        assert!(s.add_player("Dono"));
        assert!(!s.add_player("Dono"));
        assert!(s.add_player("Zeh"));
        assert_eq!(s.players.iter().collect::<Vec<_>>(), vec!["Dono", "Zeh"]);
    }

    #[test]
    fn test_serialized_field_names() {
        use super::MatchState;
        let mut s = MatchState::empty();
        s.add_player("Dono");
        s.record_kill("Dono", "MOD_TRIGGER_HURT");
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "total_kills": 1,
                "players": ["Dono"],
                "kills": {"Dono": 1},
                "kills_by_means": {"MOD_TRIGGER_HURT": 1},
                "player_ranking": ["Dono"],
            })
        );
    }
}

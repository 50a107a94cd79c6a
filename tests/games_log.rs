use claim::{assert_none, assert_some_eq};
use frag_tools::report::{render, Format};
use frag_tools::{parse_lines, MatchRegistry};
use std::fs::File;
use std::io::{BufRead, BufReader};

fn load() -> MatchRegistry {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/games.log");
    let f = File::open(path).unwrap();
    parse_lines(BufReader::new(f).lines())
}

#[test]
fn test_match_keys() {
    let registry = load();
    assert_eq!(
        registry.keys().collect::<Vec<_>>(),
        vec!["game_1", "game_2", "game_3", "game_4"]
    );
    assert_none!(registry.get("game_5"));
}

#[test]
fn test_preamble_and_quiet_match() {
    let registry = load();
    let preamble = registry.get("game_1").unwrap();
    assert_eq!(preamble.total_kills, 0);
    assert!(preamble.players.is_empty());

    let quiet = registry.get("game_2").unwrap();
    assert_eq!(quiet.players.iter().collect::<Vec<_>>(), vec!["Isgalamido"]);
    assert_eq!(quiet.total_kills, 0);
    assert!(quiet.kills.is_empty());
    assert!(quiet.ranking.is_empty());
}

#[test]
fn test_busy_match() {
    let registry = load();
    let game = registry.get("game_3").unwrap();
    assert_eq!(
        game.players.iter().collect::<Vec<_>>(),
        vec!["Isgalamido", "Dono da Bola", "Mocinha"]
    );
    // the kill line without a cause is skipped
    assert_eq!(game.total_kills, 10);
    assert_some_eq!(game.kills.get("Isgalamido"), 9);
    assert_some_eq!(game.kills.get("Mocinha"), 1);
    assert_eq!(
        game.kills_by_cause.iter().collect::<Vec<_>>(),
        vec![
            ("MOD_TRIGGER_HURT", 6),
            ("MOD_ROCKET_SPLASH", 3),
            ("MOD_FALLING", 1)
        ]
    );
    assert_eq!(game.ranking, vec!["Isgalamido", "Mocinha"]);
    assert_eq!(game.kills.total(), game.total_kills);
}

#[test]
fn test_last_match_report() {
    let registry = load();
    let value: serde_json::Value =
        serde_json::from_str(&render(&registry, Format::Compact).unwrap()).unwrap();
    assert_eq!(
        value["game_4"],
        serde_json::json!({
            "total_kills": 4,
            "players": ["Dono da Bola", "Mocinha", "Zeh"],
            "kills": {"Mocinha": 2, "Zeh": 2},
            "kills_by_means": {"MOD_RAILGUN": 3, "MOD_FALLING": 1},
            "player_ranking": ["Mocinha", "Zeh"],
        })
    );
}

#[test]
fn test_every_ranking_is_a_permutation_of_kills() {
    let registry = load();
    for (key, game) in registry.iter() {
        let mut ranked = game.ranking.clone();
        ranked.sort();
        let mut victims: Vec<String> = game.kills.keys().map(String::from).collect();
        victims.sort();
        assert_eq!(ranked, victims, "ranking mismatch in {}", key);
    }
}

use crate::classify::{classify, LineClass};
use crate::error::Result;
use crate::extract;
use crate::state::MatchState;
use log::{debug, warn};

/**
 * Computes the state that follows `previous` once `line` is seen.
 *
 * A match start always yields a fresh empty state. Any other line works
 * on a copy of `previous`; if anything on that line fails to parse the
 * whole line is dropped and `previous` comes back unchanged.
 */
pub fn apply(line: &str, previous: &MatchState) -> MatchState {
    apply_classified(line, classify(line), previous)
}

pub fn apply_classified(line: &str, class: LineClass, previous: &MatchState) -> MatchState {
    if class.match_start {
        return MatchState::empty();
    }
    if class.is_other() {
        return previous.clone();
    }
    match transition(line, class, previous) {
        Ok(next) => next,
        Err(e) => {
            warn!("Skipping line '{}': {}", line, e);
            previous.clone()
        }
    }
}

fn transition(line: &str, class: LineClass, previous: &MatchState) -> Result<MatchState> {
    let mut next = previous.clone();
    if class.player_info {
        let name = extract::player_name(line)?;
        if next.add_player(&name) {
            debug!("New player: {}", name);
        }
    }
    if class.kill {
        let kill = extract::kill(line)?;
        next.record_kill(&kill.victim, &kill.cause);
    }
    Ok(next)
}

mod test {
    #[allow(dead_code)]
    fn sample() -> super::MatchState {
        let mut s = super::MatchState::empty();
        s.add_player("Isgalamido");
        s.add_player("Mocinha");
        s.record_kill("Mocinha", "MOD_ROCKET_SPLASH");
        s
    }

    #[test]
    fn test_other_lines_are_noops() {
        use super::apply;
        let s = sample();
        for line in &[
            " 20:34 ClientConnect: 2",
            " 20:37 ClientBegin: 2",
            " 26:08 ShutdownGame:",
            "  0:00 ------------------------------------------------------------",
            "",
        ] {
            assert_eq!(apply(line, &s), s);
        }
    }

    #[test]
    fn test_match_start_resets() {
        use super::{apply, MatchState};
        let line = r"  0:00 InitGame: \sv_floodProtect\1\sv_maxPing\0\sv_minPing\0\sv_maxRate\10000";
        assert_eq!(apply(line, &sample()), MatchState::empty());
        assert_eq!(apply(line, &MatchState::empty()), MatchState::empty());
    }

    #[test]
    fn test_kill_line() {
        use super::apply;
        use claim::assert_some_eq;
        let s = sample();
        let next = apply(" 22:06 Kill: 2 3 7: Isgalamido killed Mocinha by MOD_ROCKET_SPLASH", &s);
        assert_eq!(next.total_kills, s.total_kills + 1);
        assert_some_eq!(next.kills.get("Mocinha"), 2);
        assert_some_eq!(next.kills_by_cause.get("MOD_ROCKET_SPLASH"), 2);
        let mut ranked = next.ranking.clone();
        ranked.sort();
        let mut keys: Vec<String> = next.kills.keys().map(|k| k.to_string()).collect();
        keys.sort();
        assert_eq!(ranked, keys);
        // previous is untouched
        assert_eq!(s.total_kills, 1);
    }

    #[test]
    fn test_malformed_kill_rolls_back() {
        use super::apply;
        let s = sample();
        assert_eq!(apply(" 22:06 Kill: 2 3 7: Isgalamido killed Mocinha", &s), s);
    }

    #[test]
    fn test_malformed_kill_rolls_back_player_change_on_same_line() {
        use super::apply;
        let s = sample();
        let line = r"ClientUserinfoChanged: 4 n\Zeh\t\0 Kill: 2 3 7: Zeh killed Mocinha";
        let next = apply(line, &s);
        assert_eq!(next, s);
        assert!(!next.players.contains(&"Zeh".to_string()));
    }

    #[test]
    fn test_player_and_kill_on_same_line() {
        use super::apply;
        let line = r"ClientUserinfoChanged: 4 n\Zeh\t\0 Kill: 2 3 7: Zeh killed Mocinha by MOD_SHOTGUN";
        let next = apply(line, &sample());
        assert!(next.players.contains(&"Zeh".to_string()));
        assert_eq!(next.total_kills, 2);
    }

    #[test]
    fn test_malformed_player_info_is_dropped() {
        use super::apply;
        let s = sample();
        assert_eq!(apply("ClientUserinfoChanged: 4 Zeh", &s), s);
    }

    #[test]
    fn test_malformed_player_info_drops_valid_kill_on_same_line() {
        use super::apply;
        let s = sample();
        let line = "ClientUserinfoChanged: 4 Zeh Kill: 2 3 7: Zeh killed Mocinha by MOD_SHOTGUN";
        let next = apply(line, &s);
        assert_eq!(next, s);
        assert_eq!(next.total_kills, 1);
        assert_eq!(next.kills_by_cause.get("MOD_SHOTGUN"), None);
    }

    #[test]
    fn test_repeated_player_info_is_noop() {
        use super::apply;
        let s = sample();
        let line = r" 20:38 ClientUserinfoChanged: 2 n\Isgalamido\t\0\model\uriel/zael";
        assert_eq!(apply(line, &s), s);
    }
}

pub const MATCH_START_MARKER: &str = "InitGame";
pub const PLAYER_INFO_MARKER: &str = "ClientUserinfoChanged";
pub const KILL_MARKER: &str = "Kill:";

/**
 * What a raw log line is about. A match start excludes everything else,
 * but a single line may be both a player-info change and a kill.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineClass {
    pub match_start: bool,
    pub player_info: bool,
    pub kill: bool,
}

impl LineClass {
    pub fn is_other(&self) -> bool {
        !self.match_start && !self.player_info && !self.kill
    }
}

pub fn classify(line: &str) -> LineClass {
    if line.contains(MATCH_START_MARKER) {
        return LineClass {
            match_start: true,
            ..LineClass::default()
        };
    }
    LineClass {
        match_start: false,
        player_info: line.contains(PLAYER_INFO_MARKER),
        kill: line.contains(KILL_MARKER),
    }
}

mod test {
    #[test]
    fn test_match_start_short_circuits() {
        use super::classify;
        let c = classify("  0:00 InitGame: \\sv_floodProtect\\1 Kill: ClientUserinfoChanged");
        assert!(c.match_start);
        assert!(!c.player_info);
        assert!(!c.kill);
    }

    #[test]
    fn test_player_info_and_kill_can_co_occur() {
        use super::classify;
        let c = classify("ClientUserinfoChanged: 2 n\\Dono\\t\\0 Kill: 1 2 3: a killed b by MOD_X");
        assert!(c.player_info && c.kill);
        assert!(!c.is_other());
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        use super::classify;
        assert!(classify(" 20:37 kill: 1022 2 22: <world> killed Dono by MOD_TRIGGER_HURT").is_other());
        assert!(classify(" 20:37 initgame").is_other());
        assert!(classify("  0:00 ------------------------------------------------------------").is_other());
        assert!(classify(" 20:34 ClientConnect: 2").is_other());
    }
}

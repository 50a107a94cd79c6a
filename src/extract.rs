use crate::error::{Field, FragError, Result};

const NAME_START: &str = "n\\";
const NAME_END: &str = "\\t";
const VICTIM_START: &str = "killed ";
const VICTIM_END: &str = " by";
const CAUSE_START: &str = "by ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kill {
    pub victim: String,
    pub cause: String,
}

/// Player name from a `ClientUserinfoChanged` line, e.g. `2 n\Dono\t\0\model\...`.
pub fn player_name(line: &str) -> Result<String> {
    let start = line
        .find(NAME_START)
        .map(|i| i + NAME_START.len())
        .ok_or_else(|| FragError::extraction(Field::PlayerName, line))?;
    let len = line[start..]
        .find(NAME_END)
        .ok_or_else(|| FragError::extraction(Field::PlayerName, line))?;
    Ok(line[start..start + len].to_string())
}

/**
 * Victim and cause from a `Kill:` line, e.g.
 * `Kill: 1022 2 22: <world> killed Dono by MOD_TRIGGER_HURT`.
 *
 * The killer is not extracted. Only the first occurrence of each marker
 * counts, so a name containing " by" is cut short there.
 */
pub fn kill(line: &str) -> Result<Kill> {
    let victim_start = line
        .find(VICTIM_START)
        .map(|i| i + VICTIM_START.len())
        .ok_or_else(|| FragError::extraction(Field::Victim, line))?;
    let victim_len = line[victim_start..]
        .find(VICTIM_END)
        .ok_or_else(|| FragError::extraction(Field::Victim, line))?;
    let cause_start = line
        .find(CAUSE_START)
        .map(|i| i + CAUSE_START.len())
        .ok_or_else(|| FragError::extraction(Field::Cause, line))?;
    Ok(Kill {
        victim: line[victim_start..victim_start + victim_len].to_string(),
        cause: line[cause_start..].to_string(),
    })
}

mod test {
    #[test]
    fn test_player_name() {
        use super::player_name;
        let line = r" 21:51 ClientUserinfoChanged: 3 n\Dono da Bola\t\0\model\sarge/krusade\hmodel\sarge/krusade";
        assert_eq!(player_name(line).unwrap(), "Dono da Bola");
    }

    #[test]
    fn test_player_name_missing_delimiters() {
        use super::player_name;
        use crate::error::{Field, FragError};
        match player_name(r"ClientUserinfoChanged: 2 Dono\t\0") {
            Err(FragError::Extraction { field, .. }) => assert_eq!(field, Field::PlayerName),
            other => panic!("expected extraction error, got {:?}", other),
        }
        assert!(player_name(r"ClientUserinfoChanged: 2 n\Dono").is_err());
    }

    #[test]
    fn test_kill() {
        use super::kill;
        let k = kill(" 22:06 Kill: 2 3 7: Isgalamido killed Mocinha by MOD_ROCKET_SPLASH").unwrap();
        assert_eq!(k.victim, "Mocinha");
        assert_eq!(k.cause, "MOD_ROCKET_SPLASH");
    }

    #[test]
    fn test_kill_by_world() {
        use super::kill;
        let k = kill("Kill: 1022 2 22: <world> killed Dono by MOD_TRIGGER_HURT").unwrap();
        assert_eq!(k.victim, "Dono");
        assert_eq!(k.cause, "MOD_TRIGGER_HURT");
    }

    #[test]
    fn test_kill_missing_by() {
        use super::kill;
        use crate::error::{Field, FragError};
        match kill("Kill: 1022 2 22: <world> killed Dono") {
            Err(FragError::Extraction { field, .. }) => assert_eq!(field, Field::Victim),
            other => panic!("expected extraction error, got {:?}", other),
        }
        assert!(kill("Kill: 1022 2 22: <world> fragged Dono by MOD_FALLING").is_err());
    }

    #[test]
    fn test_kill_out_of_order_markers() {
        use super::kill;
        // " by" only appears before "killed ", never after it.
        assert!(kill("Kill: 1 2 3: stand by killed Dono").is_err());
    }

    #[test]
    fn test_kill_first_by_wins() {
        use super::kill;
        // a killer whose name holds "by " shifts the cause; kept as is
        let k = kill("Kill: 1 2 3: Baby Shark killed Dono by MOD_SHOTGUN").unwrap();
        assert_eq!(k.victim, "Dono");
        assert_eq!(k.cause, "Shark killed Dono by MOD_SHOTGUN");
    }
}

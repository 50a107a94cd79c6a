use crate::error::Result;
use crate::registry::MatchRegistry;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pretty,
    Compact,
}

impl std::str::FromStr for Format {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            _ => Err(std::format!("Unknown output format: {}", s)),
        }
    }
}

pub fn render(registry: &MatchRegistry, format: Format) -> Result<String> {
    let out = match format {
        Format::Pretty => serde_json::to_string_pretty(registry)?,
        Format::Compact => serde_json::to_string(registry)?,
    };
    Ok(out)
}

/// Renders first, so nothing is written if serialization fails.
pub fn write_report<W: Write>(out: &mut W, registry: &MatchRegistry, format: Format) -> Result<()> {
    let text = render(registry, format)?;
    writeln!(out, "{}", text)?;
    Ok(())
}

mod test {
    #[allow(dead_code)]
    const LOG: &str = "  0:00 InitGame: \\sv_hostname\\Code Miner Server
 20:38 ClientUserinfoChanged: 2 n\\Isgalamido\\t\\0\\model\\uriel/zael
 20:54 Kill: 1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT";

    #[test]
    fn test_pretty_report() {
        use super::{render, Format};
        let registry = crate::registry::parse_lines(LOG.lines().map(|l| Ok(l.to_string())));
        let text = render(&registry, Format::Pretty).unwrap();
        let expected = r#"{
  "game_2": {
    "total_kills": 1,
    "players": [
      "Isgalamido"
    ],
    "kills": {
      "Isgalamido": 1
    },
    "kills_by_means": {
      "MOD_TRIGGER_HURT": 1
    },
    "player_ranking": [
      "Isgalamido"
    ]
  }
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_compact_report_keeps_match_order() {
        use super::{write_report, Format};
        let lines = (0..12).map(|_| Ok("InitGame:".to_string()));
        let registry = crate::registry::parse_lines(lines);
        let mut out = Vec::new();
        write_report(&mut out, &registry, Format::Compact).unwrap();
        let text = String::from_utf8(out).unwrap();
        let two = text.find("\"game_2\"").unwrap();
        let ten = text.find("\"game_10\"").unwrap();
        assert!(two < ten);
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_empty_registry() {
        use super::{render, Format};
        let registry = crate::registry::MatchRegistry::new();
        assert_eq!(render(&registry, Format::Pretty).unwrap(), "{}");
    }

    #[test]
    fn test_format_from_str() {
        use super::Format;
        assert_eq!("pretty".parse::<Format>(), Ok(Format::Pretty));
        assert_eq!("compact".parse::<Format>(), Ok(Format::Compact));
        assert!("yaml".parse::<Format>().is_err());
    }
}

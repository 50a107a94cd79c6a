pub mod aggregate;
pub mod classify;
pub mod error;
pub mod extract;
pub mod registry;
pub mod report;
pub mod state;

pub use aggregate::apply;
pub use error::{FragError, Result};
pub use registry::{parse_lines, Driver, MatchRegistry};
pub use state::MatchState;

pub fn version()->String{
    return std::format!("{}-Alpha", env!("CARGO_PKG_VERSION")).to_string();
}
pub fn about()->String{
    "Per-match kills, players and means of death from a Quake 3 style games.log. \n\
    Copyright (C) 2021 Joshua Vander Hook\n\n\
    This program comes with ABSOLUTELY NO WARRANTY.\n\
    This is free software, and you are welcome to redistribute\n\
    it under certain conditions. ".to_string()
}

mod test{
    #[test]
    fn test_version_mentions_package(){
        let v = super::version();
        assert!(v.starts_with(env!("CARGO_PKG_VERSION")));
    }
}

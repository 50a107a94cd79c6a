extern crate clap;
use clap::{App,Arg};
use frag_tools::report::{write_report,Format};
use frag_tools::{parse_lines,MatchRegistry};
use log::{error,info};
use std::fs::File;
use std::io::{BufRead,BufReader,stdin,stdout};

/**
 * Reads a games.log (file or stdin) and prints kills, players and means of death per match.
 */
fn main() -> Result<(),String> {

    let input_args = App::new("frag-summary")
        .version( &frag_tools::version()[..] )
        .author("Joshua Vander Hook <josh@vanderhook.info>")
        .about(&frag_tools::about()[..])
        .arg(Arg::with_name("input")
        .required(false)
        .help("The server log to read. Reads stdin if omitted or '-'")
        )
        .arg(Arg::with_name("out_format")
        .required(false)
        .short("o")
        .long("format")
        .default_value("pretty")
        .possible_values(
            &["pretty", "compact"]
        )
        .help("Output format, indented or single-line JSON")
        )
        .arg(Arg::with_name("verbose")
        .short("v")
        .multiple(true)
        .help("Log more (repeat for more detail). RUST_LOG takes precedence")
        )
        .get_matches();

    let default_level = match input_args.occurrences_of("verbose"){
        0=>"warn",
        1=>"info",
        2=>"debug",
        _=>"trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level)
    ).init();

    //possible_values already restricts this, but don't panic on it anyway
    let format = input_args.value_of("out_format").unwrap_or("pretty")
        .parse::<Format>()?;

    let registry = match input_args.value_of("input"){
        None|Some("-")=>{
            info!("Reading from stdin");
            let local_sin = stdin();
            let line_itr = local_sin.lock().lines();
            parse_lines(line_itr)
        },
        Some(path)=>{
            match File::open(path){
                Ok(f)=>{
                    info!("Reading {}",path);
                    parse_lines(BufReader::new(f).lines())
                },
                Err(e)=>{
                    error!("Could not open {}: {}",path,e);
                    MatchRegistry::new()
                },
            }
        },
    };
    info!("Found {} matches",registry.len());

    if let Err(e) = write_report(&mut stdout().lock(),&registry,format){
        error!("{}",e);
        return Err(e.to_string());
    }
    Ok(())
}

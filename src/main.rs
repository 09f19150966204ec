mod app;
mod config;
mod error;
mod events;
mod logger;
mod select_list;
mod sonar;
mod state;
mod ui;
mod utils;

use anyhow::Result;
use app::App;
use clap::{App as Cli, Arg};
use config::Config;
use log::LevelFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("gate")
                .short("g")
                .long("gate")
                .value_name("ID")
                .help("Quality gate to edit")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("url")
                .short("u")
                .long("url")
                .value_name("URL")
                .help("SonarQube server base URL")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Show request flow in the log panel"),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(url) = matches.value_of("url") {
        config.base_url = Some(url.to_owned());
    }
    if let Some(gate) = matches.value_of("gate") {
        config.gate_id = Some(gate.to_owned());
    }

    let log_level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    App::start(config, log_level).await?;
    Ok(())
}

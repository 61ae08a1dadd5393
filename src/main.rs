use changelogger::{
    cli::{Args, Command},
    command,
    config::Config,
    result::Result,
};
use clap::Parser;

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("changelogger")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    let config = Config::load(&cli_args.config)?;

    match &cli_args.command {
        Command::New(new_args) => {
            command::new::execute(&cli_args, new_args, &config).await
        }
        Command::Get(get_args) => {
            command::get::execute(&cli_args, get_args, &config)
        }
        Command::Parse => command::parse::execute(&cli_args, &config),
        Command::Config(config_args) => {
            command::config::execute(config_args, &config)
        }
    }
}

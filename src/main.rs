use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use kid_games::config::GameId;
use kid_games::games;
use kid_games::profile::{Profile, ProfileStore};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kid-games", version, about = "Coin and clock games for kids")]
struct Cli
{
    /// JSON file with the child profiles
    #[arg(long, global = true)]
    profiles: Option<PathBuf>,

    /// Profile to play as (default: the first one)
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command
{
    /// List the games and whether this profile can play them
    List,
    /// Count the coins shown
    CoinsCount,
    /// Build an amount from coins
    CoinsMath,
    /// Read an analog clock
    Clock,
    /// Print the profile's game configuration as JSON
    Config,
}

fn main()
{
    let cli = Cli::parse();
    let result = match init_logging(cli.log_file.as_deref()) {
        Ok(()) => run(cli),
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()>
{
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kid_games=info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            // The game screens own the terminal, so only warnings go to stderr.
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()>
{
    let store = match &cli.profiles {
        Some(path) => ProfileStore::load(path)?,
        None => ProfileStore::default(),
    };
    let profile = select_profile(&store, cli.profile.as_deref())?;

    match cli.command {
        None => interactive_menu(profile),
        Some(Command::List) => {
            list_games(profile);
            Ok(())
        }
        Some(Command::CoinsCount) => run_game(profile, GameId::CoinsCount),
        Some(Command::CoinsMath) => run_game(profile, GameId::CoinsMath),
        Some(Command::Clock) => run_game(profile, GameId::ClockGuess),
        Some(Command::Config) => {
            let json = serde_json::to_string_pretty(&profile.app_config)
                .context("Failed to encode configuration")?;
            println!("{json}");
            Ok(())
        }
    }
}

fn select_profile<'a>(store: &'a ProfileStore, name: Option<&str>) -> Result<&'a Profile>
{
    match name {
        Some(name) => Ok(store.require(name)?),
        None => match store.profiles().first() {
            Some(profile) => Ok(profile),
            None => bail!("No profiles found. Add one to the profiles file."),
        },
    }
}

fn run_game(profile: &Profile, game: GameId) -> Result<()>
{
    let config = profile.require(game)?;
    let correct = games::launch(config, &profile.name)?;
    println!("Nice work, {}! {} correct answers.", profile.name, correct);
    Ok(())
}

fn interactive_menu(profile: &Profile) -> Result<()>
{
    loop {
        let available: Vec<_> = games::registry()
            .into_iter()
            .filter(|game| profile.playable(game.id).is_some())
            .collect();
        if available.is_empty() {
            bail!("No games are turned on for {}.", profile.name);
        }

        println!("Kid Games - {} {}", profile.emoji, profile.name);
        println!();
        println!("Select a game:");
        for (idx, game) in available.iter().enumerate() {
            println!("  {}. {} - {}", idx + 1, game.name, game.description);
        }
        println!();
        print!("Enter number or name (default 1, q to quit): ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        let read = std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;
        let choice = input.trim();
        if read == 0 || choice.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let picked = if choice.is_empty() {
            available.first()
        } else if let Ok(index) = choice.parse::<usize>() {
            index.checked_sub(1).and_then(|index| available.get(index))
        } else {
            available
                .iter()
                .find(|game| game.command.eq_ignore_ascii_case(choice) || game.name.eq_ignore_ascii_case(choice))
        };

        match picked {
            Some(game) => run_game(profile, game.id)?,
            None => println!("Invalid selection."),
        }
        println!();
    }
}

fn list_games(profile: &Profile)
{
    println!("Games for {}:", profile.name);
    for game in games::registry() {
        let status = if profile.playable(game.id).is_some() { "" } else { " (hidden)" };
        println!("  {:<12} - {}{}", game.command, game.description, status);
    }
}

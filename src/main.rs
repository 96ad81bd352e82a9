use clap::Parser;
use lockbox::cli::{commands, load_profiles, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = run(&cli);

    if let Err(e) = result {
        lockbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> lockbox::errors::Result<()> {
    // Completions and keygen need no profile lookup.
    match &cli.command {
        Commands::Completions { shell } => return commands::completions::execute(shell),
        Commands::Keygen { path } => return commands::keygen::execute(path.as_deref()),
        _ => {}
    }

    let profiles = load_profiles(cli)?;
    let profile = profiles.get(&cli.profile)?;

    match &cli.command {
        Commands::Put { key, value } => commands::put::execute(cli, profile, key, value.as_deref()),
        Commands::Get { key, output } => {
            commands::get::execute(cli, profile, key, output.as_deref())
        }
        Commands::List { filter } => commands::list::execute(cli, profile, filter.as_deref()),
        Commands::Delete { key } => commands::delete::execute(cli, profile, key),
        Commands::Generate { key, length } => {
            commands::generate::execute(cli, profile, key, *length)
        }
        Commands::Move {
            key,
            target_profile,
            target_key,
        } => commands::move_cmd::execute(cli, profile, key, target_profile, target_key.as_deref()),
        Commands::Backup {
            path,
            filter,
            recipient,
        } => commands::backup::execute(cli, profile, path, filter.as_deref(), recipient.as_deref()),
        Commands::Restore { path, key } => {
            commands::restore::execute(cli, profile, path, key.as_deref())
        }
        Commands::Completions { .. } | Commands::Keygen { .. } => unreachable!(),
    }
}

use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use restaurant_backend::config::db::db_url;
use restaurant_backend::infra::db::connect_url;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Restaurant backend database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database URL. Defaults to the one built from DB_* variables, the
    /// same way the server builds it.
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let url = match args.url.map_or_else(db_url, Ok) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Cannot resolve database URL: {e}");
            std::process::exit(2);
        }
    };

    let db = match connect_url(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Cannot connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}

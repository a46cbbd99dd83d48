use std::error::Error;

use clap::{Args, Parser, Subcommand};
use directory::{User, UserDirectory, UserFilter};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "photolog_admin")]
#[command(about = "Admin utilities for Photolog (inspect and seed the user directory)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./photolog.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(UserArgs),
}

#[derive(Args, Debug)]
struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Every stored record, oldest first.
    List,
    /// The record a login by this name resolves to.
    Find(FindArgs),
    /// Finds a record matching all three fields or inserts it.
    Upsert(UpsertArgs),
}

#[derive(Args, Debug)]
struct FindArgs {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct UpsertArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    id: String,
    #[arg(long)]
    access_token: String,
}

fn print_user(user: &User) {
    println!("{}\t{}\t{}\t{}", user.seq, user.name, user.id, user.access_token);
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let directory = UserDirectory::builder()
        .database(connect_db(&cli.database_url).await?)
        .build();

    let Command::User(UserArgs { command }) = cli.command;
    match command {
        UserCommand::List => {
            for user in directory.list().await? {
                print_user(&user);
            }
        }
        UserCommand::Find(args) => match directory.find_by_name(&args.name).await? {
            Some(user) => print_user(&user),
            None => {
                eprintln!("user not found: {}", args.name);
                directory.close().await?;
                std::process::exit(1);
            }
        },
        UserCommand::Upsert(args) => {
            let criteria = UserFilter {
                name: Some(args.name),
                id: Some(args.id),
                access_token: Some(args.access_token),
            };
            let (user, created) = directory.find_or_create(criteria).await?;
            println!("{}", if created { "created" } else { "found" });
            print_user(&user);
        }
    }

    directory.close().await?;
    Ok(())
}

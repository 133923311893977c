//! Operator shell for the user registry.
//!
//! # Responsibility
//! - Collect raw field values from the command line and drive exactly one
//!   gateway operation per invocation.
//! - Display returned records or the operation's error reason.
//!
//! The shell performs no SQL and no hashing of its own; everything goes
//! through `roster_core`.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use roster_core::{
    default_log_level, init_logging, IdType, StoreConfig, User, UserDraft, UserService,
    UserSummary,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Operator shell for the user registry.
#[derive(Parser)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
struct Cli {
    /// SQLite database file backing the registry.
    #[arg(long, default_value = "roster.db")]
    db: PathBuf,

    /// Directory for rolling log files. File logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a user record.
    Add {
        #[command(flatten)]
        draft: DraftArgs,
        /// Plaintext password for the new record; stored only as a hash.
        #[arg(long)]
        password: String,
    },
    /// List every record.
    List,
    /// Show one record by identifier.
    Show {
        id: i64,
    },
    /// Look up a record by identification document.
    Find {
        #[arg(value_parser = parse_id_type)]
        id_type: IdType,
        id_number: String,
    },
    /// Replace all fields of an existing record.
    Update {
        id: i64,
        #[command(flatten)]
        draft: DraftArgs,
        /// New plaintext password. The stored hash is kept when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Delete a record by identifier.
    Delete {
        id: i64,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Verify a credential pair.
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
}

/// Raw field values shared by `add` and `update`.
#[derive(Args)]
struct DraftArgs {
    /// Identification type: cc, nit, pas or ce.
    #[arg(long, value_parser = parse_id_type)]
    id_type: IdType,
    #[arg(long)]
    id_number: String,
    #[arg(long)]
    given_name: String,
    #[arg(long)]
    surname: String,
    #[arg(long)]
    address: Option<String>,
    /// Birth date as YYYY-MM-DD.
    #[arg(long)]
    birth_date: Option<NaiveDate>,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: Option<String>,
}

impl DraftArgs {
    fn into_draft(self) -> UserDraft {
        UserDraft {
            id_type: self.id_type,
            id_number: self.id_number,
            given_name: self.given_name,
            surname: self.surname,
            address: self.address,
            birth_date: self.birth_date,
            email: self.email,
            phone: self.phone,
        }
    }
}

fn parse_id_type(value: &str) -> Result<IdType, String> {
    match value.to_ascii_lowercase().as_str() {
        "cc" => Ok(IdType::Cc),
        "nit" => Ok(IdType::Nit),
        "pas" => Ok(IdType::Pas),
        "ce" => Ok(IdType::Ce),
        other => Err(format!(
            "unknown identification type `{other}`; expected cc|nit|pas|ce"
        )),
    }
}

fn id_type_label(id_type: IdType) -> &'static str {
    match id_type {
        IdType::Cc => "cc",
        IdType::Nit => "nit",
        IdType::Pas => "pas",
        IdType::Ce => "ce",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let absolute = if log_dir.is_absolute() {
            log_dir.clone()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(log_dir))
                .unwrap_or_else(|_| log_dir.clone())
        };
        if let Err(message) = init_logging(default_log_level(), &absolute.to_string_lossy()) {
            eprintln!("warning: {message}");
        }
    }

    let service = UserService::new(StoreConfig::new(&cli.db));
    match run(&service, cli.command) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(service: &UserService, command: Command) -> Result<ExitCode, String> {
    match command {
        Command::Add { draft, password } => {
            let id = service
                .create_user(&draft.into_draft(), &password)
                .map_err(|err| err.to_string())?;
            println!("created user {id}");
        }
        Command::List => {
            let users = service.list_users().map_err(|err| err.to_string())?;
            if users.is_empty() {
                println!("no users");
            }
            for user in users {
                print_summary(&user);
            }
        }
        Command::Show { id } => {
            match service.get_user(id).map_err(|err| err.to_string())? {
                Some(user) => print_record(&user),
                None => println!("no user with id {id}"),
            }
        }
        Command::Find { id_type, id_number } => {
            match service
                .find_by_identification(id_type, &id_number)
                .map_err(|err| err.to_string())?
            {
                Some(user) => print_record(&user),
                None => println!(
                    "no user with identification {} {id_number}",
                    id_type_label(id_type)
                ),
            }
        }
        Command::Update {
            id,
            draft,
            password,
        } => {
            service
                .update_user(id, &draft.into_draft(), password.as_deref())
                .map_err(|err| err.to_string())?;
            println!("updated user {id}");
        }
        Command::Delete { id, yes } => {
            if !yes {
                return Err(format!("refusing to delete user {id} without --yes"));
            }
            service.delete_user(id).map_err(|err| err.to_string())?;
            println!("deleted user {id}");
        }
        Command::Login { email, password } => {
            match service
                .authenticate(&email, &password)
                .map_err(|err| err.to_string())?
            {
                Some(user) => println!("access granted for user {}", user.id),
                None => {
                    println!("access denied");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(user: &UserSummary) {
    println!(
        "{}\t{} {}\t{} {}\t{}\t{}",
        user.id,
        id_type_label(user.id_type),
        user.id_number,
        user.given_name,
        user.surname,
        user.email,
        user.phone.as_deref().unwrap_or("-"),
    );
}

fn print_record(user: &User) {
    println!("id:          {}", user.id);
    println!(
        "document:    {} {}",
        id_type_label(user.id_type),
        user.id_number
    );
    println!("name:        {} {}", user.given_name, user.surname);
    println!(
        "address:     {}",
        user.address.as_deref().unwrap_or("-")
    );
    println!(
        "birth date:  {}",
        user.birth_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("email:       {}", user.email);
    println!("phone:       {}", user.phone.as_deref().unwrap_or("-"));
}

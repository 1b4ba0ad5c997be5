use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use inline_colorization::*;

use marshall::app::App;
use marshall::config::{config_schema, load_config};
use marshall::dialog::{DialogMode, TaskForm};
use marshall::error::ClientError;
use marshall::models::{Task, TaskFilter};
use marshall::notify::ConsoleNotifier;
use marshall::session::{IssuedTokenProvider, SessionState};
use marshall::startup::build_app;
use marshall::utils::init_logging;

#[derive(Parser)]
#[command(name = "marshall", version, about = "Personal task list client")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, env = "MARSHALL_CONFIG", default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with an ID token issued by the identity provider.
    Login {
        #[arg(long, env = "MARSHALL_ID_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List tasks in one of the views.
    List {
        #[arg(value_enum, default_value_t = TaskFilter::Home)]
        view: TaskFilter,
    },
    /// Add a task.
    Create(CreateArgs),
    /// Replace the fields of an existing task.
    Edit(EditArgs),
    /// Show one task in full.
    Show { id: String },
    /// Toggle the completion flag of a task.
    Complete { id: String },
    /// Delete a task.
    Delete { id: String },
    /// Print the JSON schema of the configuration file.
    Schema,
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// Due date, e.g. 2024-01-31.
    #[arg(long)]
    date: String,
    #[arg(long)]
    important: bool,
    #[arg(long)]
    completed: bool,
}

#[derive(Args)]
struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    important: Option<bool>,
    #[arg(long)]
    completed: Option<bool>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The schema is the one command that works without a configuration.
    if matches!(cli.command, Command::Schema) {
        return print_schema();
    }

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let mut app = build_app(&config, Arc::new(ConsoleNotifier));
    match run(&mut app, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported to the user through the notifier.
        Err(_) => ExitCode::FAILURE,
    }
}

async fn run(app: &mut App, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Login { token } => {
            let provider = IssuedTokenProvider::new("command-line", token);
            if app.sign_in(&provider).await? != SessionState::Authenticated {
                eprintln!("No usable ID token; pass --token or set MARSHALL_ID_TOKEN");
                return Err(ClientError::NotSignedIn);
            }
        }
        Command::Logout => app.sign_out()?,
        Command::Whoami => match app.session.identity() {
            Some(identity) => {
                println!("{style_bold}{}{style_reset} ({})", identity.display_name(), identity.sub);
                if let Some(email) = &identity.email {
                    println!("email:   {}", email);
                }
                if let Some(exp) = identity.expires_at() {
                    println!("expires: {}", exp.to_rfc3339());
                }
            }
            None => println!("Not signed in"),
        },
        Command::List { view } => {
            app.refresh().await?;
            let tasks = app.visible(view);
            println!("{style_bold}{}{style_reset} ({} tasks)", view.label(), tasks.len());
            for task in tasks {
                print_row(task);
            }
        }
        Command::Create(args) => {
            app.open_dialog(DialogMode::Create);
            let form = TaskForm {
                title: args.title,
                description: args.description,
                date: args.date,
                is_completed: args.completed,
                is_important: args.important,
            };
            app.submit_dialog(&form).await?;
        }
        Command::Edit(args) => {
            let task = app.locate(&args.id).await?;
            let mode = DialogMode::Update(task);
            let mut form = TaskForm::for_mode(&mode);
            if let Some(title) = args.title {
                form.title = title;
            }
            if let Some(description) = args.description {
                form.description = description;
            }
            if let Some(date) = args.date {
                form.date = date;
            }
            if let Some(important) = args.important {
                form.is_important = important;
            }
            if let Some(completed) = args.completed {
                form.is_completed = completed;
            }
            app.open_dialog(mode);
            app.submit_dialog(&form).await?;
        }
        Command::Show { id } => {
            let task = app.locate(&id).await?;
            app.open_dialog(DialogMode::Details(task));
            print_details(app.dialog.mode());
            app.close_dialog();
        }
        Command::Complete { id } => {
            let task = app.locate(&id).await?;
            app.toggle_completed(&task).await?;
        }
        Command::Delete { id } => app.remove(&id).await?,
        Command::Schema => {}
    }
    Ok(())
}

fn print_schema() -> ExitCode {
    match config_schema() {
        Ok(schema) => {
            println!("{}", schema);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error rendering schema: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_row(task: &Task) {
    let done = if task.is_completed { "x" } else { " " };
    let flag = if task.is_important {
        format!("{color_yellow}!{color_reset}")
    } else {
        " ".to_string()
    };
    println!("[{}] {} {:<26} {}  {}", done, flag, task.id, task.date, task.title);
}

fn print_details(mode: &DialogMode) {
    let Some(task) = mode.target() else {
        return;
    };
    println!("{style_bold}{}{style_reset}", mode.heading());
    println!("title:       {}", task.title);
    println!("description: {}", task.description);
    println!("date:        {}", task.date);
    println!("completed:   {}", task.is_completed);
    println!("important:   {}", task.is_important);
}

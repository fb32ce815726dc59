//! Command-line front end for the notes board.
//!
//! Each invocation mounts the board view, performs one action, prints the
//! toasts it raised and, for note actions, the rendered board.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, bail, eyre};
use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use notes_backend::config::NotesSettings;
use notes_backend::domain::{NoteId, UserId};
use notes_backend::inbound::ui::{
    NotesView, RecordingNotifier, SignUpOutcome, SignUpView, SubmitOutcome, Toast,
};
use notes_backend::outbound::SupabaseClient;

/// `notes-board` command arguments.
#[derive(Debug, Parser)]
#[command(name = "notes-board", about = "Manage notes on the Supabase board", version)]
struct CliArgs {
    #[command(subcommand)]
    command: BoardCommand,
}

#[derive(Debug, Subcommand)]
enum BoardCommand {
    /// Show every note, newest first.
    List,
    /// Create a note.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Change the title and/or content of a note.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note.
    Delete { id: String },
    /// Create a board account; the password is read from stdin.
    Signup {
        #[arg(long)]
        email: String,
    },
    /// End the current board session.
    SignOut,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = NotesSettings::load_for("notes-board")?.board()?;
    let client = Arc::new(SupabaseClient::new(&settings)?);
    let notifier = Arc::new(RecordingNotifier::new());
    let user_id = settings.user_id.as_deref().map(UserId::new).transpose()?;

    let succeeded = match args.command {
        BoardCommand::Signup { email } => {
            let password = read_password()?;
            let mut view = SignUpView::new(client, notifier.clone());
            view.set_email(email);
            view.set_password(password.as_str());
            view.submit().await == SignUpOutcome::NavigateToLogin
        }
        command => {
            let mut view = NotesView::new(
                client.clone(),
                client,
                notifier.clone(),
                Arc::new(DefaultClock),
                user_id,
            );
            view.mount().await;
            let succeeded = run_note_command(&mut view, command).await?;
            print_toasts(&notifier.drain())?;
            print_board(&view)?;
            succeeded
        }
    };
    print_toasts(&notifier.drain())?;

    if !succeeded {
        bail!("board action failed");
    }
    Ok(())
}

async fn run_note_command(view: &mut NotesView, command: BoardCommand) -> Result<bool> {
    let succeeded = match command {
        BoardCommand::List => true,
        BoardCommand::Add { title, content } => {
            view.set_title(title);
            view.set_content(content);
            view.submit().await == SubmitOutcome::Created
        }
        BoardCommand::Edit { id, title, content } => {
            let id = NoteId::new(id)?;
            let note = view
                .notes()
                .iter()
                .find(|note| note.note_id() == &id)
                .cloned()
                .ok_or_else(|| eyre!("note {id} is not on the board"))?;
            view.begin_edit(&note);
            if let Some(title) = title {
                view.set_title(title);
            }
            if let Some(content) = content {
                view.set_content(content);
            }
            view.submit().await == SubmitOutcome::Updated
        }
        BoardCommand::Delete { id } => view.delete(&NoteId::new(id)?).await,
        BoardCommand::SignOut => view.sign_out().await,
        BoardCommand::Signup { .. } => bail!("signup is handled by the sign-up view"),
    };
    Ok(succeeded)
}

fn read_password() -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    io::stdin().lock().read_line(&mut line)?;
    let trimmed = Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_owned());
    Ok(trimmed)
}

fn print_toasts(toasts: &[Toast]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for toast in toasts {
        writeln!(stdout, "{toast}")?;
    }
    Ok(())
}

fn print_board(view: &NotesView) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", view.render())
}

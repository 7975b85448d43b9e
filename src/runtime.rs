use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::app::{App, Effect, Message};
use crate::config::AppConfig;
use crate::ui;

/// Runs one effect against the service and returns the completion message.
pub async fn perform(client: &ApiClient, effect: Effect) -> Option<Message> {
    let msg = match effect {
        Effect::FetchNotes => Message::NotesLoaded(client.list_notes().await),
        Effect::CreateNote(note) => Message::NoteCreated(client.create_note(&note).await),
        Effect::DeleteNote(id) => Message::NoteDeleted(client.delete_note(&id).await),
        Effect::ToggleTask { id, is_completed } => {
            let result = client.toggle_task(&id, is_completed).await;
            Message::TaskToggled {
                id,
                is_completed,
                result,
            }
        }
        Effect::LoadProfile => Message::ProfileLoaded(client.get_profile().await),
        Effect::SaveProfile(profile) => {
            let result = client.save_profile(&profile).await;
            Message::ProfileSaved {
                submitted: profile,
                result,
            }
        }
        Effect::Quit => return None,
    };
    Some(msg)
}

/// Each effect gets its own task; completions arrive in whatever order they finish.
fn spawn_effect(effect: Effect, client: &ApiClient, tx: &mpsc::UnboundedSender<Message>) {
    crate::logger::log(&format!("Effect: {:?}", effect));
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        if let Some(msg) = perform(&client, effect).await {
            let _ = tx.send(msg);
        }
    });
}

/// Returns `true` when one of the effects asks to quit.
fn apply_effects(
    effects: Vec<Effect>,
    client: &ApiClient,
    tx: &mpsc::UnboundedSender<Message>,
) -> bool {
    for effect in effects {
        if effect == Effect::Quit {
            return true;
        }
        spawn_effect(effect, client, tx);
    }
    false
}

pub async fn run_tui(config: AppConfig) -> Result<()> {
    let client = ApiClient::new(&config.service)?;
    crate::logger::log(&format!(
        "Starting TUI against {}",
        config.service.notes_url()
    ));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(config, Local::now().date_naive());
    let result = run(&mut app, &mut terminal, client).await;

    let _ = restore_terminal();
    result
}

async fn run<B: Backend>(
    app: &mut App<'_>,
    terminal: &mut Terminal<B>,
    client: ApiClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let effects = app.init(Local::now().date_naive());
    if apply_effects(effects, &client, &tx) {
        return Ok(());
    }

    let mut events = EventStream::new();
    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|f| ui::draw(f, app))?;
            should_render = false;
        }

        let mut messages = Vec::new();
        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                    messages.push(Message::Key(key));
                }
                Some(Ok(Event::Paste(text))) => messages.push(Message::Paste(text)),
                Some(Ok(Event::Resize(_, _))) => should_render = true,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
            Some(msg) = rx.recv() => {
                messages.push(msg);
                while let Ok(m) = rx.try_recv() {
                    messages.push(m);
                }
            }
        }

        for msg in messages {
            let effects = app.update(msg);
            if apply_effects(effects, &client, &tx) {
                return Ok(());
            }
            should_render = true;
        }
    }
}

pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)?;
    Ok(())
}

use crate::app::{Action, AppState};
use crate::config::{load_keybindings, Config};
use crate::navigation::Route;
use crate::session::{CampaignHoursPolicy, HoursPolicy};
use crate::source::{AssignmentSource, ConversationSource, FileSource};
use crate::tui;
use crate::tui::event::EventHandler;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::handler::process_action;
use super::poller::{Pollers, RefreshTrigger};

/// What the binary was asked to run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub assignment: PathBuf,
    pub conversations: PathBuf,
    /// Overrides the campaign's organization in exit routes
    pub organization: Option<String>,
    pub config: Config,
}

/// Run the texting session until the texter quits or the session sends them
/// elsewhere. Returns the route they were sent to, if any.
pub async fn run_tui(options: RunOptions) -> Result<Option<Route>> {
    let source = Arc::new(FileSource::new(&options.assignment, &options.conversations));
    let policy = CampaignHoursPolicy::new();
    let refresh = RefreshTrigger::default();

    let mut events = EventHandler::new();
    let organization = options.organization.or(options.config.organization_id.clone());
    let mut state = AppState::new(events.timer_sender(), organization, load_keybindings());

    // First snapshot before the first frame
    initial_load(&mut state, source.as_ref(), &policy, &refresh)?;
    if state.system.should_quit {
        info!(route = ?state.system.exit_route, "session ended before the UI opened");
        return Ok(state.system.exit_route.take());
    }

    let pollers = Pollers::spawn(
        source.clone(),
        source,
        &options.config.poll,
        refresh.clone(),
        events.action_sender(),
    );

    // Initialize terminal
    let mut terminal = tui::init()?;
    let size = terminal.size()?;
    state.system.terminal_size = (size.width, size.height);

    // Main loop
    let result = run_main_loop(&mut terminal, &mut state, &mut events, &policy, &refresh).await;

    state.session.dispose();
    drop(pollers);

    // Restore terminal
    tui::restore()?;

    result?;
    Ok(state.system.exit_route.take())
}

fn initial_load(
    state: &mut AppState,
    source: &FileSource,
    policy: &dyn HoursPolicy,
    refresh: &RefreshTrigger,
) -> Result<()> {
    let conversations = match source.fetch_conversations() {
        Ok(conversations) => Action::ConversationsRefreshed(conversations),
        Err(e) => {
            warn!(error = %e, "initial conversation load failed");
            Action::RefreshFailed(e.to_string())
        }
    };
    process_action(state, conversations, policy, refresh)?;

    let assignment = match source.fetch_assignment() {
        Ok(assignment) => Action::AssignmentRefreshed(assignment),
        Err(e) => {
            warn!(error = %e, "initial assignment load failed");
            Action::RefreshFailed(e.to_string())
        }
    };
    process_action(state, assignment, policy, refresh)
}

async fn run_main_loop(
    terminal: &mut tui::Terminal,
    state: &mut AppState,
    events: &mut EventHandler,
    policy: &dyn HoursPolicy,
    refresh: &RefreshTrigger,
) -> Result<()> {
    loop {
        terminal.draw(|frame| tui::ui::draw(frame, state))?;

        let action = events.next(state).await?;
        process_action(state, action, policy, refresh)?;

        if state.system.should_quit {
            break;
        }
    }

    Ok(())
}

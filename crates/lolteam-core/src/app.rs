// Application state and the controller loop.
//
// The controller owns all team state. The TUI sends `UserCommand`s in; every
// command is applied to `AppState` in turn and answered with an optional
// notification plus a fresh `AppSnapshot`. The one-time champion load runs as
// a background task and is joined by the same loop.

use std::path::PathBuf;

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::champions::{self, ChampionPool, ChampionSource, LoadOutcome};
use crate::config::Config;
use crate::db::Database;
use crate::export::{self, TeamExport};
use crate::protocol::{
    AppSnapshot, MemberRow, Notice, PoolStatus, SelectionView, UiUpdate, UserCommand,
};
use crate::team::assignment::AssignmentFlow;
use crate::team::roster::Roster;
use crate::team::TeamError;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub roster: Roster,
    pub assignment: AssignmentFlow,
    /// `None` until the background load finishes.
    pub pool: Option<ChampionPool>,
    pub pool_status: PoolStatus,
    pub db: Database,
    pub rng: StdRng,
    pub last_export: Option<PathBuf>,
}

impl AppState {
    /// Fresh state with an empty roster. The RNG is seeded from
    /// `team.seed` when configured.
    pub fn new(config: Config, db: Database) -> Self {
        let rng = match config.team.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        AppState {
            config,
            roster: Roster::new(),
            assignment: AssignmentFlow::Idle,
            pool: None,
            pool_status: PoolStatus::Loading,
            db,
            rng,
            last_export: None,
        }
    }

    /// Take the result of the champion load. Returns the fallback warning, if
    /// any, so the caller can surface it.
    pub fn install_pool(&mut self, outcome: LoadOutcome) -> Option<Notice> {
        let count = outcome.pool.len();
        self.pool_status = if outcome.used_fallback() {
            PoolStatus::Fallback { count }
        } else {
            PoolStatus::Loaded { count }
        };
        self.pool = Some(outcome.pool);
        outcome.warning.map(Notice::warning)
    }

    /// Apply one command. Validation failures become warning notices and
    /// leave the state untouched.
    pub fn apply_command(&mut self, cmd: UserCommand) -> Option<Notice> {
        let label = format!("{cmd:?}");
        match self.try_command(cmd) {
            Ok(notice) => notice,
            Err(e) => {
                debug!("Rejected {}: {}", label, e);
                Some(Notice::warning(e.to_string()))
            }
        }
    }

    fn try_command(&mut self, cmd: UserCommand) -> Result<Option<Notice>, TeamError> {
        match cmd {
            UserCommand::AddMember(name) => {
                let idx = self.roster.add_member(&name)?;
                info!("Added member {} at order {}", self.roster.members()[idx].name, idx + 1);
                self.persist();
                Ok(None)
            }
            UserCommand::RemoveMember(index) => {
                let removed = self.roster.remove_member(index)?;
                info!("Removed member {}", removed.name);
                self.assignment.cancel();
                self.persist();
                Ok(None)
            }
            UserCommand::Shuffle => {
                self.roster.shuffle(&mut self.rng)?;
                info!("Shuffled order of {} members", self.roster.len());
                self.assignment.cancel();
                self.persist();
                Ok(Some(Notice::success("Team order randomized!")))
            }
            UserCommand::Reset => {
                self.roster.reset();
                self.assignment.cancel();
                if let Err(e) = self.db.clear_session() {
                    warn!("Failed to clear saved session: {:#}", e);
                }
                info!("Roster reset");
                Ok(Some(Notice::info("All data has been reset.")))
            }
            UserCommand::Save => self.save_team(),
            UserCommand::OpenAssign(index) => {
                let Some(pool) = self.pool.as_ref() else {
                    return Err(TeamError::PoolNotLoaded);
                };
                self.assignment
                    .open_for(index, &self.roster, pool, &mut self.rng)?;
                Ok(None)
            }
            UserCommand::SetRole(role) => {
                self.assignment.set_role(role)?;
                Ok(None)
            }
            UserCommand::SelectChampion { champion, role } => {
                let assigned = self.assignment.select(&champion, role, &mut self.roster)?;
                info!(
                    "Assigned {} ({}) to {}",
                    assigned.champion, assigned.role, assigned.member
                );
                self.persist();
                Ok(Some(Notice::success(assigned.message())))
            }
            UserCommand::CancelAssign => {
                self.assignment.cancel();
                Ok(None)
            }
            // Handled by the loop.
            UserCommand::Quit => Ok(None),
        }
    }

    fn save_team(&mut self) -> Result<Option<Notice>, TeamError> {
        let doc = TeamExport::build(&self.roster, Local::now(), &self.config.export.date_format)?;
        let dir = self.config.export.resolved_directory();
        match export::write_export(&dir, self.config.export.format, &doc) {
            Ok(path) => {
                if let Err(e) = self
                    .db
                    .record_export(&path.display().to_string(), doc.members.len())
                {
                    warn!("Failed to record export: {:#}", e);
                }
                let message = format!("Team saved! File written to {}", path.display());
                self.last_export = Some(path);
                Ok(Some(Notice::success(message)))
            }
            Err(e) => {
                error!("Export to {} failed: {}", dir.display(), e);
                Ok(Some(Notice::warning(format!("Could not save the team: {e}"))))
            }
        }
    }

    /// Save the roster as the current session. Failures are logged only.
    fn persist(&self) {
        if let Err(e) = self.db.save_session(&self.roster) {
            warn!("Failed to persist session: {:#}", e);
        }
    }

    /// Build a snapshot of the current state for the TUI.
    pub fn build_snapshot(&self) -> AppSnapshot {
        let current = self.roster.current_turn();
        let members = self
            .roster
            .by_order()
            .into_iter()
            .map(|idx| {
                let m = &self.roster.members()[idx];
                MemberRow {
                    index: idx,
                    name: m.name.clone(),
                    champion: m.champion.clone(),
                    role: m.role,
                    order: m.order,
                    is_current_turn: current == Some(idx),
                }
            })
            .collect();

        let selection = match &self.assignment {
            AssignmentFlow::Selecting {
                member_index,
                candidates,
                role,
            } => self.roster.member(*member_index).map(|m| SelectionView {
                member_index: *member_index,
                member_name: m.name.clone(),
                candidates: candidates.clone(),
                role: *role,
            }),
            AssignmentFlow::Idle => None,
        };

        AppSnapshot {
            members,
            roster_full: self.roster.is_full(),
            selection,
            pool_status: self.pool_status,
            available_champions: self
                .pool
                .as_ref()
                .map_or(0, |p| p.available(&self.roster).len()),
            last_export: self.last_export.as_ref().map(|p| p.display().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the controller until `Quit` arrives or the command channel closes.
///
/// Loads the champion pool from `source` in the background; until it lands,
/// opening an assignment is rejected.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
    source: Box<dyn ChampionSource>,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let mut pool_task = tokio::spawn(async move { champions::load(source.as_ref()).await });
    let mut pool_pending = true;

    send_snapshot(&state, &ui_tx).await;

    loop {
        tokio::select! {
            // --- Champion pool load ---
            result = &mut pool_task, if pool_pending => {
                pool_pending = false;
                let outcome = match result {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!("Champion load task failed: {}", e);
                        LoadOutcome {
                            pool: ChampionPool::fallback(),
                            warning: Some(
                                "Could not load the champion list. Using the built-in list."
                                    .to_string(),
                            ),
                        }
                    }
                };
                if let Some(notice) = state.install_pool(outcome) {
                    let _ = ui_tx.send(UiUpdate::Notify(notice)).await;
                }
                send_snapshot(&state, &ui_tx).await;
            }

            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    if pool_pending {
        pool_task.abort();
    }
    info!("Application event loop exiting");
    Ok(())
}

async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    if let Some(notice) = state.apply_command(cmd) {
        let _ = ui_tx.send(UiUpdate::Notify(notice)).await;
    }
    send_snapshot(state, ui_tx).await;
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(snapshot)))
        .await;
}

// ---------------------------------------------------------------------------
// Session recovery
// ---------------------------------------------------------------------------

/// Restore the roster saved by a previous run, plus the path of the most
/// recent export.
///
/// A saved roster that cannot be decoded or breaks a roster invariant is
/// discarded and the session starts fresh. Returns whether a roster was
/// restored.
pub fn recover_from_db(state: &mut AppState) -> anyhow::Result<bool> {
    match state.db.recent_exports(1) {
        Ok(mut paths) => state.last_export = paths.pop().map(PathBuf::from),
        Err(e) => warn!("Failed to read export log: {:#}", e),
    }

    let roster = match state.db.load_session() {
        Ok(Some(roster)) => roster,
        Ok(None) => {
            info!("No saved session, starting fresh");
            return Ok(false);
        }
        Err(e) => {
            warn!("Saved session is unreadable, discarding it: {:#}", e);
            discard_session(state);
            return Ok(false);
        }
    };

    if !roster.check_invariants() {
        warn!("Saved session is inconsistent, discarding it");
        discard_session(state);
        return Ok(false);
    }

    info!(
        "Session recovery: restored {} members (cursor {})",
        roster.len(),
        roster.turn_cursor()
    );
    state.roster = roster;
    Ok(true)
}

fn discard_session(state: &AppState) {
    if let Err(e) = state.db.clear_session() {
        warn!("Failed to clear saved session: {:#}", e);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Returns whether the command made it onto the queue, so callers holding
/// an in-flight flag can release it when the dispatch itself fails.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = match &cmd {
        BackendCommand::Login { .. } => "login",
        BackendCommand::LoadUsers => "load_users",
        BackendCommand::LoadDashboard => "load_dashboard",
        BackendCommand::UpdateUserStatus { .. } => "update_user_status",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); retry sign-in"
                    .to_string();
            false
        }
    }
}

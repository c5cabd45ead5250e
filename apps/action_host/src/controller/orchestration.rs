//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::HostCommand;

pub fn dispatch_host_command(
    cmd_tx: &Sender<HostCommand>,
    cmd: HostCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        HostCommand::InvokeAction => "invoke_action",
        HostCommand::ComputeSum { .. } => "compute_sum",
        HostCommand::Cancel => "cancel",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "Host command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup failure); restart the host"
                    .to_string();
        }
    }
}

//! Backend worker: owns the tokio runtime, the action invoker, and the sum
//! panel, and forwards their events to the hosting surface.

use std::{sync::Arc, thread};

use action_core::{
    sum_panel::{PanelEvent, SumPanel, SumPanelConfig},
    ActionConfig, ActionInvoker, HttpActionGateway,
};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{PageRefKind, RecordId};

use crate::{backend_bridge::commands::HostCommand, config::Settings, controller::events::UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<HostCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || run_worker(settings, cmd_rx, ui_tx));
}

fn run_worker(settings: Settings, cmd_rx: Receiver<HostCommand>, ui_tx: Sender<UiEvent>) {
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(format!(
                "backend worker startup failure: failed to build runtime: {err}"
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    runtime.block_on(async move {
        let gateway = match HttpActionGateway::new(settings.server_url.clone()) {
            Ok(gateway) => Arc::new(gateway),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(format!(
                    "backend worker startup failure: {err}"
                )));
                tracing::error!("failed to build action gateway: {err}");
                return;
            }
        };

        let invoker = ActionInvoker::new_with_dependencies(
            ActionConfig {
                record_id: RecordId::new(settings.record_id.clone()),
                title: settings.action_title.clone(),
            },
            gateway.clone(),
            gateway,
        );

        let mut toasts = invoker.subscribe_toasts();
        let toast_tx = ui_tx.clone();
        tokio::spawn(async move {
            while let Ok(toast) = toasts.recv().await {
                let _ = toast_tx.try_send(UiEvent::Toast(toast));
            }
        });

        let mut panel = SumPanel::new(SumPanelConfig {
            header_label: settings.sum_header_label.clone(),
        });
        // The host runs both components as quick-action surfaces.
        panel.page_reference(PageRefKind::QuickAction);

        let mut panel_events = panel.subscribe_events();
        let panel_tx = ui_tx.clone();
        tokio::spawn(async move {
            while let Ok(event) = panel_events.recv().await {
                match event {
                    PanelEvent::CloseActionScreen => {
                        let _ = panel_tx.try_send(UiEvent::CloseActionScreen);
                    }
                }
            }
        });

        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                HostCommand::InvokeAction => {
                    // Spawned so repeated invokes hit the single-flight guard
                    // instead of queueing behind the command loop.
                    let invoker = Arc::clone(&invoker);
                    tokio::spawn(async move {
                        invoker.invoke().await;
                    });
                }
                HostCommand::ComputeSum { num1, num2 } => {
                    panel.handle_addition(&num1, &num2);
                    let _ = ui_tx.try_send(UiEvent::SumComputed(panel.sum().to_string()));
                }
                HostCommand::Cancel => {
                    panel.handle_cancel();
                }
            }
        }
    });
}

//! Backend worker: owns the tokio runtime and the API client, drains the UI
//! command queue, and pushes results back as [`UiEvent`]s.

use std::thread;

use client_core::{AdminApiClient, UserDirectoryService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = AdminApiClient::new();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            // Fetches and saves run as detached tasks so a slow request never
            // stalls the command queue; saves for different users may overlap
            // and complete in any order. If the UI has been torn down the
            // event channel is disconnected and the result is dropped.
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Login {
                        server_url,
                        admin_id,
                        password,
                    } => match client.login(&server_url, &admin_id, &password).await {
                        Ok(profile) => {
                            let _ = ui_tx.try_send(UiEvent::LoginOk(profile));
                        }
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::Login,
                                err.to_string(),
                            )));
                        }
                    },
                    BackendCommand::LoadUsers => {
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            match client.list_users().await {
                                Ok(listing) => {
                                    let _ = ui_tx.try_send(UiEvent::UsersLoaded(listing));
                                }
                                Err(err) => {
                                    let _ =
                                        ui_tx.try_send(UiEvent::UsersLoadFailed(err.to_string()));
                                }
                            }
                        });
                    }
                    BackendCommand::LoadDashboard => {
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            match client.dashboard_overview().await {
                                Ok(overview) => {
                                    let _ = ui_tx.try_send(UiEvent::DashboardLoaded(overview));
                                }
                                Err(err) => {
                                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                        UiErrorContext::General,
                                        err.to_string(),
                                    )));
                                }
                            }
                        });
                    }
                    BackendCommand::UpdateUserStatus { user_id, status } => {
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            match client.update_status(&user_id, status).await {
                                Ok(_ack) => {
                                    let _ =
                                        ui_tx.try_send(UiEvent::StatusSaved { user_id, status });
                                }
                                Err(err) => {
                                    let _ = ui_tx.try_send(UiEvent::StatusSaveFailed {
                                        user_id,
                                        message: err.to_string(),
                                    });
                                }
                            }
                        });
                    }
                }
            }
        });
    });
}

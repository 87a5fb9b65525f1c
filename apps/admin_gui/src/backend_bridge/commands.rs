//! Backend commands queued from UI to backend worker.

use shared::domain::{RegistrationStatus, UserId};

pub enum BackendCommand {
    Login {
        server_url: String,
        admin_id: String,
        password: String,
    },
    LoadUsers,
    LoadDashboard,
    UpdateUserStatus {
        user_id: UserId,
        status: RegistrationStatus,
    },
}

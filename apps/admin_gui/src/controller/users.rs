//! View controller for the user-management screen.
//!
//! Owns the loaded directory, the filter criteria, the two page cursors,
//! the per-user status drafts, and the per-user save-in-flight guard. Both
//! presentations (cards and table) read and write this one controller, so a
//! draft entered in one mode is visible in the other.

use std::collections::{HashMap, HashSet};

use shared::domain::{RegistrationStatus, StatusParseError, UserId, UserRecord, UserType};

use crate::controller::filter::{filter_users, FilterCriteria};
use crate::controller::pagination::{page_bounds, page_count, PageCursors, ViewMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// The visible page of the filtered collection for one presentation mode.
/// Rows are cloned out so rendering never holds a borrow on the controller.
pub struct PageView {
    pub users: Vec<UserRecord>,
    pub page: usize,
    pub page_count: usize,
    pub filtered_count: usize,
    /// 0-based index of the first visible row within the filtered view.
    pub start_index: usize,
}

/// Aggregates over the filtered view feeding the stats cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub active_auctions: u32,
}

pub struct UsersController {
    users: Vec<UserRecord>,
    load_state: LoadState,
    criteria: FilterCriteria,
    view_mode: ViewMode,
    cursors: PageCursors,
    drafts: HashMap<UserId, RegistrationStatus>,
    saving: HashSet<UserId>,
}

impl UsersController {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            load_state: LoadState::Loading,
            criteria: FilterCriteria::default(),
            view_mode: ViewMode::Cards,
            cursors: PageCursors::new(),
            drafts: HashMap::new(),
            saving: HashSet::new(),
        }
    }

    // ---------- load lifecycle ----------

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn set_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub fn set_loaded(&mut self, users: Vec<UserRecord>) {
        self.users = users;
        self.load_state = LoadState::Ready;
    }

    pub fn set_load_failed(&mut self, message: String) {
        self.load_state = LoadState::Failed(message);
    }

    // ---------- criteria (every change resets both cursors) ----------

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search(&mut self, search: String) {
        if self.criteria.search != search {
            self.criteria.search = search;
            self.cursors.reset();
        }
    }

    pub fn set_type_filter(&mut self, user_type: Option<UserType>) {
        if self.criteria.user_type != user_type {
            self.criteria.user_type = user_type;
            self.cursors.reset();
        }
    }

    pub fn set_status_filter(&mut self, status: Option<RegistrationStatus>) {
        if self.criteria.status != status {
            self.criteria.status = status;
            self.cursors.reset();
        }
    }

    pub fn set_only_active_auctions(&mut self, only_active: bool) {
        if self.criteria.only_active_auctions != only_active {
            self.criteria.only_active_auctions = only_active;
            self.cursors.reset();
        }
    }

    // ---------- presentation mode & paging ----------

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            self.view_mode = mode;
            self.cursors.reset();
        }
    }

    pub fn page(&self, mode: ViewMode) -> usize {
        self.cursors.page(mode)
    }

    pub fn set_page(&mut self, mode: ViewMode, requested: usize) {
        let filtered_count = self.filtered().len();
        self.cursors.set_page(mode, requested, filtered_count);
    }

    pub fn filtered(&self) -> Vec<&UserRecord> {
        filter_users(&self.users, &self.criteria)
    }

    pub fn filtered_stats(&self) -> FilteredStats {
        let filtered = self.filtered();
        FilteredStats {
            total: filtered.len(),
            approved: filtered
                .iter()
                .filter(|u| u.registration_status == RegistrationStatus::Approved)
                .count(),
            pending: filtered
                .iter()
                .filter(|u| u.registration_status == RegistrationStatus::Pending)
                .count(),
            active_auctions: filtered
                .iter()
                .map(|u| u.activity_stats.active_auctions_count)
                .sum(),
        }
    }

    /// The visible slice for the active presentation mode.
    pub fn page_view(&self) -> PageView {
        self.page_view_for(self.view_mode)
    }

    pub fn page_view_for(&self, mode: ViewMode) -> PageView {
        let filtered = self.filtered();
        let size = mode.page_size();
        let pages = page_count(filtered.len(), size);
        let page = self.cursors.page(mode).min(pages);
        let (start, end) = page_bounds(filtered.len(), page, size);
        PageView {
            users: filtered[start..end].iter().map(|u| (*u).clone()).collect(),
            page,
            page_count: pages,
            filtered_count: filtered.len(),
            start_index: start,
        }
    }

    // ---------- drafts ----------

    /// The status to display for a row: the unsaved draft when one exists,
    /// otherwise the persisted value.
    pub fn display_status(&self, user: &UserRecord) -> RegistrationStatus {
        self.drafts
            .get(&user.user_id)
            .copied()
            .unwrap_or(user.registration_status)
    }

    pub fn set_draft(&mut self, user_id: UserId, status: RegistrationStatus) {
        self.drafts.insert(user_id, status);
    }

    /// Parse-and-set for status values arriving as text. Unknown labels are
    /// rejected here, before any draft exists, so an out-of-enumeration
    /// value can never be submitted.
    pub fn set_draft_label(&mut self, user_id: UserId, label: &str) -> Result<(), StatusParseError> {
        let status = label.parse::<RegistrationStatus>()?;
        self.set_draft(user_id, status);
        Ok(())
    }

    pub fn has_draft(&self, user_id: &UserId) -> bool {
        self.drafts.contains_key(user_id)
    }

    // ---------- save workflow ----------

    pub fn is_saving(&self, user_id: &UserId) -> bool {
        self.saving.contains(user_id)
    }

    /// Single-flight gate for the save workflow. Returns the status to
    /// submit and flips the in-flight flag, or `None` when a save for this
    /// user is already outstanding (the request is dropped, not queued) or
    /// the user is unknown.
    pub fn begin_save(&mut self, user_id: &UserId) -> Option<RegistrationStatus> {
        if self.saving.contains(user_id) {
            return None;
        }
        let status = {
            let user = self.users.iter().find(|u| &u.user_id == user_id)?;
            self.display_status(user)
        };
        self.saving.insert(user_id.clone());
        Some(status)
    }

    /// Successful save: the persisted record takes the submitted value and
    /// the draft is cleared, so a later external refresh cannot be masked by
    /// a stale override.
    pub fn complete_save(&mut self, user_id: &UserId, status: RegistrationStatus) {
        self.saving.remove(user_id);
        if let Some(user) = self.users.iter_mut().find(|u| &u.user_id == user_id) {
            user.registration_status = status;
        }
        self.drafts.remove(user_id);
    }

    /// Failed save: the draft stays for a manual retry, only the in-flight
    /// flag clears.
    pub fn fail_save(&mut self, user_id: &UserId) {
        self.saving.remove(user_id);
    }
}

impl Default for UsersController {
    fn default() -> Self {
        Self::new()
    }
}

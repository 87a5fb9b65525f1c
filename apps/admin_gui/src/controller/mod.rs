//! Controller layer: UI events, the user-list view controller, and command
//! orchestration.

pub mod events;
pub mod filter;
pub mod orchestration;
pub mod pagination;
pub mod users;

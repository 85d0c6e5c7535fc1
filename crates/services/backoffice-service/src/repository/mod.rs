//! Repository layer for data access.
//!
//! [`Store`] is one generic gateway per entity type. Reads go straight to the
//! database; writes are staged in a change set shared by every store of the
//! same unit of work and only reach the database on commit.

mod change_set;
pub mod entities;
mod record;
mod store;

pub(crate) use change_set::ChangeSet;
pub use change_set::ChangeKind;
pub use entities::product::ProductInclude;
pub use entities::user::UserInclude;
pub use entities::user_role::MembershipInclude;
pub use record::{generated_key, NoInclude, Record};
pub use store::{Store, Tracking};

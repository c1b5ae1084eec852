//! Principal domain entities: admins, moderators, and users.

pub mod kind;
pub mod model;
pub mod role;
pub mod status;

pub use kind::PrincipalKind;
pub use model::{CreatePrincipal, PrincipalRecord};
pub use role::Role;
pub use status::PrincipalStatus;

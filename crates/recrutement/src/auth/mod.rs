//! Session lifecycle and access control.
//!
//! [`role`] folds raw backend role strings to the canonical set,
//! [`session`] owns the durable token/user pair, [`gateway`] drives
//! login and registration, and [`guard`] is the pure decision function
//! every view consults before rendering.

pub mod gateway;
pub mod guard;
pub mod role;
pub mod session;

pub use gateway::{AuthError, AuthGateway, AuthTransport, HttpAuthTransport, RegisterRequest};
pub use guard::{decide, paths, RouteAction};
pub use role::Role;
pub use session::{Session, SessionState, SessionStore, SessionVault, User, VaultError};

pub mod api;
pub mod application;
pub mod cli;
pub mod domain;

pub use domain::*;
pub use application::{Session, SessionStore, SplitService};

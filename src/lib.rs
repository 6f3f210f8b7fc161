#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod audio;
pub mod bootstrap;
pub mod config;
pub mod display;
pub mod error;
pub mod pacing;
pub mod platform;
mod run;

pub use crate::bootstrap::{Context, Game, MainLoop, Platform, bootstrap};
pub use crate::error::{BootstrapError, HostResult, Stage};
pub use crate::pacing::Tick;
pub use crate::platform::WinitPlatform;
pub use crate::run::run;

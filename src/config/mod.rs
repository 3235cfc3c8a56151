#[cfg(feature = "cli")]
pub mod cli;
pub mod roster;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use roster::RosterConfig;

use crate::adapters::render::DisplayFormat;
use crate::config::roster::RosterConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "angry-cats")]
#[command(about = "Rank angry cats from the terminal")]
pub struct CliConfig {
    /// Path to a TOML roster; the built-in cats are used when omitted
    #[arg(long)]
    pub roster: Option<String>,

    /// Overrides the roster's display format
    #[arg(long, value_enum)]
    pub format: Option<DisplayFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn load_roster(&self) -> Result<RosterConfig> {
        let roster = match &self.roster {
            Some(path) => {
                tracing::info!("📁 Loading roster from: {}", path);
                RosterConfig::from_file(path)?
            }
            None => RosterConfig::default(),
        };
        roster.validate()?;
        Ok(roster)
    }

    /// CLI flag wins over the roster file, table is the fallback.
    pub fn display_format(&self, roster: &RosterConfig) -> Result<DisplayFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => Ok(roster.display_format()?.unwrap_or_default()),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.roster {
            validation::validate_path("roster", path)?;
        }
        Ok(())
    }
}

use crate::domain::model::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankError {
    #[error("Item {item} must have a rank defined before being added to the list")]
    MissingRankError { item: ItemId },

    #[error("Invalid rank {rank} for item {item}: expected {expected}")]
    InvalidRankError { item: ItemId, rank: u32, expected: u32 },

    #[error("Item {item} is not a member of the list")]
    UnknownItemError { item: ItemId },

    #[error("Item {item} is already a member of the list")]
    DuplicateItemError { item: ItemId },

    #[error("Rank invariant violated: {message}")]
    InvariantViolationError { message: String },

    #[error("Ranked list driver is no longer running")]
    ChannelClosedError,

    #[error("Could not parse gesture '{input}': {reason}")]
    GestureParseError { input: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 排名操作被拒絕 (呼叫端錯誤)
    Ranking,
    /// 內部狀態損壞
    Integrity,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RankError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RankError::MissingRankError { .. }
            | RankError::InvalidRankError { .. }
            | RankError::UnknownItemError { .. }
            | RankError::DuplicateItemError { .. } => ErrorCategory::Ranking,
            RankError::InvariantViolationError { .. } => ErrorCategory::Integrity,
            RankError::GestureParseError { .. } => ErrorCategory::Input,
            RankError::ConfigError { .. }
            | RankError::ConfigValidationError { .. }
            | RankError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RankError::ChannelClosedError
            | RankError::IoError(_)
            | RankError::SerializationError(_)
            | RankError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Ranking => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Integrity | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給使用者的修正建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RankError::MissingRankError { .. } => {
                "Append the item without a rank, or set its rank to the next free position"
            }
            RankError::InvalidRankError { .. } => {
                "Explicit ranks must equal the current list size plus one"
            }
            RankError::UnknownItemError { .. } => "Pick a rank that is shown in the current table",
            RankError::DuplicateItemError { .. } => "Give every item a distinct id",
            RankError::InvariantViolationError { .. } => {
                "The ranking is corrupted; restart from a fresh roster"
            }
            RankError::ChannelClosedError => "Restart the application",
            RankError::GestureParseError { .. } => {
                "Use one of: up <rank>, down <rank>, dq <rank>, vote <rank>, show, quit"
            }
            RankError::ConfigError { .. }
            | RankError::ConfigValidationError { .. }
            | RankError::InvalidConfigValueError { .. } => "Check the roster TOML file",
            RankError::IoError(_) => "Check that the file exists and is readable",
            RankError::SerializationError(_) | RankError::CsvError(_) => {
                "Try a different display format"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Ranking => format!("That move is not allowed: {}", self),
            ErrorCategory::Integrity => format!("Internal ranking error: {}", self),
            ErrorCategory::Input => format!("Unrecognized command: {}", self),
            ErrorCategory::Configuration => format!("Roster configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RankError>;

//! Primitive world actions and their failure modes.
use crate::error::{ErrorSeverity, TileworldError};
use crate::grid::{Coordinate, Direction};

/// The single primitive an agent emits per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Step one cell (or stay put with [`Direction::Idle`]).
    Move(Direction),
    /// Pick up the collectible on the agent's cell.
    Collect,
    /// Drop one carried object into the disposal site on the agent's cell.
    Deposit,
    /// Refill fuel at the fuel resource on the agent's cell.
    Refuel,
}

impl Action {
    pub const IDLE: Self = Action::Move(Direction::Idle);

    pub const fn label(self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::Collect => "collect",
            Action::Deposit => "deposit",
            Action::Refuel => "refuel",
        }
    }
}

/// Rejection reported by the world when an action cannot be carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("destination {destination} is blocked")]
    Blocked { destination: Coordinate },

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Coordinate },

    #[error("agent has no fuel left")]
    OutOfFuel,

    #[error("no collectible object at {position}")]
    NothingToCollect { position: Coordinate },

    #[error("carry limit of {limit} objects reached")]
    CarryLimit { limit: u32 },

    #[error("agent carries no object to deposit")]
    NothingToDeposit,

    #[error("no disposal site at {position}")]
    NoDisposalSite { position: Coordinate },

    #[error("no fuel resource at {position}")]
    NoFuelResource { position: Coordinate },
}

impl ActionError {
    /// True for the "cell became impassable between planning and execution" case.
    pub fn is_blocked(&self) -> bool {
        matches!(self, ActionError::Blocked { .. })
    }
}

impl TileworldError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::Blocked { .. } | ActionError::OutOfFuel => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::Blocked { .. } => "ACTION_BLOCKED",
            ActionError::OutOfBounds { .. } => "ACTION_OUT_OF_BOUNDS",
            ActionError::OutOfFuel => "ACTION_OUT_OF_FUEL",
            ActionError::NothingToCollect { .. } => "ACTION_NOTHING_TO_COLLECT",
            ActionError::CarryLimit { .. } => "ACTION_CARRY_LIMIT",
            ActionError::NothingToDeposit => "ACTION_NOTHING_TO_DEPOSIT",
            ActionError::NoDisposalSite { .. } => "ACTION_NO_DISPOSAL_SITE",
            ActionError::NoFuelResource { .. } => "ACTION_NO_FUEL_RESOURCE",
        }
    }
}

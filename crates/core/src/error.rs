//! Failure taxonomy for state-mutating operations.
//! `ActionFailure` is the expected, recoverable category: the world is untouched and the reason is
//! shown to the player. Every other `GameError` variant is an invariant violation.

use crate::types::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionFailure {
    #[error("That way is blocked.")]
    Blocked,

    #[error("Nothing to attack.")]
    NothingToAttack,

    #[error("There is nothing here to pick up.")]
    NothingHere,

    #[error("Your inventory is full.")]
    InventoryFull,

    #[error("Your health is already full.")]
    AlreadyFull,

    #[error("No enemy is close enough to strike.")]
    NoTargetInRange,

    #[error("You cannot target an area you cannot see.")]
    CannotTargetUnseen,

    #[error("There are no targets in the radius.")]
    NoTargetsInRadius,

    #[error("You must select an enemy to target.")]
    NoTargetSelected,

    #[error("You cannot confuse yourself!")]
    CannotTargetSelf,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Impossible(#[from] ActionFailure),

    #[error("entity {0:?} does not exist")]
    MissingEntity(EntityId),

    #[error("entity {0:?} is not an actor")]
    NotAnActor(EntityId),

    #[error("entity {0:?} is not an item")]
    NotAnItem(EntityId),

    #[error("item {item:?} is not held by {holder:?}")]
    ItemNotHeld { holder: EntityId, item: EntityId },

    #[error("the player entity is missing from the world")]
    PlayerMissing,
}

impl GameError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::Impossible(_))
    }

    pub fn as_failure(&self) -> Option<ActionFailure> {
        match self {
            GameError::Impossible(failure) => Some(*failure),
            _ => None,
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;

//! Status enums and their allowed transitions
//!
//! Statuses travel over the wire as SCREAMING_SNAKE_CASE strings. A value
//! outside the enum is rejected when the request body is deserialized.

use crate::core::error::EntityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A finite set of statuses with a fixed transition table
pub trait StatusFlow: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Every value of the enum, in lifecycle order
    const ALL: &'static [Self];

    /// Wire representation of the value
    fn as_str(&self) -> &'static str;

    /// Statuses reachable from this one
    fn next_states(&self) -> &'static [Self];

    fn can_transition_to(&self, next: Self) -> bool {
        self.next_states().contains(&next)
    }

    fn is_terminal(&self) -> bool {
        self.next_states().is_empty()
    }

    /// Check a transition, naming the entity in the error
    fn ensure_transition(&self, next: Self, entity_type: &str) -> Result<(), EntityError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(EntityError::InvalidTransition {
                entity_type: entity_type.to_string(),
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => $wire:literal => [ $( $next:ident ),* ] ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $( $variant ),+
        }

        impl StatusFlow for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }

            fn next_states(&self) -> &'static [Self] {
                match self {
                    $( $name::$variant => &[ $( $name::$next ),* ] ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_enum!(
    /// Lifecycle of a customer order
    OrderStatus {
        Pending => "PENDING" => [Approved, Cancelled],
        Approved => "APPROVED" => [InProgress, Cancelled],
        InProgress => "IN_PROGRESS" => [Completed, Cancelled],
        Completed => "COMPLETED" => [],
        Cancelled => "CANCELLED" => [],
    }
);

status_enum!(
    /// Lifecycle of a work order executed for an order
    WorkOrderStatus {
        Pending => "PENDING" => [InProgress, Cancelled],
        InProgress => "IN_PROGRESS" => [OnHold, Completed, Cancelled],
        OnHold => "ON_HOLD" => [InProgress, Cancelled],
        Completed => "COMPLETED" => [],
        Cancelled => "CANCELLED" => [],
    }
);

status_enum!(
    /// Lifecycle of an expense order charged to a work order
    ExpenseOrderStatus {
        Pending => "PENDING" => [Approved, Rejected],
        Approved => "APPROVED" => [Paid],
        Rejected => "REJECTED" => [],
        Paid => "PAID" => [],
    }
);

status_enum!(
    /// Review state of an order edit request
    EditRequestStatus {
        Pending => "PENDING" => [Approved, Rejected],
        Approved => "APPROVED" => [],
        Rejected => "REJECTED" => [],
    }
);

/// Describe a status enum for the `/statuses` endpoint
pub fn describe<S: StatusFlow>() -> serde_json::Value {
    let values: Vec<serde_json::Value> = S::ALL
        .iter()
        .map(|status| {
            serde_json::json!({
                "value": status.as_str(),
                "next": status.next_states().iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                "terminal": status.is_terminal(),
            })
        })
        .collect();
    serde_json::Value::Array(values)
}

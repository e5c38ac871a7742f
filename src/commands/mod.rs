//! Named public operations.
//!
//! The widget exposes a closed set of operations: attach, import-data and
//! detach. Hosts that drive it by name (scripts, command palettes) resolve
//! names here; an unknown name is a configuration error, never a silent
//! no-op.

// Operation API items are provided for external use
#![allow(dead_code)]

use std::str::FromStr;

use crate::error::AppError;

/// A public widget operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create and bind a widget instance.
    Attach,
    /// Bulk-import tag seeds into an attached widget.
    ImportData,
    /// Tear a widget instance down.
    Detach,
}

impl Operation {
    /// Every operation, in documentation order.
    pub const ALL: [Operation; 3] = [Operation::Attach, Operation::ImportData, Operation::Detach];

    /// The canonical operation name.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Attach => "attach",
            Operation::ImportData => "import-data",
            Operation::Detach => "detach",
        }
    }
}

impl FromStr for Operation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "attach" => Ok(Operation::Attach),
            "import-data" => Ok(Operation::ImportData),
            "detach" => Ok(Operation::Detach),
            other => Err(AppError::configuration(format!(
                "unknown operation '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(" attach ".parse::<Operation>().unwrap(), Operation::Attach);
    }

    #[test]
    fn test_unknown_operation_fails_loudly() {
        let err = "destory".parse::<Operation>().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("destory"));
    }

    #[test]
    fn test_empty_name_fails() {
        assert!("".parse::<Operation>().is_err());
    }
}

// ── Operation results ──

use crate::error::CoreError;

/// What a store operation did.
///
/// Failures are already recorded in the state's `error` field by the time
/// an operation returns; the `Rejected` arm carries the same message so
/// callers must acknowledge it.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The success transition was dispatched.
    Applied(T),
    /// Nothing was dispatched (cache hit).
    Unchanged,
    /// `rejected` was dispatched with `reason`.
    Rejected { reason: String },
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The applied value, if any.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Unchanged | Self::Rejected { .. } => None,
        }
    }

    /// `Ok(None)` for `Unchanged`, `Err(CoreError::Rejected)` for `Rejected`.
    pub fn into_result(self) -> Result<Option<T>, CoreError> {
        match self {
            Self::Applied(value) => Ok(Some(value)),
            Self::Unchanged => Ok(None),
            Self::Rejected { reason } => Err(CoreError::Rejected { reason }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejected_becomes_an_error() {
        let outcome: Outcome<u8> = Outcome::Rejected {
            reason: "nope".into(),
        };
        assert!(outcome.is_rejected());
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn unchanged_is_not_an_error() {
        let outcome: Outcome<u8> = Outcome::Unchanged;
        assert!(!outcome.is_applied());
        assert!(matches!(outcome.into_result(), Ok(None)));
    }

    #[test]
    fn applied_yields_the_value() {
        assert_eq!(Outcome::Applied(3).applied(), Some(3));
    }
}

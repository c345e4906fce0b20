//! Status state machines for chunks and batches.
//!
//! Statuses are persisted as small integers and must round-trip exactly.
//! They are only advanced through the repository's named update operations,
//! which reject any transition not listed in the `can_transition` tables. A
//! terminal status never reverts to a non-terminal one.

/// An invalid persisted status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStatus(pub i16);

impl std::fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid status value {}", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

macro_rules! status_enum {
    ($(#[$doc:meta])* $name:ident { $($(#[$vdoc:meta])* $variant:ident = $value:literal => $str:literal,)* }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(i16)]
        pub enum $name {
            $($(#[$vdoc])* $variant = $value,)*
        }

        impl $name {
            /// Returns the status name.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)*
                }
            }
        }

        impl TryFrom<i16> for $name {
            type Error = InvalidStatus;

            fn try_from(value: i16) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)*
                    _ => Err(InvalidStatus(value)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_enum!(
    /// The proving lifecycle of a chunk or batch.
    ProvingStatus {
        /// No prover has been assigned yet.
        Unassigned = 1 => "unassigned",
        /// A prover is working on the task.
        Assigned = 2 => "assigned",
        /// A proof has been generated.
        Proved = 3 => "proved",
        /// The proof has been verified.
        Verified = 4 => "verified",
        /// Proof generation failed.
        Failed = 5 => "failed",
        /// Proving was skipped for an optional aggregate.
        Skipped = 6 => "skipped",
    }
);

impl ProvingStatus {
    /// Returns true if the transition from `self` to `to` is legal.
    ///
    /// `Failed` is retryable externally by re-assigning; `Verified` and
    /// `Skipped` are terminal.
    pub const fn can_transition(&self, to: &Self) -> bool {
        matches!(
            (self, to),
            (Self::Unassigned, Self::Assigned | Self::Skipped) |
                (Self::Assigned, Self::Proved | Self::Failed | Self::Skipped) |
                (Self::Proved, Self::Verified) |
                (Self::Failed, Self::Assigned)
        )
    }
}

status_enum!(
    /// The L1 settlement lifecycle of a batch.
    RollupStatus {
        /// The batch has not been submitted to L1.
        Pending = 1 => "pending",
        /// The batch commitment transaction has landed on L1.
        Committed = 2 => "committed",
        /// The batch has been finalized on L1.
        Finalized = 3 => "finalized",
        /// The finalization transaction failed.
        FinalizeFailed = 4 => "finalize failed",
        /// Finalization was bypassed by the skip sweep.
        FinalizationSkipped = 5 => "finalization skipped",
    }
);

impl RollupStatus {
    /// Returns true if the transition from `self` to `to` is legal.
    ///
    /// `Finalized` and `FinalizationSkipped` are terminal; `Committed` and
    /// `FinalizeFailed` are retryable.
    pub const fn can_transition(&self, to: &Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Committed | Self::FinalizationSkipped) |
                (
                    Self::Committed,
                    Self::Finalized | Self::FinalizeFailed | Self::FinalizationSkipped
                ) |
                (Self::FinalizeFailed, Self::Committed | Self::Finalized)
        )
    }

    /// Returns true if the status is terminal.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalized | Self::FinalizationSkipped)
    }
}

status_enum!(
    /// The gas-oracle import lifecycle of a batch.
    GasOracleStatus {
        /// No gas-price data has been imported for the batch.
        Pending = 1 => "pending",
        /// A gas-price import transaction is in flight.
        Importing = 2 => "importing",
        /// The gas-price data has been imported.
        Imported = 3 => "imported",
        /// The import transaction failed.
        ImportFailed = 4 => "import failed",
    }
);

impl GasOracleStatus {
    /// Returns true if the transition from `self` to `to` is legal.
    ///
    /// `Imported` is terminal; `ImportFailed` is retryable.
    pub const fn can_transition(&self, to: &Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Importing) |
                (Self::Importing, Self::Imported | Self::ImportFailed) |
                (Self::ImportFailed, Self::Importing)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_integer_round_trip() {
        for value in 1i16..=6 {
            let status = ProvingStatus::try_from(value).unwrap();
            assert_eq!(status as i16, value);
        }
        for value in 1i16..=5 {
            let status = RollupStatus::try_from(value).unwrap();
            assert_eq!(status as i16, value);
        }
        for value in 1i16..=4 {
            let status = GasOracleStatus::try_from(value).unwrap();
            assert_eq!(status as i16, value);
        }
        assert_eq!(ProvingStatus::try_from(0), Err(InvalidStatus(0)));
        assert_eq!(RollupStatus::try_from(6), Err(InvalidStatus(6)));
        assert_eq!(GasOracleStatus::try_from(-1), Err(InvalidStatus(-1)));
    }

    #[test]
    fn test_terminal_rollup_statuses_reject_transitions() {
        let all = [
            RollupStatus::Pending,
            RollupStatus::Committed,
            RollupStatus::Finalized,
            RollupStatus::FinalizeFailed,
            RollupStatus::FinalizationSkipped,
        ];
        for to in &all {
            assert!(!RollupStatus::Finalized.can_transition(to));
            assert!(!RollupStatus::FinalizationSkipped.can_transition(to));
        }
    }

    #[test]
    fn test_proving_transitions() {
        assert!(ProvingStatus::Unassigned.can_transition(&ProvingStatus::Assigned));
        assert!(ProvingStatus::Unassigned.can_transition(&ProvingStatus::Skipped));
        assert!(ProvingStatus::Assigned.can_transition(&ProvingStatus::Proved));
        assert!(ProvingStatus::Proved.can_transition(&ProvingStatus::Verified));
        assert!(ProvingStatus::Failed.can_transition(&ProvingStatus::Assigned));
        assert!(!ProvingStatus::Unassigned.can_transition(&ProvingStatus::Verified));
        assert!(!ProvingStatus::Verified.can_transition(&ProvingStatus::Assigned));
        assert!(!ProvingStatus::Skipped.can_transition(&ProvingStatus::Assigned));
        assert!(!ProvingStatus::Assigned.can_transition(&ProvingStatus::Assigned));
    }
}

/// Identifier for an emitter in a [`crate::lattice::Lattice`].
///
/// This is an index into `Lattice::emitters`, and is only meaningful within
/// the lifetime of a given `Lattice` instance.
pub type EmitterId = usize;

/// Activation status of an emitter.
///
/// `0` is terminal: once a site is quenched it never reactivates. Ordinary
/// active sites hold `1`; chain-linked sites start at the chain constant and
/// may be depleted step by step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Status(u32);

impl Status {
    pub const INACTIVE: Status = Status(0);
    pub const ACTIVE: Status = Status(1);
    /// Default chain constant: three stacked layers merged into one site.
    pub const CHAIN_LINKED: Status = Status(3);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn is_active(self) -> bool {
        self.0 > 0
    }

    /// Lowers the status by `strength`, stopping at [`Status::INACTIVE`].
    pub const fn deplete(self, strength: u32) -> Self {
        Self(self.0.saturating_sub(strength))
    }
}

impl From<Status> for u64 {
    fn from(status: Status) -> Self {
        u64::from(status.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deplete_saturates_at_inactive() {
        assert_eq!(Status::CHAIN_LINKED.deplete(2), Status::ACTIVE);
        assert_eq!(Status::ACTIVE.deplete(3), Status::INACTIVE);
        assert_eq!(Status::INACTIVE.deplete(1), Status::INACTIVE);
    }

    #[test]
    fn only_zero_is_inactive() {
        assert!(!Status::INACTIVE.is_active());
        assert!(Status::ACTIVE.is_active());
        assert!(Status::new(7).is_active());
    }
}

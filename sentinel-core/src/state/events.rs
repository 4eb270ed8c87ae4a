//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Interrupt events
    /// Motion sensor edge while armed
    Motion,
    /// Grace countdown reached its threshold
    GraceElapsed,

    // Sequencing events
    /// Motion notice shown, PIN entry opened
    EntryPrompted,
    /// Disarm notice shown
    DisarmNoticed,

    // PIN events
    /// OK pressed with the correct PIN
    PinAccepted,
    /// OK pressed with any other PIN
    PinRejected,

    // Rearm menu events
    /// User chose to arm again
    ArmSelected,
    /// User chose to shut down
    PowerDownSelected,
}

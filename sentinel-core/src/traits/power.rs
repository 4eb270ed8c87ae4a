//! CPU power control on the master

/// Sleep modes used by the control loop
pub trait PowerControl {
    /// Sleep until the next interrupt (motion edge or timer tick)
    fn idle(&mut self);

    /// Enter the lowest-power sleep
    ///
    /// On hardware this does not return; only a reset leaves it. Test
    /// doubles return so the caller can observe that it happened.
    fn power_down(&mut self);
}

impl<T: PowerControl + ?Sized> PowerControl for &mut T {
    fn idle(&mut self) {
        T::idle(self)
    }

    fn power_down(&mut self) {
        T::power_down(self)
    }
}

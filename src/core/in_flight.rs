// src/core/in_flight.rs

/// Marks a request as outstanding for as long as the guard lives. The flag is cleared on
/// drop, so a caller that abandons the future (timeout, `select!`) cannot leave it set.
pub(crate) struct InFlight<'a> {
    flag: &'a mut bool,
}

impl<'a> InFlight<'a> {
    pub(crate) fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

/// One effect send/return pair that can be inserted into the signal chain.
///
/// `send` and `ret` are crosspoint-matrix coordinates (column and row)
/// fixed by the physical installation; they are assigned once at startup
/// from the wiring table in [`routing`](crate::routing) and are not edited
/// per preset. Only `state` and `order` change between presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Loop {
    /// `true` when the loop is in the signal chain, `false` when bypassed.
    pub state: bool,
    /// Position in the active chain. Meaningful only while `state` is set.
    pub order: u8,
    /// Matrix column the loop's send jack is wired to.
    pub send: u8,
    /// Matrix row the loop's return jack is wired to.
    pub ret: u8,
}

impl Loop {
    /// Create a loop with explicit field values.
    pub fn new(state: bool, order: u8, send: u8, ret: u8) -> Self {
        Self {
            state,
            order,
            send,
            ret,
        }
    }

    /// Flip the loop between active and bypassed.
    pub fn toggle(&mut self) {
        self.state = !self.state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_bypassed() {
        let l = Loop::default();
        assert!(!l.state);
        assert_eq!(l.order, 0);
    }

    #[test]
    fn toggle_flips_state_both_ways() {
        let mut l = Loop::new(false, 2, 5, 6);
        l.toggle();
        assert!(l.state);
        l.toggle();
        assert!(!l.state);
        // The other fields are untouched.
        assert_eq!((l.order, l.send, l.ret), (2, 5, 6));
    }
}

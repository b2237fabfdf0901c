//! Signal routing: turning a preset's active loops into crosspoint-matrix
//! connections.
//!
//! The matrix is a passive crossbar. Putting N active loops in series
//! takes exactly N + 1 point-to-point connections: input jack into the
//! first loop's send, each loop's return into the next loop's send, and
//! the last loop's return into the output jack. With no active loops the
//! input is wired straight to the output.
//!
//! The chain sequence comes from the loops' `order` values, independent
//! of physical loop numbering. Active loops are sorted by `order`, so a
//! non-contiguous order set (possible after ad-hoc toggles) still yields
//! a correct chain in relative order.

use heapless::Vec;

use crate::preset::{Preset, MAX_LOOPS};

/// One crosspoint of an analog switch matrix.
///
/// The driver performs no sequencing validation — the router is
/// responsible for issuing a consistent set of connections.
pub trait CrosspointMatrix {
    /// Driver-level error type.
    type Error;

    /// Connect (`on = true`) or disconnect one crosspoint.
    fn set_switch(&mut self, row: u8, column: u8, on: bool) -> Result<(), Self::Error>;

    /// Open every crosspoint. Idempotent.
    fn clear_all(&mut self) -> Result<(), Self::Error>;
}

/// Physical wiring of one loop slot: matrix send column and return row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopIo {
    /// Matrix column the loop's send jack is wired to.
    pub send: u8,
    /// Matrix row the loop's return jack is wired to.
    pub ret: u8,
}

/// Wiring table of the reference build: seven loops on columns/rows 1–7,
/// leaving column 0 and row 0 for the output and input jacks.
///
/// Fixed per physical installation; applied to every loaded preset once
/// at startup by [`assign_loop_io`]. A different build changes only this
/// table.
pub const DEFAULT_LOOP_IO: [LoopIo; 7] = [
    LoopIo { send: 1, ret: 1 },
    LoopIo { send: 2, ret: 2 },
    LoopIo { send: 3, ret: 3 },
    LoopIo { send: 4, ret: 4 },
    LoopIo { send: 5, ret: 5 },
    LoopIo { send: 6, ret: 6 },
    LoopIo { send: 7, ret: 7 },
];

/// Bind a preset's loop slots to the installation wiring table.
///
/// This is the one-time `setup` phase of routing — an installation-time
/// binding, not a per-preset operation. Slots beyond the table (or a
/// table beyond the preset's slots) are left untouched.
pub fn assign_loop_io(preset: &mut Preset, table: &[LoopIo]) {
    for (index, io) in table.iter().enumerate() {
        preset.set_loop_io(index as u8, io.send, io.ret);
    }
}

/// Matrix coordinates of the pedal's own jacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RouterConfig {
    /// Row the input jack's buffer feeds into the matrix.
    pub input_return: u8,
    /// Column that drives the output jack.
    pub output_send: u8,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            input_return: 0,
            output_send: 0,
        }
    }
}

/// Builds the series chain for a preset on a [`CrosspointMatrix`].
pub struct SignalRouter {
    config: RouterConfig,
}

impl SignalRouter {
    /// Create a router for the given jack wiring.
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Wire the preset's active loops in series through the matrix.
    ///
    /// Always clears the whole matrix first, so stale connections from a
    /// previously routed preset cannot linger. Emits N + 1 connections
    /// for N active loops; N = 0 wires the input straight to the output.
    pub fn connect<M: CrosspointMatrix>(
        &self,
        preset: &Preset,
        matrix: &mut M,
    ) -> Result<(), M::Error> {
        matrix.clear_all()?;

        // (order, send, ret) of every active loop, sorted by order.
        let mut active: Vec<(u8, u8, u8), MAX_LOOPS> = Vec::new();
        for l in preset.loops() {
            if l.state {
                // Cannot overflow: the preset holds at most MAX_LOOPS loops.
                let _ = active.push((l.order, l.send, l.ret));
            }
        }
        active.sort_unstable_by_key(|&(order, _, _)| order);

        match active.first() {
            None => {
                // Pass-through.
                matrix.set_switch(self.config.input_return, self.config.output_send, true)?;
            }
            Some(&(_, first_send, _)) => {
                matrix.set_switch(self.config.input_return, first_send, true)?;
                for pair in active.windows(2) {
                    let (_, _, prev_ret) = pair[0];
                    let (_, next_send, _) = pair[1];
                    matrix.set_switch(prev_ret, next_send, true)?;
                }
                let (_, _, last_ret) = active[active.len() - 1];
                matrix.set_switch(last_ret, self.config.output_send, true)?;
            }
        }

        Ok(())
    }

    /// Disconnect everything — input, output, and all loops.
    pub fn mute<M: CrosspointMatrix>(&self, matrix: &mut M) -> Result<(), M::Error> {
        matrix.clear_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Loop;
    use core::convert::Infallible;

    /// Records every driver call in sequence.
    #[derive(Default)]
    struct RecordingMatrix {
        ops: Vec<MatrixOp, 40>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum MatrixOp {
        ClearAll,
        Set(u8, u8, bool),
    }

    impl CrosspointMatrix for RecordingMatrix {
        type Error = Infallible;

        fn set_switch(&mut self, row: u8, column: u8, on: bool) -> Result<(), Infallible> {
            let _ = self.ops.push(MatrixOp::Set(row, column, on));
            Ok(())
        }

        fn clear_all(&mut self) -> Result<(), Infallible> {
            let _ = self.ops.push(MatrixOp::ClearAll);
            Ok(())
        }
    }

    fn router() -> SignalRouter {
        SignalRouter::new(RouterConfig::default())
    }

    #[test]
    fn two_active_loops_issue_three_connections_in_order() {
        // Loop A: id 0, order 0, send 12, return 3.
        // Loop B: id 1, order 1, send 11, return 4.
        let mut p = Preset::new(0, 0);
        p.add_loop(Loop::new(true, 0, 12, 3));
        p.add_loop(Loop::new(true, 1, 11, 4));

        let mut m = RecordingMatrix::default();
        router().connect(&p, &mut m).unwrap();

        assert_eq!(
            &m.ops[..],
            &[
                MatrixOp::ClearAll,
                MatrixOp::Set(0, 12, true),
                MatrixOp::Set(3, 11, true),
                MatrixOp::Set(4, 0, true),
            ]
        );
    }

    #[test]
    fn zero_active_loops_wire_input_to_output() {
        let mut p = Preset::new(0, 0);
        p.add_loop(Loop::new(false, 0, 12, 3));

        let mut m = RecordingMatrix::default();
        router().connect(&p, &mut m).unwrap();

        assert_eq!(
            &m.ops[..],
            &[MatrixOp::ClearAll, MatrixOp::Set(0, 0, true)]
        );
    }

    #[test]
    fn single_active_loop_issues_two_connections() {
        let mut p = Preset::new(0, 0);
        p.add_loop(Loop::new(true, 0, 5, 2));

        let mut m = RecordingMatrix::default();
        router().connect(&p, &mut m).unwrap();

        assert_eq!(
            &m.ops[..],
            &[
                MatrixOp::ClearAll,
                MatrixOp::Set(0, 5, true),
                MatrixOp::Set(2, 0, true),
            ]
        );
    }

    #[test]
    fn chain_follows_order_not_slot_numbering() {
        // Slot 0 is second in the chain, slot 1 is first.
        let mut p = Preset::new(0, 0);
        p.add_loop(Loop::new(true, 1, 12, 3));
        p.add_loop(Loop::new(true, 0, 11, 4));

        let mut m = RecordingMatrix::default();
        router().connect(&p, &mut m).unwrap();

        assert_eq!(
            &m.ops[..],
            &[
                MatrixOp::ClearAll,
                MatrixOp::Set(0, 11, true),
                MatrixOp::Set(4, 12, true),
                MatrixOp::Set(3, 0, true),
            ]
        );
    }

    #[test]
    fn bypassed_loops_are_skipped() {
        let mut p = Preset::new(0, 0);
        p.add_loop(Loop::new(true, 0, 1, 1));
        p.add_loop(Loop::new(false, 1, 2, 2));
        p.add_loop(Loop::new(true, 2, 3, 3));

        let mut m = RecordingMatrix::default();
        router().connect(&p, &mut m).unwrap();

        assert_eq!(
            &m.ops[..],
            &[
                MatrixOp::ClearAll,
                MatrixOp::Set(0, 1, true),
                MatrixOp::Set(1, 3, true),
                MatrixOp::Set(3, 0, true),
            ]
        );
    }

    #[test]
    fn gapped_order_values_still_chain_in_relative_order() {
        // Orders 2 and 5 — no loop with order 0. The chain must still be
        // order-2 first, order-5 second.
        let mut p = Preset::new(0, 0);
        p.add_loop(Loop::new(true, 5, 12, 3));
        p.add_loop(Loop::new(true, 2, 11, 4));

        let mut m = RecordingMatrix::default();
        router().connect(&p, &mut m).unwrap();

        assert_eq!(
            &m.ops[..],
            &[
                MatrixOp::ClearAll,
                MatrixOp::Set(0, 11, true),
                MatrixOp::Set(4, 12, true),
                MatrixOp::Set(3, 0, true),
            ]
        );
    }

    #[test]
    fn connect_emits_n_plus_one_connections() {
        let mut p = Preset::new(0, 0);
        for i in 0..5 {
            p.add_loop(Loop::new(true, i, i + 1, i + 1));
        }

        let mut m = RecordingMatrix::default();
        router().connect(&p, &mut m).unwrap();

        let sets = m
            .ops
            .iter()
            .filter(|op| matches!(op, MatrixOp::Set(..)))
            .count();
        assert_eq!(sets, 6);
    }

    #[test]
    fn mute_only_clears() {
        let mut m = RecordingMatrix::default();
        router().mute(&mut m).unwrap();
        assert_eq!(&m.ops[..], &[MatrixOp::ClearAll]);
    }

    #[test]
    fn assign_loop_io_binds_table_to_slots() {
        let mut p = Preset::new(0, 0);
        p.set_loops_count(7);
        assign_loop_io(&mut p, &DEFAULT_LOOP_IO);

        assert_eq!(p.loop_at(0).unwrap().send, 1);
        assert_eq!(p.loop_at(6).unwrap().ret, 7);
    }

    #[test]
    fn assign_loop_io_ignores_slots_beyond_preset() {
        let mut p = Preset::new(0, 0);
        p.set_loops_count(2);
        // Table longer than the preset's loop list — no panic, extra
        // entries ignored.
        assign_loop_io(&mut p, &DEFAULT_LOOP_IO);
        assert_eq!(p.loop_at(1).unwrap().send, 2);
    }
}

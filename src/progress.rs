//! The step-by-step reporting protocol between a running search and whoever presents it.
//!
//! A search calls [ProgressSink::on_step] once per newly visited or newly confirmed path cell
//! and does not continue until the call returns, so the sink fully controls pacing. Returning
//! [ControlFlow::Break] stops the search between two steps; it then discards its private grid
//! copy and reports [Error::Cancelled](crate::Error::Cancelled).
use std::ops::ControlFlow;
use std::sync::mpsc::SyncSender;

use grid_util::point::Point;

use crate::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// The cell was discovered or finalized.
    Visited,
    /// The cell lies on the reported route.
    Path,
}

/// An owned snapshot of one reported step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub point: Point,
    pub kind: StepKind,
    pub g_cost: u32,
}

impl Step {
    pub fn new(cell: &Cell, kind: StepKind) -> Step {
        Step {
            point: cell.pos(),
            kind,
            g_cost: cell.g_cost,
        }
    }
}

pub trait ProgressSink {
    fn on_step(&mut self, cell: &Cell, kind: StepKind) -> ControlFlow<()>;
}

impl<F> ProgressSink for F
where
    F: FnMut(&Cell, StepKind) -> ControlFlow<()>,
{
    fn on_step(&mut self, cell: &Cell, kind: StepKind) -> ControlFlow<()> {
        self(cell, kind)
    }
}

/// Ignores every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_step(&mut self, _: &Cell, _: StepKind) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Collects every step in the order it was reported.
#[derive(Clone, Debug, Default)]
pub struct StepRecorder {
    pub steps: Vec<Step>,
}

impl StepRecorder {
    pub fn new() -> StepRecorder {
        StepRecorder::default()
    }
    /// Points reported with the given kind, in order.
    pub fn points(&self, kind: StepKind) -> Vec<Point> {
        self.steps
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.point)
            .collect()
    }
}

impl ProgressSink for StepRecorder {
    fn on_step(&mut self, cell: &Cell, kind: StepKind) -> ControlFlow<()> {
        self.steps.push(Step::new(cell, kind));
        ControlFlow::Continue(())
    }
}

/// Forwards steps over a bounded channel. With a zero-capacity channel every send blocks until
/// the receiving side takes the step, which lets a presentation thread pace a search running on
/// a worker thread. Hanging up the receiver cancels the search.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    sender: SyncSender<Step>,
}

impl ChannelSink {
    pub fn new(sender: SyncSender<Step>) -> ChannelSink {
        ChannelSink { sender }
    }
}

impl ProgressSink for ChannelSink {
    fn on_step(&mut self, cell: &Cell, kind: StepKind) -> ControlFlow<()> {
        match self.sender.send(Step::new(cell, kind)) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => ControlFlow::Break(()),
        }
    }
}

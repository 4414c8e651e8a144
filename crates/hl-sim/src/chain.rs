//! Loop topology: the four node chains that make up the water ring.
//!
//! Walking the chains head to tail in the order collector, upper pipe, tank,
//! lower pipe and back to the collector visits every node of the loop exactly
//! once. Nodes are never created or destroyed after construction; pumping only
//! relabels which chain a node belongs to.

use std::collections::VecDeque;

use crate::params::LoopConstants;

/// Temperatures (°C) of every node in the loop.
///
/// | chain      | head                  | tail                  |
/// |------------|-----------------------|-----------------------|
/// | collector  | cold inlet            | warm outlet           |
/// | upper pipe | collector-outlet side | tank-inlet side       |
/// | tank       | top layer             | bottom layer          |
/// | lower pipe | tank-outlet side      | collector-inlet side  |
#[derive(Clone, Debug, PartialEq)]
pub struct LoopChains {
    pub(crate) collector: VecDeque<f64>,
    pub(crate) upper_pipe: VecDeque<f64>,
    pub(crate) tank: VecDeque<f64>,
    pub(crate) lower_pipe: VecDeque<f64>,
}

impl LoopChains {
    /// Every node at `temperature_c`, chain lengths taken from `constants`.
    pub fn uniform(constants: &LoopConstants, temperature_c: f64) -> Self {
        Self {
            collector: VecDeque::from(vec![temperature_c; constants.collector_nodes]),
            upper_pipe: VecDeque::from(vec![temperature_c; constants.pipe_nodes]),
            tank: VecDeque::from(vec![temperature_c; constants.tank_nodes]),
            lower_pipe: VecDeque::from(vec![temperature_c; constants.pipe_nodes]),
        }
    }

    /// Build from explicit chain contents.
    ///
    /// Returns `None` if any chain is empty.
    pub fn from_parts(
        collector: Vec<f64>,
        upper_pipe: Vec<f64>,
        tank: Vec<f64>,
        lower_pipe: Vec<f64>,
    ) -> Option<Self> {
        if collector.is_empty() || upper_pipe.is_empty() || tank.is_empty() || lower_pipe.is_empty()
        {
            return None;
        }
        Some(Self {
            collector: collector.into(),
            upper_pipe: upper_pipe.into(),
            tank: tank.into(),
            lower_pipe: lower_pipe.into(),
        })
    }

    pub fn collector(&self) -> &VecDeque<f64> {
        &self.collector
    }

    pub fn upper_pipe(&self) -> &VecDeque<f64> {
        &self.upper_pipe
    }

    /// Tank layers, top first.
    pub fn tank(&self) -> &VecDeque<f64> {
        &self.tank
    }

    pub fn lower_pipe(&self) -> &VecDeque<f64> {
        &self.lower_pipe
    }

    /// Collector nodes as one mutable slice, inlet first.
    pub(crate) fn collector_mut(&mut self) -> &mut [f64] {
        self.collector.make_contiguous()
    }

    /// Tank layers as one mutable slice, top first.
    pub(crate) fn tank_mut(&mut self) -> &mut [f64] {
        self.tank.make_contiguous()
    }

    /// `[collector, upper pipe, tank, lower pipe]` lengths.
    pub fn lengths(&self) -> [usize; 4] {
        [
            self.collector.len(),
            self.upper_pipe.len(),
            self.tank.len(),
            self.lower_pipe.len(),
        ]
    }

    pub fn total_nodes(&self) -> usize {
        self.lengths().iter().sum()
    }

    /// All node temperatures in ring order, starting at the collector inlet.
    pub fn ring(&self) -> impl Iterator<Item = &f64> {
        self.collector
            .iter()
            .chain(self.upper_pipe.iter())
            .chain(self.tank.iter())
            .chain(self.lower_pipe.iter())
    }

    /// Collector outlet temperature (the collector tail).
    pub fn collector_outlet(&self) -> Option<f64> {
        self.collector.back().copied()
    }
}

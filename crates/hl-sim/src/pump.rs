//! Pump transport: advance every node one position around the ring.

use tracing::trace;

use crate::chain::LoopChains;

/// Move the water in the loop forward by exactly one node.
///
/// Each chain hands its tail node to the head of the next chain downstream:
/// lower pipe → collector → upper pipe → tank → lower pipe. Every chain keeps
/// its length and node values are carried unchanged.
///
/// Returns `false` without touching any chain if one of them is empty.
pub fn advance_one_node(chains: &mut LoopChains) -> bool {
    if chains.lengths().contains(&0) {
        return false;
    }

    // Pop all four tails before pushing so no node moves twice.
    let tails = (
        chains.lower_pipe.pop_back(),
        chains.collector.pop_back(),
        chains.upper_pipe.pop_back(),
        chains.tank.pop_back(),
    );

    if let (Some(from_lower), Some(from_collector), Some(from_upper), Some(from_tank)) = tails {
        chains.collector.push_front(from_lower);
        chains.upper_pipe.push_front(from_collector);
        chains.tank.push_front(from_upper);
        chains.lower_pipe.push_front(from_tank);
        trace!(
            collector_in = from_lower,
            tank_in = from_upper,
            tank_out = from_tank,
            "advanced loop by one node"
        );
        true
    } else {
        false
    }
}

//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::graph::{ConnectionPoint, Graph, PortDirection, PortId};

impl Graph {
    pub(crate) fn ensure_input(&self, port: PortId) -> &ConnectionPoint {
        let point = self.port(port);
        if point.direction() != PortDirection::Input {
            panic!(
                "Graph: port `{}` of block {} is an output where an input was expected",
                point.name(),
                point.owner()
            );
        }
        point
    }

    pub(crate) fn ensure_output(&self, port: PortId) -> &ConnectionPoint {
        let point = self.port(port);
        if point.direction() != PortDirection::Output {
            panic!(
                "Graph: port `{}` of block {} is an input where an output was expected",
                point.name(),
                point.owner()
            );
        }
        point
    }

    pub(crate) fn ensure_upstream(&self, input: PortId) -> PortId {
        self.port(input).connected_point().unwrap_or_else(|| {
            panic!(
                "Graph: input `{}` has no upstream (callers must check `is_connected`)",
                self.port(input).name()
            )
        })
    }
}

//! A conventional six-step width grid, for hosts that have no theme-declared
//! breakpoints but still want named widths.

use crate::breakpoint::{BreakpointDefinition, BreakpointSet};

/// Ids of the grid steps, narrowest first.
pub const GRID_IDS: [&str; 6] = ["xs", "sm", "md", "lg", "xl", "xxl"];

/// Minimum widths in pixels of `sm` through `xxl`. `xs` starts at zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridBreakpoints {
    pub min_widths: [f64; 5],
}

impl Default for GridBreakpoints {
    fn default() -> Self {
        Self {
            min_widths: [576.0, 768.0, 992.0, 1200.0, 1400.0],
        }
    }
}

impl GridBreakpoints {
    pub fn new(min_widths: [f64; 5]) -> Self {
        Self { min_widths }
    }

    /// One `min-width` breakpoint per step, narrowest first, so the last match
    /// is the step the width falls in.
    pub fn to_breakpoint_set(&self) -> BreakpointSet {
        let starts = std::iter::once(0.0).chain(self.min_widths);
        let mut set = BreakpointSet::new();
        for (weight, (id, start)) in GRID_IDS.into_iter().zip(starts).enumerate() {
            set.insert(
                BreakpointDefinition::new(id, format!("(min-width: {start}px)"))
                    .weight(weight as i32),
            );
        }
        set
    }
}

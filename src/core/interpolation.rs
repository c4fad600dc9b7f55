//! Interpolation types of path conditions over the shooting grid.

use std::fmt;

/// How values of a path condition are spread over the shooting nodes
/// `0..=n_shooting`.
///
/// The required number of columns of the value matrix depends on the type,
/// see [`expected_columns`](InterpolationType::expected_columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolationType {
    /// The same value at every node. One column.
    Constant,
    /// One value at the first node, one at the last node and another one in
    /// between. Three columns.
    ConstantWithFirstAndLastDifferent,
    /// Linear interpolation between the first and the last node. Two columns.
    Linear,
    /// An explicit value for every node. `n_shooting + 1` columns.
    EachFrame,
    /// Interpolation through values given at arbitrary knot times. The nodes
    /// are mapped uniformly onto the knot time range.
    Spline,
    /// Values produced by a user function of the node.
    Custom,
}

impl InterpolationType {
    /// Returns the number of columns required for given number of shooting
    /// intervals, or `None` if the number of columns is free (spline) or
    /// meaningless (custom).
    pub fn expected_columns(&self, n_shooting: usize) -> Option<usize> {
        match self {
            InterpolationType::Constant => Some(1),
            InterpolationType::ConstantWithFirstAndLastDifferent => Some(3),
            InterpolationType::Linear => Some(2),
            InterpolationType::EachFrame => Some(n_shooting + 1),
            InterpolationType::Spline | InterpolationType::Custom => None,
        }
    }
}

impl fmt::Display for InterpolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterpolationType::Constant => "CONSTANT",
            InterpolationType::ConstantWithFirstAndLastDifferent => {
                "CONSTANT_WITH_FIRST_AND_LAST_DIFFERENT"
            }
            InterpolationType::Linear => "LINEAR",
            InterpolationType::EachFrame => "EACH_FRAME",
            InterpolationType::Spline => "SPLINE",
            InterpolationType::Custom => "CUSTOM",
        };

        write!(f, "InterpolationType.{}", name)
    }
}

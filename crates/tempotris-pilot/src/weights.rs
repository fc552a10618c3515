use serde::{Deserialize, Serialize};

/// Feature weights for placement scoring.
///
/// Two fixed profiles exist, selected by whether line clearing is enabled
/// on the board. With clearing on, stack height is transient and penalized
/// hard. With clearing off the stack overflows and resets anyway, so
/// height matters less while full rows, a purely visual signal in that
/// mode, are rewarded more.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct HeuristicWeights {
    pub aggregate_height: f32,
    pub complete_lines: f32,
    pub holes: f32,
    pub bumpiness: f32,
}

impl HeuristicWeights {
    /// Profile used when line clearing is enabled.
    pub const CLEARING: Self = Self {
        aggregate_height: -0.51,
        complete_lines: 0.76,
        holes: -0.60,
        bumpiness: -0.30,
    };

    /// Profile used in pure stacking mode.
    pub const STACKING: Self = Self {
        aggregate_height: -0.20,
        complete_lines: 1.50,
        holes: -0.60,
        bumpiness: -0.30,
    };

    #[must_use]
    pub const fn for_mode(line_clear_enabled: bool) -> Self {
        if line_clear_enabled {
            Self::CLEARING
        } else {
            Self::STACKING
        }
    }
}

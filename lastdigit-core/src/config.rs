use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{classify::DEFAULT_PROXIMITY, layout::Layout, path::LoopPolicy, r2::R2};

/// Board geometry and grading knobs; every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Side of the square canvas
    pub size: f64,
    pub center: R2<f64>,
    pub radius: f64,
    /// Touch radius for raster input
    pub proximity: f64,
    pub policy: LoopPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: 500.,
            center: R2::new(250., 250.),
            radius: 200.,
            proximity: DEFAULT_PROXIMITY,
            policy: LoopPolicy::default(),
        }
    }
}

impl BoardConfig {
    pub fn layout(&self) -> Layout {
        Layout::new(self.center, self.radius)
    }
}

use std::env;

/// Tile pitch of the canvas grid the four keyframe nodes land on.
const DEFAULT_GRID_DX: f64 = 320.0;
const DEFAULT_GRID_DY: f64 = 240.0;

#[derive(Debug, Clone)]
pub struct StoryboardConfig {
    pub grid_dx: f64,
    pub grid_dy: f64,
    pub loopable: bool,
}

impl Default for StoryboardConfig {
    fn default() -> Self {
        StoryboardConfig {
            grid_dx: DEFAULT_GRID_DX,
            grid_dy: DEFAULT_GRID_DY,
            loopable: false,
        }
    }
}

impl StoryboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let grid_dx = env::var("STORYGEN_GRID_DX")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_GRID_DX);
        let grid_dy = env::var("STORYGEN_GRID_DY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_GRID_DY);
        let loopable = env::var("STORYGEN_LOOPABLE")
            .ok()
            .map_or(false, |val| val == "true");

        StoryboardConfig {
            grid_dx,
            grid_dy,
            loopable,
        }
    }

    pub fn with_grid_spacing(mut self, dx: f64, dy: f64) -> Self {
        self.grid_dx = dx;
        self.grid_dy = dy;
        self
    }

    pub fn with_loopable(mut self, loopable: bool) -> Self {
        self.loopable = loopable;
        self
    }
}

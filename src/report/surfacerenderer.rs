use tracing::info;

use crate::report::surfacegrid::SurfaceGrid;
use crate::volumeerror::VolumeResult;

pub const CONTOUR_LEVELS: usize = 20;

/// Consumer of the sampled surface, e.g. a 3D surface and contour plotter.
pub trait SurfaceRenderer {
    fn render(&self, grid: &SurfaceGrid) -> VolumeResult<()>;
}

/// Describes the grid through `tracing` instead of drawing it.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingRenderer;

impl LoggingRenderer {
    pub fn new() -> LoggingRenderer {
        LoggingRenderer
    }
}

impl SurfaceRenderer for LoggingRenderer {
    fn render(&self, grid: &SurfaceGrid) -> VolumeResult<()> {
        let (rows, cols) = grid.shape();
        let levels = grid.contour_levels(CONTOUR_LEVELS);
        info!(
            rows,
            cols,
            z_min = grid.z_min(),
            z_max = grid.z_max(),
            contour_levels = levels.len(),
            "surface grid ready for plotting"
        );
        Ok(())
    }
}

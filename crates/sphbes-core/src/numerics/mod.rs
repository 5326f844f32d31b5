pub mod special;

pub use special::{
    cos_integ0, cos_integ1, cos_integ2, cos_integ3, sin_integ0, sin_integ1, sin_integ2,
    sin_integ3, spherical_j, spherical_j0, spherical_j1, spherical_j2, spherical_j_general,
    MomentFn, NativeSphericalBessel, SphericalBesselKernel, TrigKernel,
};

pub fn linear_grid(start: f64, end: f64, count: usize) -> Option<Vec<f64>> {
    if count < 2 {
        return None;
    }

    let step = (end - start) / ((count - 1) as f64);
    let mut grid = Vec::with_capacity(count);
    for index in 0..count {
        grid.push(start + step * (index as f64));
    }

    if let Some(last) = grid.last_mut() {
        *last = end;
    }

    Some(grid)
}

/// Geometric grid from `start` to `end` inclusive; both bounds must be > 0.
pub fn log_grid(start: f64, end: f64, count: usize) -> Option<Vec<f64>> {
    if count < 2 || !(start > 0.0) || !(end > 0.0) {
        return None;
    }

    let log_start = start.ln();
    let log_step = (end.ln() - log_start) / ((count - 1) as f64);
    let mut grid: Vec<f64> = (0..count)
        .map(|index| (log_start + log_step * (index as f64)).exp())
        .collect();

    grid[0] = start;
    if let Some(last) = grid.last_mut() {
        *last = end;
    }

    Some(grid)
}

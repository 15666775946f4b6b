//! Boustrophedon waypoint generation for a vertical slice of the grid.
use tileworld_core::{Coordinate, GridDimensions};

/// Generates the serpentine patrol route for columns `[lo, hi]`.
///
/// The slice is walked in strides of `2 * radius + 1` columns. Each stride
/// contributes one column whose sensor band `[x - radius, x + radius]` covers
/// the stride; the final stride is pulled back to `hi - radius` so it never
/// overruns the slice. Per stride two waypoints are emitted, one on the row
/// nearest the low edge that still keeps the sensor inside the grid and one
/// on the row nearest the high edge. Row order flips every stride, so each
/// stride starts on the row where the previous one ended.
///
/// Returns an empty route when `lo > hi`.
pub fn sweep_waypoints(lo: i32, hi: i32, radius: u32, dims: GridDimensions) -> Vec<Coordinate> {
    if lo > hi || dims.height == 0 {
        return Vec::new();
    }

    let radius = radius as i32;
    let length = hi - lo + 1;
    let stride = 2 * radius + 1;
    let last_row = dims.height as i32 - 1;
    let near_row = radius.min(last_row);
    let far_row = (last_row - radius).max(0);

    let mut waypoints = Vec::with_capacity(2 * (length / stride + 1) as usize);
    let mut previous_column = None;
    let mut emitted = 0usize;

    for i in 0..=(length / stride) {
        let column = if (i + 1) * stride > length {
            hi - radius
        } else {
            lo + i * stride + radius
        }
        .clamp(lo, hi);

        // An exact multiple of the stride reproduces the previous column.
        if previous_column == Some(column) {
            continue;
        }
        previous_column = Some(column);

        let (first, second) = if emitted % 2 == 0 {
            (near_row, far_row)
        } else {
            (far_row, near_row)
        };
        waypoints.push(Coordinate::new(column, first));
        if second != first {
            waypoints.push(Coordinate::new(column, second));
        }
        emitted += 1;
    }

    waypoints
}

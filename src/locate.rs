//! Nearest-neighbor lookup into a 2-D latitude/longitude grid.

use ndarray::Array2;

/// Find the (row, column) index of the grid cell nearest to a query point.
///
/// The grid longitudes are assumed to follow the 0..360 convention of gridded
/// weather archives; the query longitude may use either the signed -180..180
/// or the unsigned 0..360 convention. Distances are squared degree-space
/// distances with no great-circle correction. A query point outside the grid
/// returns the nearest edge cell.
pub fn nearest_grid_point(
    lat: f64,
    lon: f64,
    grid_lats: &Array2<f64>,
    grid_lons: &Array2<f64>,
) -> (usize, usize) {
    debug_assert_eq!(grid_lats.dim(), grid_lons.dim());

    let lon = if lon < 0.0 { lon + 360.0 } else { lon };

    let mut nearest = (0, 0);
    let mut nearest_dist = ::std::f64::INFINITY;

    for ((row, col), grid_lat) in grid_lats.indexed_iter() {
        let grid_lon = grid_lons[(row, col)];

        let lat_diff = (grid_lat - lat).abs();
        // The difference must account for wraparound at the 0/360 seam.
        let lon_diff = (grid_lon - lon)
            .abs()
            .min(((grid_lon - lon + 360.0) % 360.0).abs());

        let dist = lat_diff * lat_diff + lon_diff * lon_diff;

        // Strictly less than, so ties go to the first cell in row-major order.
        if dist < nearest_dist {
            nearest_dist = dist;
            nearest = (row, col);
        }
    }

    nearest
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/

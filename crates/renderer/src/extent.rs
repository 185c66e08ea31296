use winit::dpi::{LogicalSize, PhysicalSize};

/// Smallest logical edge the backing surface may shrink to.
///
/// A collapsed or zero-sized window would otherwise produce a degenerate
/// drawing area, which some drivers reject outright.
pub const MIN_LOGICAL_EDGE: f64 = 300.0;

/// Computes the backing pixel extent for a surface of the given logical size.
///
/// Each axis is floored at [`MIN_LOGICAL_EDGE`] logical pixels independently,
/// then scaled by the device pixel ratio. Non-finite or non-positive scale
/// factors fall back to 1.0.
pub fn backing_extent(logical: LogicalSize<f64>, scale_factor: f64) -> PhysicalSize<u32> {
    let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    };
    let width = logical.width.max(MIN_LOGICAL_EDGE) * scale;
    let height = logical.height.max(MIN_LOGICAL_EDGE) * scale;
    PhysicalSize::new(width.round() as u32, height.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_logical_size_by_pixel_ratio() {
        let extent = backing_extent(LogicalSize::new(800.0, 600.0), 2.0);
        assert_eq!(extent, PhysicalSize::new(1600, 1200));
    }

    #[test]
    fn floors_each_axis_independently() {
        let extent = backing_extent(LogicalSize::new(120.0, 900.0), 1.5);
        assert_eq!(extent, PhysicalSize::new(450, 1350));
    }

    #[test]
    fn collapsed_surface_never_degenerates() {
        let extent = backing_extent(LogicalSize::new(0.0, 0.0), 1.0);
        assert_eq!(extent, PhysicalSize::new(300, 300));
    }

    #[test]
    fn bogus_scale_factor_falls_back_to_one() {
        assert_eq!(
            backing_extent(LogicalSize::new(400.0, 400.0), 0.0),
            PhysicalSize::new(400, 400)
        );
        assert_eq!(
            backing_extent(LogicalSize::new(400.0, 400.0), f64::NAN),
            PhysicalSize::new(400, 400)
        );
    }
}

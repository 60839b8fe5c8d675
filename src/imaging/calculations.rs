//! Pure calculation functions for fill geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while maintaining
/// the source aspect ratio. One dimension will match exactly, the other may exceed.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target` - Target area dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Fill dimensions (at least one matches target)
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.max(tgt_w), h)
    } else {
        // Source is taller: width will match, height will exceed
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.max(tgt_h))
    }
}

/// Scale factor applied to the source when filling the target.
///
/// Values above `1.0` mean the source is enlarged for this target.
pub fn fill_scale(source: (u32, u32), target: (u32, u32)) -> f64 {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;
    if src_w == 0 || src_h == 0 {
        return f64::INFINITY;
    }
    (tgt_w as f64 / src_w as f64).max(tgt_h as f64 / src_h as f64)
}

/// Top-left corner of a centered `target` crop inside `filled`.
pub fn center_crop_origin(filled: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    (
        filled.0.saturating_sub(target.0) / 2,
        filled.1.saturating_sub(target.1) / 2,
    )
}

/// Window of `source` that a `target` fill keeps, as `(x, y, width, height)`.
///
/// This is the centered crop mapped back into source pixels. Cropping it
/// and resizing to exactly `target` frames the same content as scaling the
/// whole source first, while the intermediate image never exceeds the source.
pub fn source_crop_window(source: (u32, u32), target: (u32, u32)) -> (u32, u32, u32, u32) {
    let scale = fill_scale(source, target);
    let w = ((target.0 as f64 / scale).round() as u32).max(1).min(source.0);
    let h = ((target.1 as f64 / scale).round() as u32).max(1).min(source.1);
    let (x, y) = center_crop_origin(source, (w, h));
    (x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_wider_source_matches_height() {
        // 4K 16:9 into a 4:3 box → height matches, width overflows
        assert_eq!(
            calculate_fill_dimensions((3840, 2160), (1024, 768)),
            (1365, 768)
        );
    }

    #[test]
    fn fill_taller_source_matches_width() {
        // 16:9 landscape into a phone portrait → width overflows a lot
        assert_eq!(
            calculate_fill_dimensions((3840, 2160), (1080, 2400)),
            (4267, 2400)
        );
        // Portrait source into a landscape box → width matches
        assert_eq!(
            calculate_fill_dimensions((2000, 3000), (1920, 1080)),
            (1920, 2880)
        );
    }

    #[test]
    fn fill_same_aspect_is_exact() {
        assert_eq!(
            calculate_fill_dimensions((3840, 2160), (1920, 1080)),
            (1920, 1080)
        );
    }

    #[test]
    fn fill_never_undershoots_target() {
        for target in [(1366, 768), (1080, 2400), (1440, 3200), (7, 3)] {
            let (w, h) = calculate_fill_dimensions((3000, 2001), target);
            assert!(w >= target.0 && h >= target.1, "{target:?} → {w}x{h}");
        }
    }

    #[test]
    fn scale_below_one_for_downscale() {
        assert_eq!(fill_scale((3840, 2160), (1920, 1080)), 0.5);
    }

    #[test]
    fn scale_uses_larger_axis_ratio() {
        // Portrait target from landscape source: height drives the scale
        let s = fill_scale((3840, 2160), (1080, 2400));
        assert!((s - 2400.0 / 2160.0).abs() < 1e-9);
        assert!(s > 1.0);
    }

    #[test]
    fn scale_of_empty_source_is_infinite() {
        assert!(fill_scale((0, 100), (10, 10)).is_infinite());
    }

    #[test]
    fn crop_origin_centers() {
        assert_eq!(center_crop_origin((1365, 768), (1024, 768)), (170, 0));
        assert_eq!(center_crop_origin((1920, 2880), (1920, 1080)), (0, 900));
        assert_eq!(center_crop_origin((100, 100), (100, 100)), (0, 0));
    }

    #[test]
    fn crop_window_matches_target_aspect() {
        // 16:9 source into a 4:3 box: full height, centered 4:3 slice
        assert_eq!(
            source_crop_window((3840, 2160), (1024, 768)),
            (480, 0, 2880, 2160)
        );
        // Landscape source into a phone portrait
        assert_eq!(
            source_crop_window((3840, 2160), (1080, 2400)),
            (1434, 0, 972, 2160)
        );
    }

    #[test]
    fn crop_window_same_aspect_is_whole_source() {
        assert_eq!(
            source_crop_window((3840, 2160), (1920, 1080)),
            (0, 0, 3840, 2160)
        );
    }

    #[test]
    fn crop_window_for_upscale_stays_inside_source() {
        assert_eq!(source_crop_window((32, 24), (128, 72)), (0, 3, 32, 18));
    }

    #[test]
    fn crop_window_of_extreme_strip_is_small() {
        // 100x20000 into 1920x1080: a full-size fill would be 1920x384000
        let (x, y, w, h) = source_crop_window((100, 20000), (1920, 1080));
        assert_eq!((w, h), (100, 56));
        assert_eq!(x, 0);
        assert_eq!(y, (20000 - 56) / 2);
    }
}

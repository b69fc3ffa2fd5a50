//! Weighted fusion of the thermal and current duty estimates.

/// Blend `thermal` and `current` with thermal weight `w`, rescale by `1/w`,
/// and saturate to `[0, 1]`.
///
/// This is the only clamping point in the duty pipeline.  A NaN blend
/// saturates to 0 (fan off).
pub fn fuse(thermal: f32, current: f32, w: f32) -> f32 {
    let merged = (thermal * w + current * (1.0 - w)) / w;
    if merged.is_nan() {
        return 0.0;
    }
    merged.clamp(0.0, 1.0)
}

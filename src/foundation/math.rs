/// Clamp an intermediate channel value into `[0, 255]`.
pub(crate) fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Clamp and truncate a real-valued channel into `[0, 255]`. `NaN` maps to `0`.
pub(crate) fn trunc_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

/// Quadratic ease-in-out ("power2.inOut"); `t` is clamped to `[0, 1]`.
pub fn ease_power2_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

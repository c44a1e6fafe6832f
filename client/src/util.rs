fn random_u32() -> u32 {
    (js_sys::Math::random() * (u32::MAX as f64 + 1.0)) as u32
}

/// Seed for element ids, so two page loads editing the same saved diagram
/// do not hand out the same ids.
pub fn id_seed() -> u64 {
    (u64::from(random_u32()) << 32) | u64::from(random_u32())
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

use lazy_static::lazy_static;
use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) const _INFINITY_DEFAULT: f64 = 1e20;

// f64 atomic stored through its bit pattern; only load/store are needed
struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }
    fn store(&self, value: f64, ordering: Ordering) {
        self.bits.store(value.to_bits(), ordering);
    }
    fn load(&self, ordering: Ordering) -> f64 {
        f64::from_bits(self.bits.load(ordering))
    }
}

lazy_static! {
    static ref INFINITY: AtomicF64 = AtomicF64::new(_INFINITY_DEFAULT);
}

/// Revert the internal infinity bound to its default value.
///
/// The infinity bound is the finite magnitude standing in for ±∞ in
/// generated solver data, e.g. in the sentinel part of one-sided bound
/// vectors.
pub fn default_infinity() {
    INFINITY.store(_INFINITY_DEFAULT, Ordering::Relaxed);
}
/// Set the internal infinity bound to a new value.
pub fn set_infinity(v: f64) {
    INFINITY.store(v, Ordering::Relaxed);
}
/// Get the internal infinity bound.
pub fn get_infinity() -> f64 {
    INFINITY.load(Ordering::Relaxed)
}

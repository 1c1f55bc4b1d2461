#![forbid(unsafe_code)]

//! Equality policies deciding when a sample counts as changed.
//!
//! A [`Comparator`] answers "is the candidate value unchanged from the stored
//! one?" — `true` suppresses notification. Discrete signals (booleans, enums)
//! want [`exact`]; float signals derived from continuously moving inputs want
//! an epsilon tolerance, otherwise every step's floating-point jitter counts
//! as a change and fans out to all subscribers.

/// Boxed equality policy: `unchanged(previous, candidate)`.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> bool>;

/// Exact `PartialEq` equality. The default policy.
#[must_use]
pub fn exact<T: PartialEq>() -> Comparator<T> {
    Box::new(|previous, candidate| previous == candidate)
}

/// Absolute-difference tolerance for `f32` signals.
///
/// Values within `epsilon` of the stored one count as unchanged. NaN never
/// compares as unchanged, so a signal that goes NaN notifies.
#[must_use]
pub fn epsilon_f32(epsilon: f32) -> Comparator<f32> {
    Box::new(move |previous, candidate| (previous - candidate).abs() <= epsilon)
}

/// Absolute-difference tolerance for `f64` signals.
#[must_use]
pub fn epsilon_f64(epsilon: f64) -> Comparator<f64> {
    Box::new(move |previous, candidate| (previous - candidate).abs() <= epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_discrete() {
        let cmp = exact::<bool>();
        assert!(cmp(&true, &true));
        assert!(!cmp(&true, &false));
    }

    #[test]
    fn exact_float_is_strict() {
        let cmp = exact::<f32>();
        assert!(cmp(&1.0, &1.0));
        assert!(!cmp(&1.0, &1.0000001));
    }

    #[test]
    fn epsilon_within_tolerance() {
        let cmp = epsilon_f32(0.01);
        assert!(cmp(&1.0, &1.005));
        assert!(cmp(&1.0, &0.995));
        assert!(!cmp(&1.0, &1.02));
    }

    #[test]
    fn epsilon_boundary_is_inclusive() {
        let cmp = epsilon_f64(0.5);
        assert!(cmp(&2.0, &2.5));
        assert!(!cmp(&2.0, &2.5000001));
    }

    #[test]
    fn nan_counts_as_changed() {
        let cmp = epsilon_f32(0.01);
        assert!(!cmp(&1.0, &f32::NAN));
        assert!(!cmp(&f32::NAN, &f32::NAN));
    }

    #[test]
    fn zero_epsilon_requires_exact_match() {
        let cmp = epsilon_f32(0.0);
        assert!(cmp(&1.0, &1.0));
        assert!(!cmp(&1.0, &1.0000001));
    }
}

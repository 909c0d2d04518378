use num_traits::{Float, FromPrimitive};

/// Returns `n` evenly spaced values from `y_start` to `y_end`, both
/// included exactly.
pub fn linspace<T>(y_start: T, y_end: T, n: usize) -> impl Iterator<Item = T>
where
    T: Float + FromPrimitive,
{
    let last = n.saturating_sub(1);
    let dy = (y_end - y_start) / T::from_usize(last.max(1)).unwrap_or_else(T::one);
    (0..n).map(move |x| {
        if x == last && x != 0 {
            y_end
        } else {
            y_start + T::from_usize(x).unwrap_or_else(T::zero) * dy
        }
    })
}

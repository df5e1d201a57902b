//! Distance kernels for flat vector scans.

pub fn magnitude(v: &[f32]) -> f32 {
    let mut sum = 0.0;
    let n = v.len();
    let mut i = 0;

    // Unrolling 4
    while i + 3 < n {
        sum += v[i] * v[i] + v[i+1] * v[i+1] + v[i+2] * v[i+2] + v[i+3] * v[i+3];
        i += 4;
    }

    while i < n {
        sum += v[i] * v[i];
        i += 1;
    }

    sum.sqrt()
}

/// Squared L2 distance. Callers guarantee equal lengths.
pub fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "distance over vectors of different dimension");

    let mut sum = 0.0;
    let n = a.len().min(b.len());
    let mut i = 0;

    // Unrolling 4
    while i + 3 < n {
        let d0 = a[i] - b[i];
        let d1 = a[i+1] - b[i+1];
        let d2 = a[i+2] - b[i+2];
        let d3 = a[i+3] - b[i+3];
        sum += d0*d0 + d1*d1 + d2*d2 + d3*d3;
        i += 4;
    }

    // Remainder
    while i < n {
        let d = a[i] - b[i];
        sum += d*d;
        i += 1;
    }

    sum
}

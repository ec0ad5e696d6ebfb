//! Vector kernels used in the competition and adaptation inner loops.
//!
//! Weights are stored as one flat `f64` buffer (`num_neurons * dimension`),
//! and the loops below are unrolled so the compiler can autovectorize them.

/// Compute squared Euclidean distance between two slices.
#[inline]
pub fn distance_squared(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let chunks = a.len() / 4;
    let remainder = a.len() % 4;

    let mut sum = 0.0;

    for i in 0..chunks {
        let base = i * 4;
        let d0 = a[base] - b[base];
        let d1 = a[base + 1] - b[base + 1];
        let d2 = a[base + 2] - b[base + 2];
        let d3 = a[base + 3] - b[base + 3];

        sum += d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3;
    }

    let base = chunks * 4;
    for i in 0..remainder {
        let d = a[base + i] - b[base + i];
        sum += d * d;
    }

    sum
}

/// Find the index of the neuron whose weights are closest to `input`.
///
/// Ties go to the lowest index.
#[inline]
pub fn find_bmu(weights: &[f64], input: &[f64], num_neurons: usize, weight_dim: usize) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;

    for i in 0..num_neurons {
        let offset = i * weight_dim;
        let dist = distance_squared(&weights[offset..offset + weight_dim], input);

        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }

    best_idx
}

/// Move `weights` towards `input` by `influence` (`w += influence * (x - w)`).
#[inline]
pub fn move_towards(weights: &mut [f64], input: &[f64], influence: f64) {
    debug_assert_eq!(weights.len(), input.len());

    let mut weight_chunks = weights.chunks_exact_mut(4);
    let mut input_chunks = input.chunks_exact(4);

    for (w, x) in (&mut weight_chunks).zip(&mut input_chunks) {
        w[0] += influence * (x[0] - w[0]);
        w[1] += influence * (x[1] - w[1]);
        w[2] += influence * (x[2] - w[2]);
        w[3] += influence * (x[3] - w[3]);
    }

    for (w, x) in weight_chunks
        .into_remainder()
        .iter_mut()
        .zip(input_chunks.remainder())
    {
        *w += influence * (x - *w);
    }
}

/// Largest absolute component-wise difference between two buffers.
#[inline]
pub fn max_abs_difference(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

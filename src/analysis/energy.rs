//! Energy envelope generation
//!
//! Fixed-length loudness summary: the buffer is cut into equal buckets and
//! each bucket's RMS amplitude is scaled to the 0-255 range.

/// Number of buckets in the envelope
pub const ENVELOPE_BUCKETS: usize = 100;

/// Scale applied to RMS amplitude
const ENERGY_SCALE: f32 = 255.0;

/// Generate an envelope of exactly `buckets` entries
///
/// Bucket length is `samples.len() / buckets`; samples past the last full
/// bucket are not counted. A buffer shorter than `buckets` yields all zeros.
pub fn energy_envelope(samples: &[f32], buckets: usize) -> Vec<f32> {
    let bucket_len = if buckets == 0 { 0 } else { samples.len() / buckets };
    if bucket_len == 0 {
        return vec![0.0; buckets];
    }

    samples
        .chunks_exact(bucket_len)
        .take(buckets)
        .map(|chunk| calculate_rms(chunk) * ENERGY_SCALE)
        .collect()
}

/// Root-mean-square amplitude of a chunk
#[inline]
fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

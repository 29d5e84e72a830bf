//! The median edge detector (MED) used as the pixel predictor by the JPEG-LS
//! family codec.

/// Predicts a sample value from its left (`a`), above (`b`), and above-left
/// (`c`) neighbours. The prediction picks the min or max of `a` and `b` when
/// `c` suggests an edge, and the planar extrapolation `a + b - c` otherwise,
/// clamped to the valid sample range.
///
pub fn predict(a: i32, b: i32, c: i32, max_value: i32) -> i32 {
  if c >= a.max(b) {
    a.min(b)
  } else if c <= a.min(b) {
    a.max(b)
  } else {
    (a + b - c).clamp(0, max_value)
  }
}

/// Predicts the sample at `(x, y)` of a row-major image, reading neighbours
/// through `sample_at`.
///
/// The top-left sample has no neighbours and predicts the default value for
/// the sample width; samples on the first row or column copy their one
/// defined neighbour.
///
pub fn predict_at(
  x: usize,
  y: usize,
  default_value: i32,
  max_value: i32,
  sample_at: impl Fn(usize, usize) -> i32,
) -> i32 {
  let (a, b, c) = if x == 0 && y == 0 {
    (default_value, default_value, default_value)
  } else if y == 0 {
    let a = sample_at(x - 1, 0);
    (a, a, a)
  } else if x == 0 {
    let b = sample_at(0, y - 1);
    (b, b, b)
  } else {
    (
      sample_at(x - 1, y),
      sample_at(x, y - 1),
      sample_at(x - 1, y - 1),
    )
  };

  predict(a, b, c, max_value)
}

/// Returns the neutral sample value predicted at the top-left corner: half of
/// the byte-width range, i.e. 128 for single-byte samples and 32768 for
/// two-byte samples.
///
pub fn default_sample_value(bytes_per_sample: usize) -> i32 {
  if bytes_per_sample == 1 { 128 } else { 32768 }
}

use crate::{Result, ShadowError};

/// Tolerance for `split[i].far == split[i + 1].near`.
const CONTIGUITY_EPSILON: f32 = 1e-6;

/// Cascade boundaries as fractions of the camera far plane, nearest first.
///
/// Validated on construction: at least one split, every fraction in `[0, 1]`,
/// `near < far` inside a split, and each split starting where the previous
/// one ended.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitScheme {
    bounds: Vec<(f32, f32)>,
}

impl SplitScheme {
    pub fn new(bounds: impl IntoIterator<Item = (f32, f32)>) -> Result<Self> {
        let bounds: Vec<_> = bounds.into_iter().collect();
        let invalid = |reason: String| Err(ShadowError::InvalidSplitScheme(reason));

        if bounds.is_empty() {
            return invalid("at least one split is required".into());
        }

        for (ix, &(near, far)) in bounds.iter().enumerate() {
            let in_range = |f: f32| f.is_finite() && (0.0..=1.0).contains(&f);
            if !in_range(near) || !in_range(far) {
                return invalid(format!("split {} ({}, {}) is outside [0, 1]", ix, near, far));
            }
            if near >= far {
                return invalid(format!("split {} is empty or inverted ({} >= {})", ix, near, far));
            }
            if ix > 0 {
                let previous_far = bounds[ix - 1].1;
                if (near - previous_far).abs() > CONTIGUITY_EPSILON {
                    return invalid(format!(
                        "split {} starts at {} but split {} ends at {}",
                        ix,
                        near,
                        ix - 1,
                        previous_far
                    ));
                }
            }
        }

        Ok(Self { bounds })
    }

    pub fn from_pairs(pairs: &[[f32; 2]]) -> Result<Self> {
        Self::new(pairs.iter().map(|&[near, far]| (near, far)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Always false for a validated scheme.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    #[inline]
    pub fn bounds(&self) -> &[(f32, f32)] {
        &self.bounds
    }

    pub fn far_fractions(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        self.bounds.iter().map(|&(_, far)| far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_contiguous_scheme() {
        let scheme = SplitScheme::from_pairs(&[[0.0, 0.1], [0.1, 0.3], [0.3, 1.0]]).unwrap();

        assert_eq!(scheme.len(), 3);
        assert_eq!(scheme.far_fractions().collect::<Vec<_>>(), vec![0.1, 0.3, 1.0]);
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            SplitScheme::new([]),
            Err(ShadowError::InvalidSplitScheme(_))
        ));
    }

    #[test]
    fn rejects_gaps_and_overlaps() {
        assert!(SplitScheme::from_pairs(&[[0.0, 0.1], [0.2, 0.3]]).is_err());
        assert!(SplitScheme::from_pairs(&[[0.0, 0.2], [0.1, 0.3]]).is_err());
    }

    #[test]
    fn rejects_inverted_and_out_of_range() {
        assert!(SplitScheme::from_pairs(&[[0.3, 0.1]]).is_err());
        assert!(SplitScheme::from_pairs(&[[0.5, 0.5]]).is_err());
        assert!(SplitScheme::from_pairs(&[[-0.1, 0.5]]).is_err());
        assert!(SplitScheme::from_pairs(&[[0.5, 1.5]]).is_err());
        assert!(SplitScheme::from_pairs(&[[0.0, f32::NAN]]).is_err());
    }
}

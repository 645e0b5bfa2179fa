use umbra_3d::Camera;
use umbra_math::Mat4;

use crate::{FitSettings, LightBasis, Result, ShadowError, SplitCamera, SplitScheme};

/// The ordered cascades of one directional light, nearest first.
#[derive(Clone, Debug)]
pub struct CascadeSet {
    scheme: SplitScheme,
    z_far: f32,
    settings: FitSettings,
    splits: Vec<SplitCamera>,
}

impl CascadeSet {
    /// Creates one split camera per scheme entry and fits all of them.
    pub fn new(
        scheme: SplitScheme,
        z_far: f32,
        settings: FitSettings,
        camera: &Camera,
        basis: &LightBasis,
    ) -> Result<Self> {
        if !(z_far.is_finite() && z_far > 0.0) {
            return Err(ShadowError::InvalidSplitScheme(format!(
                "far plane must be positive, got {}",
                z_far
            )));
        }

        let splits = scheme
            .bounds()
            .iter()
            .map(|&(near, far)| SplitCamera::new(near, far, z_far))
            .collect();

        let mut cascades = Self {
            scheme,
            z_far,
            settings,
            splits,
        };
        cascades.update(camera, basis, true)?;

        Ok(cascades)
    }

    /// Refits the cascades and returns how many were recomputed.
    ///
    /// Every cascade but the last is always refitted. The last one covers the
    /// most distant geometry and only follows the light, so it is refitted
    /// only when `sun_position_changed` is set and otherwise keeps its
    /// previous matrix. Nothing is written unless every fit succeeds.
    pub fn update(
        &mut self,
        camera: &Camera,
        basis: &LightBasis,
        sun_position_changed: bool,
    ) -> Result<usize> {
        umbra_dev::profile_function!();

        let last = self.splits.len() - 1;
        let fitted = self
            .splits
            .iter()
            .enumerate()
            .map(|(ix, split)| {
                if ix == last && !sun_position_changed {
                    Ok(None)
                } else {
                    split.fit(camera, basis, &self.settings).map(Some)
                }
            })
            .collect::<Result<Vec<Option<Mat4>>>>()?;

        let mut recomputed = 0;
        for (split, matrix) in self.splits.iter_mut().zip(fitted) {
            if let Some(matrix) = matrix {
                split.set_ortho_view_projection(matrix);
                recomputed += 1;
            }
        }

        log::trace!(
            "Refitted {}/{} shadow cascades (sun changed: {})",
            recomputed,
            self.splits.len(),
            sun_position_changed
        );

        Ok(recomputed)
    }

    #[inline]
    pub fn splits(&self) -> &[SplitCamera] {
        &self.splits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.splits.len()
    }

    /// Always false, a scheme has at least one split.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    #[inline]
    pub fn scheme(&self) -> &SplitScheme {
        &self.scheme
    }

    #[inline]
    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    #[inline]
    pub fn settings(&self) -> &FitSettings {
        &self.settings
    }
}

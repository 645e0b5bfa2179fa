//! CPU side images of the directional light's uniform buffers.
//!
//! Matrices are written column-major, as produced by [`Mat4::to_cols_array`],
//! which is what GLSL and WGSL expect for a `mat4` without a layout qualifier.
//! Values are native `f32`s; every target the renderer ships on is
//! little-endian, so [`MatricesBuffer::as_bytes`] can be uploaded as-is.

use bytemuck::{Pod, Zeroable};
use umbra_3d::Light;
use umbra_math::{Mat4, Vec3};

use crate::{CascadeSet, Result, ShadowError};

pub const MATRIX_FLOATS: usize = 16;
/// `{far_fraction, 0, 0, 0}`: std140 pads array elements to 16 bytes.
pub const SPLIT_METADATA_FLOATS: usize = 4;
pub const LIGHT_BUFFER_FLOATS: usize = 12;

/// Float count of a matrices buffer holding `splits` cascades.
pub const fn matrices_buffer_len(splits: usize) -> usize {
    (MATRIX_FLOATS + SPLIT_METADATA_FLOATS) * splits
}

/// All cascade view-projections followed by each cascade's far split fraction.
#[derive(Clone, Debug, PartialEq)]
pub struct MatricesBuffer {
    splits: usize,
    data: Vec<f32>,
}

impl MatricesBuffer {
    pub fn new(splits: usize) -> Self {
        Self {
            splits,
            data: vec![0.0; matrices_buffer_len(splits)],
        }
    }

    /// Rewrites the whole buffer from `cascades`, including cascades that were
    /// not refitted this frame.
    pub fn pack(&mut self, cascades: &CascadeSet) -> Result<()> {
        if cascades.len() != self.splits {
            return Err(ShadowError::LayoutMismatch {
                expected: self.splits,
                found: cascades.len(),
            });
        }

        self.data.clear();
        for split in cascades.splits() {
            self.data
                .extend_from_slice(&split.ortho_view_projection().to_cols_array());
        }
        for far in cascades.scheme().far_fractions() {
            self.data.extend_from_slice(&[far, 0.0, 0.0, 0.0]);
        }
        debug_assert_eq!(self.data.len(), matrices_buffer_len(self.splits));

        Ok(())
    }

    #[inline]
    pub fn splits(&self) -> usize {
        self.splits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        std::mem::size_of_val(self.data.as_slice())
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// The packed view-projection of cascade `ix`.
    pub fn matrix(&self, ix: usize) -> Option<Mat4> {
        if ix >= self.splits {
            return None;
        }
        let start = ix * MATRIX_FLOATS;
        Some(Mat4::from_cols_slice(&self.data[start..start + MATRIX_FLOATS]))
    }

    /// The packed far split fraction of cascade `ix`.
    pub fn split_far(&self, ix: usize) -> Option<f32> {
        if ix >= self.splits {
            return None;
        }
        self.data
            .get(self.splits * MATRIX_FLOATS + ix * SPLIT_METADATA_FLOATS)
            .copied()
    }
}

/// Base light properties, laid out as three std140 `vec4`s.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LightBuffer {
    pub direction: [f32; 3],
    pub intensity: f32,
    pub ambient: [f32; 3],
    _pad0: f32,
    pub color: [f32; 3],
    _pad1: f32,
}

impl LightBuffer {
    pub fn new(direction: Vec3, light: &Light, ambient: Vec3) -> Self {
        Self {
            direction: direction.to_array(),
            intensity: light.intensity,
            ambient: ambient.to_array(),
            color: light.color.to_array(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn as_floats(&self) -> &[f32; LIGHT_BUFFER_FLOATS] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

use bytemuck::{Pod, Zeroable};
use winit::dpi::PhysicalSize;

use crate::config::RendererConfig;

/// CPU-side mirror of the fragment shader's uniform block.
///
/// Field order and padding must observe std140 rules and match the
/// `LightningParams` block declared in [`crate::shader::FRAGMENT_SHADER_GLSL`]:
/// a vec2 followed by six scalars packs to 32 bytes with 16-byte alignment and
/// no interior padding.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightningUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub hue: f32,
    pub x_offset: f32,
    pub speed: f32,
    pub intensity: f32,
    pub size: f32,
}

unsafe impl Zeroable for LightningUniforms {}
unsafe impl Pod for LightningUniforms {}

impl LightningUniforms {
    /// Packs the surface extent, elapsed time, and configuration into one
    /// uniform block. Pure: a fixed input always yields the same block.
    pub fn compose(extent: PhysicalSize<u32>, elapsed: f32, config: &RendererConfig) -> Self {
        Self {
            resolution: [extent.width as f32, extent.height as f32],
            time: elapsed,
            hue: config.hue,
            x_offset: config.x_offset,
            speed: config.speed,
            intensity: config.intensity,
            size: config.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    /// Sanity-checks that the CPU mirror matches the std140 layout baked into
    /// the fragment shader's uniform block.
    #[test]
    fn uniforms_follow_std140_layout() {
        let uniforms =
            LightningUniforms::compose(PhysicalSize::new(1920, 1080), 0.0, &RendererConfig::default());
        let base = &uniforms as *const _ as usize;

        assert_eq!(align_of::<LightningUniforms>(), 16);
        assert_eq!(size_of::<LightningUniforms>(), 32);
        assert_eq!((&uniforms.resolution as *const _ as usize) - base, 0);
        assert_eq!((&uniforms.time as *const _ as usize) - base, 8);
        assert_eq!((&uniforms.hue as *const _ as usize) - base, 12);
        assert_eq!((&uniforms.x_offset as *const _ as usize) - base, 16);
        assert_eq!((&uniforms.speed as *const _ as usize) - base, 20);
        assert_eq!((&uniforms.intensity as *const _ as usize) - base, 24);
        assert_eq!((&uniforms.size as *const _ as usize) - base, 28);
    }

    #[test]
    fn compose_is_deterministic_for_fixed_inputs() {
        let config = RendererConfig::default();
        let extent = PhysicalSize::new(1600, 1200);

        let uniforms = LightningUniforms::compose(extent, 2.0, &config);
        assert_eq!(uniforms.time, 2.0);
        assert_eq!(uniforms.hue, 230.0);
        assert_eq!(uniforms.resolution, [1600.0, 1200.0]);
        assert_eq!(uniforms, LightningUniforms::compose(extent, 2.0, &config));
    }
}

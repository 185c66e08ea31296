//! Animated lightning background renderer.
//!
//! The crate owns one concern: a decorative, continuously animated
//! full-surface shader effect with an explicit lifecycle. The overall flow is:
//!
//! ```text
//!   CLI / boltwall
//!          │ RendererConfig
//!          ▼
//!   window::run ──▶ BackgroundRenderer ──▶ winit event loop ──▶ render_frame()
//!                          │                          │
//!                          └─▶ GpuState               └─▶ uniform block ─▶ GPU UBO
//! ```
//!
//! [`BackgroundRenderer`] combines the GPU state with a monotonic start time
//! and a run phase; the internal `GpuState` owns the surface, device, linked
//! pipeline, quad, and uniform buffer. The shader sources are compile-time
//! constants; only the uniform values animate.
//!
//! Initialization failures ([`RendererError`]) are terminal for the instance
//! and are meant to be logged and swallowed by the host: the effect is
//! decoration, and nothing here may take the host down with it.

use std::time::Instant;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::{LogicalSize, PhysicalSize};

mod config;
mod error;
mod extent;
mod gpu;
mod shader;
mod uniforms;
pub mod window;

pub use config::{ConfigOverrides, RendererConfig};
pub use error::{RendererError, ShaderStageKind};
pub use extent::{backing_extent, MIN_LOGICAL_EDGE};
pub use shader::{FRAGMENT_SHADER_GLSL, VERTEX_SHADER_GLSL};
pub use uniforms::LightningUniforms;

/// Lifecycle phase of a renderer instance.
///
/// `Stopped` is terminal; there is no restart transition, a new instance must
/// be created instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Stopped,
}

impl Phase {
    /// Transitions to `Stopped`; returns whether this call did the stopping.
    fn stop(&mut self) -> bool {
        let was_running = *self == Phase::Running;
        *self = Phase::Stopped;
        was_running
    }

    fn is_running(self) -> bool {
        self == Phase::Running
    }
}

/// One mounted instance of the lightning effect.
///
/// Owns its drawing context exclusively; nothing is shared across instances.
/// Runs until [`stop`](Self::stop) is called, relying on the host scheduler's
/// natural throttling rather than any pause logic of its own.
pub struct BackgroundRenderer {
    gpu: gpu::GpuState,
    start_time: Instant,
    phase: Phase,
}

impl BackgroundRenderer {
    /// Initializes a renderer on the given surface target.
    ///
    /// Performs the whole creation chain synchronously: context acquisition,
    /// shader compilation, pipeline link, quad and uniform upload, and the
    /// initial backing-extent computation from `logical_size` and
    /// `scale_factor`. On failure no frame work ever starts and nothing is
    /// left registered; the error carries the diagnostic for the host to log.
    pub fn create<T>(
        target: &T,
        logical_size: LogicalSize<f64>,
        scale_factor: f64,
        config: RendererConfig,
    ) -> Result<Self, RendererError>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let extent = backing_extent(logical_size, scale_factor);
        let gpu = gpu::GpuState::new(target, extent, &config)?;

        Ok(Self {
            gpu,
            start_time: Instant::now(),
            phase: Phase::Running,
        })
    }

    /// Current backing extent in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    pub fn is_stopped(&self) -> bool {
        !self.phase.is_running()
    }

    /// Recomputes the backing extent from the observed logical size and
    /// device pixel ratio and reconfigures the surface. Idempotent; does not
    /// change the lifecycle phase.
    pub fn resize(&mut self, logical_size: LogicalSize<f64>, scale_factor: f64) {
        self.gpu.resize(backing_extent(logical_size, scale_factor));
    }

    /// Renders one frame at the current elapsed time.
    ///
    /// A no-op once stopped: a redraw that was already queued when [`stop`]
    /// took effect lands here and must not touch the GPU.
    ///
    /// [`stop`]: Self::stop
    pub fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Some(elapsed) = elapsed_for_frame(self.phase, self.start_time) else {
            return Ok(());
        };
        self.gpu.render_frame(elapsed)
    }

    /// Stops the frame loop. Idempotent; the drawing context itself is not
    /// destroyed, it dies with the surface.
    pub fn stop(&mut self) {
        if self.phase.stop() {
            tracing::info!("lightning background stopped");
        }
    }
}

/// Elapsed time to render at, or `None` when the instance is stopped.
///
/// The `None` case is what absorbs a redraw that was already queued when
/// `stop` took effect: the frame lands, decides nothing is due, and touches
/// no GPU state.
fn elapsed_for_frame(phase: Phase, start_time: Instant) -> Option<f32> {
    if phase.is_running() {
        Some(start_time.elapsed().as_secs_f32())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{elapsed_for_frame, Phase};
    use std::time::Instant;

    #[test]
    fn stop_is_idempotent_and_terminal() {
        let mut phase = Phase::Running;
        assert!(phase.is_running());
        assert!(phase.stop());
        assert!(!phase.stop());
        assert!(!phase.is_running());
    }

    #[test]
    fn stopped_instance_skips_frame_work() {
        let start = Instant::now();
        let mut phase = Phase::Running;
        assert!(elapsed_for_frame(phase, start).is_some());

        phase.stop();
        assert_eq!(elapsed_for_frame(phase, start), None);

        // A second stop must not resurrect the frame loop either.
        phase.stop();
        assert_eq!(elapsed_for_frame(phase, start), None);
    }
}

//! Windowed host for the background renderer.
//!
//! Plays the part of the surrounding page: it creates the surface element,
//! forwards resize and scale-factor events, drives frames through winit's
//! redraw-request scheduler, and stops the renderer on shutdown. A renderer
//! that fails to initialize is logged and skipped; the host exits cleanly
//! with the effect simply absent.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::config::RendererConfig;
use crate::BackgroundRenderer;

/// How the host loop reacts to a failed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecoveryAction {
    /// Re-submit the current size so the surface gets reconfigured.
    Reconfigure,
    /// Stop the renderer and leave the event loop.
    Stop,
    /// Leave the surface alone and let the next redraw try again.
    Retry,
}

fn recovery_action(error: &wgpu::SurfaceError) -> RecoveryAction {
    match error {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RecoveryAction::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => RecoveryAction::Stop,
        _ => RecoveryAction::Retry,
    }
}

/// Opens a window and runs the lightning background inside it until the
/// window closes.
pub fn run(config: RendererConfig, window_size: (u32, u32)) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let window = WindowBuilder::new()
        .with_title("boltwall")
        .with_inner_size(PhysicalSize::new(window_size.0.max(1), window_size.1.max(1)))
        .build(&event_loop)
        .context("failed to create window")?;
    let window = Arc::new(window);

    let mut scale_factor = window.scale_factor();
    let logical = window.inner_size().to_logical::<f64>(scale_factor);

    let mut renderer =
        match BackgroundRenderer::create(window.as_ref(), logical, scale_factor, config) {
            Ok(renderer) => Some(renderer),
            Err(err) => {
                tracing::warn!(error = %err, "lightning background unavailable; continuing without it");
                None
            }
        };

    if renderer.is_some() {
        window.request_redraw();
    }

    event_loop
        .run(move |event, elwt| {
            // Drive redraws via vblank by waiting between events.
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            if let Some(renderer) = renderer.as_mut() {
                                renderer.stop();
                            }
                            elwt.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            if let Some(renderer) = renderer.as_mut() {
                                renderer.resize(new_size.to_logical(scale_factor), scale_factor);
                            }
                        }
                        WindowEvent::ScaleFactorChanged {
                            scale_factor: new_factor,
                            ..
                        } => {
                            scale_factor = new_factor;
                            if let Some(renderer) = renderer.as_mut() {
                                renderer.resize(
                                    window.inner_size().to_logical(scale_factor),
                                    scale_factor,
                                );
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            let Some(renderer) = renderer.as_mut() else {
                                return;
                            };
                            match renderer.render_frame() {
                                Ok(()) => {}
                                Err(err) => match recovery_action(&err) {
                                    RecoveryAction::Reconfigure => {
                                        tracing::debug!(
                                            width = renderer.size().width,
                                            height = renderer.size().height,
                                            "surface lost or outdated; reconfiguring"
                                        );
                                        renderer.resize(
                                            window.inner_size().to_logical(scale_factor),
                                            scale_factor,
                                        );
                                    }
                                    RecoveryAction::Stop => {
                                        tracing::error!(error = ?err, "surface out of memory; stopping");
                                        renderer.stop();
                                        elwt.exit();
                                    }
                                    RecoveryAction::Retry => {
                                        tracing::warn!(error = ?err, "surface error; retrying next frame");
                                    }
                                },
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    // Schedule the next frame once winit is about to wait for
                    // events again; a stopped renderer schedules nothing.
                    if renderer.as_ref().is_some_and(|r| !r.is_stopped()) {
                        window.request_redraw();
                    }
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A lost or outdated surface must reach the reconfigure path; the resize
    /// it triggers carries the unchanged window size, so skipping it would
    /// leave the surface failing on every subsequent frame.
    #[test]
    fn lost_and_outdated_surfaces_reconfigure() {
        assert_eq!(
            recovery_action(&wgpu::SurfaceError::Lost),
            RecoveryAction::Reconfigure
        );
        assert_eq!(
            recovery_action(&wgpu::SurfaceError::Outdated),
            RecoveryAction::Reconfigure
        );
    }

    #[test]
    fn out_of_memory_stops_the_loop() {
        assert_eq!(
            recovery_action(&wgpu::SurfaceError::OutOfMemory),
            RecoveryAction::Stop
        );
    }

    #[test]
    fn transient_errors_retry_next_frame() {
        assert_eq!(
            recovery_action(&wgpu::SurfaceError::Timeout),
            RecoveryAction::Retry
        );
    }
}

use std::time::{Duration, Instant};

use eframe::egui::{Color32, Id, Pos2, Rect, TextureHandle};
use image::Rgba;
use log::{debug, info};

use crate::surface::ScratchSurface;

/// Invoked with the (already cleared) surface when the erased ratio is
/// reached. Fires once per lifecycle; a reset arms it again.
pub type CompleteCallback = Box<dyn FnMut(&ScratchSurface)>;

/// How long the container rect has to stay stable before the surface is
/// retracked or resampled.
pub(crate) const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

pub struct ScratchOptions {
    /// Id of the region the mask is painted into. Required.
    pub canvas: Option<Id>,
    /// Mask fill color.
    pub color: Color32,
    /// Brush radius in pixels.
    pub size: f32,
    /// Fraction of erased pixels required to finish (0..=1).
    pub ratio: f32,
    pub on_complete: Option<CompleteCallback>,
}

impl Default for ScratchOptions {
    fn default() -> Self {
        Self {
            canvas: None,
            color: Color32::from_rgb(0xbb, 0xbb, 0xbb),
            size: 16.0,
            ratio: 0.5,
            on_complete: None,
        }
    }
}

impl ScratchOptions {
    pub fn new(canvas: impl std::hash::Hash) -> Self {
        Self {
            canvas: Some(Id::new(canvas)),
            ..Default::default()
        }
    }

    pub fn color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn on_complete(mut self, callback: impl FnMut(&ScratchSurface) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("no target canvas id was provided")]
    MissingCanvas,
    #[error("completion ratio {0} is outside 0..=1")]
    RatioOutOfRange(f32),
    #[error("brush radius {0} must be positive")]
    InvalidBrushRadius(f32),
}

pub struct ScratchEraser {
    pub(crate) canvas: Id,
    color: Color32,
    brush_radius: f32,
    ratio: f32,
    on_complete: Option<CompleteCallback>,
    pub(crate) state: ScratchState,
}

pub(crate) enum ScratchState {
    Unstarted,
    Active(ActiveScratch),
    /// Surface fully cleared; input is ignored until a reset.
    Complete(ScratchSurface),
}

pub(crate) struct ActiveScratch {
    pub surface: ScratchSurface,
    /// Last tracked container rect; pointer positions resolve against this.
    pub rect: Rect,
    pub dragging: bool,
    /// Latest observed layout change and when it was observed.
    pub pending_layout: Option<(Rect, Instant)>,
    /// Cached mask texture; None after any surface mutation.
    pub texture: Option<TextureHandle>,
}

impl ScratchEraser {
    pub fn new(options: ScratchOptions) -> Result<Self, OptionsError> {
        let canvas = options.canvas.ok_or(OptionsError::MissingCanvas)?;
        if !(0.0..=1.0).contains(&options.ratio) {
            return Err(OptionsError::RatioOutOfRange(options.ratio));
        }
        if options.size <= 0.0 {
            return Err(OptionsError::InvalidBrushRadius(options.size));
        }
        Ok(Self {
            canvas,
            color: options.color,
            brush_radius: options.size,
            ratio: options.ratio,
            on_complete: options.on_complete,
            state: ScratchState::Unstarted,
        })
    }

    /// Sizes a fresh surface to the measured container rect and paints the
    /// full mask. Calling again re-runs the whole setup.
    pub fn start(&mut self, rect: Rect) {
        debug!("starting scratch surface over {rect:?}");
        let surface = ScratchSurface::new(
            rect.width().round().max(0.0) as u32,
            rect.height().round().max(0.0) as u32,
            mask_pixel(self.color),
        );
        self.state = ScratchState::Active(ActiveScratch {
            surface,
            rect,
            dragging: false,
            pending_layout: None,
            texture: None,
        });
    }

    /// Discards all progress; the next `ui` pass re-measures and restarts.
    pub fn reset(&mut self) {
        self.state = ScratchState::Unstarted;
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, ScratchState::Complete(_))
    }

    pub fn surface(&self) -> Option<&ScratchSurface> {
        match &self.state {
            ScratchState::Unstarted => None,
            ScratchState::Active(active) => Some(&active.surface),
            ScratchState::Complete(surface) => Some(surface),
        }
    }

    /// The rect pointer positions are currently resolved against.
    pub fn container_rect(&self) -> Option<Rect> {
        match &self.state {
            ScratchState::Active(active) => Some(active.rect),
            _ => None,
        }
    }

    pub fn erased_fraction(&self) -> f32 {
        match &self.state {
            ScratchState::Unstarted => 0.0,
            ScratchState::Active(active) => active.surface.erased_fraction(),
            ScratchState::Complete(_) => 1.0,
        }
    }

    pub fn pointer_down(&mut self) {
        if let ScratchState::Active(active) = &mut self.state {
            active.dragging = true;
        }
    }

    /// Erases a brush circle at `pos` (in the same coordinate space as the
    /// tracked rect) while a drag is in progress.
    pub fn pointer_move(&mut self, pos: Pos2) {
        if let ScratchState::Active(active) = &mut self.state {
            if !active.dragging {
                return;
            }
            let local = pos - active.rect.min;
            active.surface.erase_circle(local.x, local.y, self.brush_radius);
            active.texture = None;
        }
    }

    /// Ends the drag and evaluates completion: when the erased pixel count
    /// reaches `floor(total * ratio)` the surface is cleared, further input is
    /// ignored and the completion callback runs.
    pub fn pointer_up(&mut self) {
        let finished = match &mut self.state {
            ScratchState::Active(active) => {
                active.dragging = false;
                active.surface.meets_ratio(self.ratio)
            }
            _ => false,
        };
        if !finished {
            return;
        }
        if let ScratchState::Active(mut active) =
            std::mem::replace(&mut self.state, ScratchState::Unstarted)
        {
            info!(
                "scratch surface revealed ({} of {} pixels erased)",
                active.surface.erased_pixels(),
                active.surface.total_pixels()
            );
            active.surface.clear();
            if let Some(on_complete) = self.on_complete.as_mut() {
                on_complete(&active.surface);
            }
            self.state = ScratchState::Complete(active.surface);
        }
    }

    /// Records the currently measured container rect. Any change re-arms the
    /// debounce window; pending work is dropped when the rect settles back.
    pub fn track_layout(&mut self, rect: Rect, now: Instant) {
        if let ScratchState::Active(active) = &mut self.state {
            if rect == active.rect {
                active.pending_layout = None;
            } else if active.pending_layout.map(|(pending, _)| pending) != Some(rect) {
                active.pending_layout = Some((rect, now));
            }
        }
    }

    /// Applies a debounced layout change once its deadline passed: a pure move
    /// only retracks the rect, a dimension change resamples the surface into
    /// the new size. Returns the remaining wait while one is still pending.
    pub fn poll_layout(&mut self, now: Instant) -> Option<Duration> {
        let ScratchState::Active(active) = &mut self.state else {
            return None;
        };
        let (rect, since) = active.pending_layout?;
        let elapsed = now.duration_since(since);
        if elapsed < RESIZE_DEBOUNCE {
            return Some(RESIZE_DEBOUNCE - elapsed);
        }
        active.pending_layout = None;
        if rect.size() != active.rect.size() {
            let width = rect.width().round().max(0.0) as u32;
            let height = rect.height().round().max(0.0) as u32;
            debug!(
                "resampling scratch surface {:?} -> {width}x{height}",
                active.surface.dimensions()
            );
            active.surface = active.surface.resampled(width, height);
            active.texture = None;
        }
        active.rect = rect;
        None
    }
}

fn mask_pixel(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), color.a()])
}

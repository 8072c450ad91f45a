//! Window event loop
//!
//! Single-threaded and blocking: wait for the next event, mutate view state
//! synchronously, re-rasterize when the dirty flag says so, blit, wait again.
use crate::{Dirty, Document, PAN_STEP, Rgb, Size, View, frame};
use std::{num::NonZeroU32, sync::Arc};
use tiny_skia::Pixmap;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

/// Bounds for the initial window size derived from the document
const MIN_INITIAL: u32 = 64;
const MAX_INITIAL: (u32, u32) = (1600, 1200);

/// Everything a key press can do to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    ToggleMode,
    Reset,
    Quit,
}

impl Action {
    /// Map a logical key to its action
    pub fn from_key(key: Key<&str>) -> Option<Action> {
        match key {
            Key::Named(NamedKey::ArrowLeft) => Some(Action::PanLeft),
            Key::Named(NamedKey::ArrowRight) => Some(Action::PanRight),
            Key::Named(NamedKey::ArrowUp) => Some(Action::PanUp),
            Key::Named(NamedKey::ArrowDown) => Some(Action::PanDown),
            Key::Named(NamedKey::Escape) => Some(Action::Quit),
            Key::Character("a") => Some(Action::ZoomIn),
            Key::Character("z") => Some(Action::ZoomOut),
            Key::Character("m") => Some(Action::ToggleMode),
            Key::Character("0") => Some(Action::Reset),
            Key::Character("q") => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Window and surface, once winit has resumed
enum RenderState {
    /// Winit is suspended, cache the window if we had one
    Suspended(Option<Arc<Window>>),
    /// Active window and its pixel surface
    Active {
        window: Arc<Window>,
        surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
        // keeps the display connection alive for the surface
        _context: softbuffer::Context<Arc<Window>>,
    },
}

/// The viewer application driven by the winit event loop
pub struct App {
    document: Document,
    view: View,
    dirty: Dirty,
    bg: Rgb,
    title: String,
    pixmap: Option<Pixmap>,
    state: RenderState,
}

impl App {
    pub fn new(document: Document, view: View, bg: Rgb, title: String) -> Self {
        Self {
            document,
            view,
            dirty: Dirty::new(),
            bg,
            title,
            pixmap: None,
            state: RenderState::Suspended(None),
        }
    }

    fn apply(&mut self, action: Action, event_loop: &ActiveEventLoop) {
        tracing::debug!("[input:action] {:?}", action);
        match action {
            Action::PanLeft => self.view.pan_by(-PAN_STEP, 0.0),
            Action::PanRight => self.view.pan_by(PAN_STEP, 0.0),
            Action::PanUp => self.view.pan_by(0.0, -PAN_STEP),
            Action::PanDown => self.view.pan_by(0.0, PAN_STEP),
            Action::ZoomIn => self.view.zoom_in(),
            Action::ZoomOut => self.view.zoom_out(),
            Action::ToggleMode => self.view.toggle_mode(),
            Action::Reset => self.view.reset(),
            Action::Quit => {
                event_loop.exit();
                return;
            }
        }
        self.dirty.mark();
        if let RenderState::Active { window, .. } = &self.state {
            window.request_redraw();
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let RenderState::Active { window, surface, .. } = &mut self.state else {
            return;
        };
        tracing::debug!("[resize] {}x{}", size.width, size.height);
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            surface.resize(width, height).expect("resize surface");
        }
        // the old pixmap is dropped before the replacement is allocated,
        // Pixmap::new is None for a zero-area viewport
        self.pixmap = None;
        self.pixmap = Pixmap::new(size.width, size.height);
        self.view.set_viewport(Size::new(size.width, size.height));
        self.dirty.mark();
        window.request_redraw();
    }

    fn redraw(&mut self) {
        let RenderState::Active { surface, .. } = &mut self.state else {
            return;
        };
        // minimized window, nothing to draw into, the dirty flag stays set
        let Some(pixmap) = &mut self.pixmap else {
            return;
        };
        if self.dirty.take() {
            let tr = self.view.transform(self.document.width(), self.document.height());
            tracing::debug_span!("[render]").in_scope(|| {
                pixmap.fill(self.bg.to_color());
                self.document.render(tr, &mut pixmap.as_mut());
            });
        }
        tracing::debug_span!("[present]").in_scope(|| {
            let mut buffer = surface.buffer_mut().expect("acquire surface buffer");
            frame::pack(pixmap.data(), &mut buffer);
            buffer.present().expect("present surface buffer");
        });
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let RenderState::Suspended(cached_window) = &mut self.state else {
            return;
        };
        let window = cached_window.take().unwrap_or_else(|| {
            let attrs = Window::default_attributes()
                .with_title(self.title.clone())
                .with_inner_size(initial_size(&self.document))
                .with_resizable(true);
            Arc::new(event_loop.create_window(attrs).expect("create window"))
        });
        let context = softbuffer::Context::new(window.clone()).expect("init render context");
        let surface = softbuffer::Surface::new(&context, window.clone()).expect("create surface");
        let size = window.inner_size();
        self.state = RenderState::Active {
            window,
            surface,
            _context: context,
        };
        self.resize(size);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let RenderState::Active { window, .. } = &self.state {
            self.state = RenderState::Suspended(Some(window.clone()));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let RenderState::Active { window, .. } = &self.state else {
            return;
        };
        if window.id() != window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(action) = Action::from_key(logical_key.as_ref()) {
                    self.apply(action, event_loop);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

/// Initial window size: the document size clamped to something sane
fn initial_size(document: &Document) -> PhysicalSize<u32> {
    let width = (document.width().ceil() as u32).clamp(MIN_INITIAL, MAX_INITIAL.0);
    let height = (document.height().ceil() as u32).clamp(MIN_INITIAL, MAX_INITIAL.1);
    PhysicalSize::new(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_actions() {
        assert_eq!(
            Action::from_key(Key::Named(NamedKey::ArrowLeft)),
            Some(Action::PanLeft)
        );
        assert_eq!(
            Action::from_key(Key::Named(NamedKey::ArrowDown)),
            Some(Action::PanDown)
        );
        assert_eq!(Action::from_key(Key::Character("a")), Some(Action::ZoomIn));
        assert_eq!(Action::from_key(Key::Character("z")), Some(Action::ZoomOut));
        assert_eq!(Action::from_key(Key::Character("m")), Some(Action::ToggleMode));
        assert_eq!(Action::from_key(Key::Character("0")), Some(Action::Reset));
        assert_eq!(Action::from_key(Key::Character("q")), Some(Action::Quit));
        assert_eq!(
            Action::from_key(Key::Named(NamedKey::Escape)),
            Some(Action::Quit)
        );
        assert_eq!(Action::from_key(Key::Character("x")), None);
        assert_eq!(Action::from_key(Key::Named(NamedKey::Tab)), None);
    }
}

//! The editor context: all canvas state for one darkroom session, and the
//! input handlers that mutate it.
//!
//! Handlers run on the thread that receives window events, strictly in
//! arrival order. The only blocking call is the recompute after a mask
//! edit.

use darkroom_engine::{ComputeEngine, ModuleId, ParamId, ParamRegistry, WidgetKind};
use darkroom_input::{Action, Event, Key, Modifiers, MouseButton};

use crate::config::EditorConfig;
use crate::coords::ViewportState;
use crate::error::{InteractionError, MaskError};
use crate::keybindings::{Binding, KeyCommand};
use crate::mask::MaskBufferView;
use crate::recompute::{self, Mutation};
use crate::viewport::Navigator;
use crate::widget::{ActiveWidget, DragState, WidgetParams};

/// Canvas state passed explicitly into every handler.
#[derive(Debug, Clone)]
pub struct EditorContext {
    config: EditorConfig,
    navigator: Navigator,
    widget: Option<ActiveWidget>,
    animation_playing: bool,
}

impl EditorContext {
    /// A context over the display area at `center` (top-left) of size `extent`.
    pub fn new(config: EditorConfig, center: (f32, f32), extent: (f32, f32)) -> Self {
        let navigator = Navigator::new(center, extent, config.navigation);
        Self {
            config,
            navigator,
            widget: None,
            animation_playing: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportState {
        self.navigator.state()
    }

    pub fn widget(&self) -> Option<&ActiveWidget> {
        self.widget.as_ref()
    }

    pub fn is_animation_playing(&self) -> bool {
        self.animation_playing
    }

    /// Start a session on a freshly loaded graph: centered fit, nothing
    /// focused, no drag in progress.
    pub fn enter<E>(&mut self, engine: &E) -> Result<(), InteractionError>
    where
        E: ComputeEngine + ?Sized,
    {
        let image_size = display_resolution(engine)?;
        self.widget = None;
        self.animation_playing = false;
        self.navigator.end_pan();
        self.navigator.reset_to_fit(image_size);
        log::info!("Entered darkroom on a {}x{} display", image_size.0, image_size.1);
        Ok(())
    }

    /// The shell laid out the display area anew.
    pub fn set_display_area(&mut self, center: (f32, f32), extent: (f32, f32)) {
        self.navigator.set_display_area(center, extent);
    }

    /// A parameter gained focus in the panel. Returns the widget kind it
    /// declares; parameters without an on-canvas widget clear the focus.
    pub fn focus_widget<R>(
        &mut self,
        registry: &R,
        module: ModuleId,
        param: ParamId,
        raw: &[f32],
        aspect_lock: Option<f32>,
    ) -> Option<WidgetKind>
    where
        R: ParamRegistry + ?Sized,
    {
        let Some(kind) = registry.widget_kind(module, param) else {
            self.widget = None;
            return None;
        };
        let params = WidgetParams::from_raw(kind, raw, self.config.widgets.default_brush);
        log::debug!("Focused {} widget on module {} param {}", kind.name(), module, param);
        self.widget = Some(ActiveWidget::new(module, param, params, aspect_lock));
        Some(kind)
    }

    /// Focus left the parameter. Returns its final state so the shell can
    /// write the values back.
    pub fn blur_widget(&mut self) -> Option<ActiveWidget> {
        self.widget.take()
    }

    /// Dispatch one input event. Key presses may produce a command for the
    /// shell.
    pub fn handle_event<E>(&mut self, engine: &mut E, event: Event) -> Result<Option<KeyCommand>, InteractionError>
    where
        E: ComputeEngine + ?Sized,
    {
        match event {
            Event::MouseButton {
                button,
                action,
                position,
                ..
            } => self.mouse_button(engine, button, action, position).map(|_| None),
            Event::MouseMoved { position } => self.mouse_position(engine, position).map(|_| None),
            Event::MouseWheel {
                delta,
                position,
                modifiers,
            } => self.mouse_scrolled(engine, position, delta, modifiers).map(|_| None),
            Event::Key { key, action, .. } => Ok(self.keyboard(engine, key, action)),
        }
    }

    fn hit_radius_px(&self) -> f32 {
        self.config.widgets.hit_radius_fraction * self.navigator.state().extent.1
    }

    /// Mouse button pressed or released at `pos`.
    pub fn mouse_button<E>(
        &mut self,
        engine: &mut E,
        button: MouseButton,
        action: Action,
        pos: (f32, f32),
    ) -> Result<(), InteractionError>
    where
        E: ComputeEngine + ?Sized,
    {
        let image_size = display_resolution(engine)?;
        let mapper = self.navigator.state().mapper(image_size);
        let over_image = self.navigator.state().contains_view(pos);
        let radius = self.hit_radius_px();

        if let Some(widget) = self.widget.as_mut() {
            match widget.kind() {
                WidgetKind::Perspective | WidgetKind::Crop | WidgetKind::Pick => match action {
                    Action::Release => widget.release(),
                    Action::Press => {
                        if button == MouseButton::Left && widget.press_handle(&mapper, pos, radius) {
                            return Ok(());
                        }
                    }
                },
                WidgetKind::Draw => match (action, button) {
                    (Action::Press, MouseButton::Right) if over_image => {
                        let module = widget.module;
                        let removed = edit_mask(engine, module, |mask| mask.undo_last_stroke());
                        if let Some(removed) = removed.filter(|&n| n > 0) {
                            log::debug!("Undid last stroke ({} vertices)", removed);
                            recompute::after_edit(engine, module, Mutation::MaskBuffer);
                        }
                        return Ok(());
                    }
                    (Action::Press, MouseButton::Left) if over_image => {
                        widget.begin_painting();
                        let module = widget.module;
                        match edit_mask(engine, module, |mask| mask.start_new_stroke()) {
                            Some(Ok(true)) => {
                                recompute::after_edit(engine, module, Mutation::MaskBuffer);
                            }
                            Some(Err(MaskError::Full)) => log::trace!("No room for a stroke boundary"),
                            _ => {}
                        }
                        return Ok(());
                    }
                    (Action::Release, _) => widget.release(),
                    _ => {}
                },
            }
        }

        match action {
            Action::Release => self.navigator.end_pan(),
            Action::Press if over_image => match button {
                MouseButton::Left => self.navigator.begin_pan(pos, image_size),
                MouseButton::Middle => self.navigator.cycle_zoom(pos, image_size),
                MouseButton::Right | MouseButton::Other(_) => {}
            },
            Action::Press => {}
        }
        Ok(())
    }

    /// Cursor moved to `pos`.
    pub fn mouse_position<E>(&mut self, engine: &mut E, pos: (f32, f32)) -> Result<(), InteractionError>
    where
        E: ComputeEngine + ?Sized,
    {
        let image_size = display_resolution(engine)?;
        let mapper = self.navigator.state().mapper(image_size);

        if let Some(widget) = self.widget.as_mut() {
            match widget.drag_state() {
                DragState::Handle(_) => {
                    let n = mapper.view_to_image(pos);
                    if widget.drag_to(n) {
                        recompute::after_edit(engine, widget.module, Mutation::Geometry);
                    }
                    return Ok(());
                }
                DragState::Painting => {
                    if let Some(brush) = widget.brush() {
                        let n = mapper.view_to_image(pos);
                        let module = widget.module;
                        let appended = edit_mask(engine, module, |mask| {
                            mask.append_vertex(n, brush.radius, brush.opacity, brush.hardness)
                        });
                        match appended {
                            Some(Ok(())) => {
                                recompute::after_edit(engine, module, Mutation::MaskBuffer);
                            }
                            Some(Err(e)) => log::trace!("Dropped dab at ({:.4}, {:.4}): {}", n.0, n.1, e),
                            None => {}
                        }
                    }
                    return Ok(());
                }
                DragState::Idle => {}
            }
        }

        self.navigator.pan_to(pos, image_size);
        Ok(())
    }

    /// Mouse wheel scrolled by `delta` ticks at `pos`.
    ///
    /// A focused draw widget takes the scroll for its brush; otherwise the
    /// viewport zooms.
    pub fn mouse_scrolled<E>(
        &mut self,
        engine: &mut E,
        pos: (f32, f32),
        delta: f32,
        modifiers: Modifiers,
    ) -> Result<(), InteractionError>
    where
        E: ComputeEngine + ?Sized,
    {
        if !self.navigator.state().contains_view(pos) {
            return Ok(());
        }

        if let Some(widget) = self.widget.as_mut() {
            if widget.kind() == WidgetKind::Draw {
                widget.scroll_brush(delta, modifiers, &self.config.widgets);
                return Ok(());
            }
        }

        let image_size = display_resolution(engine)?;
        self.navigator.scroll_zoom(pos, delta, image_size);
        Ok(())
    }

    /// Key pressed or released.
    pub fn keyboard<E>(&mut self, engine: &E, key: Key, action: Action) -> Option<KeyCommand>
    where
        E: ComputeEngine + ?Sized,
    {
        if action != Action::Press {
            return None;
        }
        let binding = self.config.keybindings.binding_for_key(key)?;
        let animated = engine.frame_count() > 1;
        let command = match binding {
            Binding::Leave => KeyCommand::LeaveDarkroom,
            Binding::Reload => KeyCommand::ReloadModules,
            Binding::Forward | Binding::Backward if animated => {
                self.animation_playing = !self.animation_playing;
                KeyCommand::ToggleAnimation {
                    playing: self.animation_playing,
                }
            }
            Binding::Forward => KeyCommand::NextImage,
            Binding::Backward => KeyCommand::PreviousImage,
        };
        log::debug!("⌨️ {:?} -> {:?}", key, command);
        Some(command)
    }
}

/// Query the display node, logging when it is missing.
fn display_resolution<E>(engine: &E) -> Result<(u32, u32), InteractionError>
where
    E: ComputeEngine + ?Sized,
{
    engine.display_resolution().ok_or_else(|| {
        log::warn!("Graph has no display node; input ignored");
        InteractionError::MissingDisplay
    })
}

/// Run `f` on the module's mapped mask buffer. `None` when the module has
/// no usable buffer.
fn edit_mask<E, R>(engine: &mut E, module: ModuleId, f: impl FnOnce(&mut MaskBufferView<'_>) -> R) -> Option<R>
where
    E: ComputeEngine + ?Sized,
{
    let Some(bytes) = engine.mapped_source(module) else {
        log::warn!("Module {} has no mapped mask buffer", module);
        return None;
    };
    match MaskBufferView::new(bytes) {
        Ok(mut mask) => Some(f(&mut mask)),
        Err(e) => {
            log::warn!("Module {} mask buffer unusable: {}", module, e);
            None
        }
    }
}

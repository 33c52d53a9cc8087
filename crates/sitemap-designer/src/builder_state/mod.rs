//! Builder session: the state behind one open site map.
//!
//! The session is split into submodules:
//! - `input`: pointer and keyboard handling per tool
//! - `dragdrop`: catalog drag-and-drop onto the canvas
//! - `actions`: toolbar commands on the selection
//! - `history`: undo/redo
//! - `file_io`: save/open through a repository

mod actions;
mod dragdrop;
mod file_io;
mod history;
mod input;

pub use actions::{ActionOutcome, Alignment, Axis, FlipAxis, ToolbarAction};

use std::sync::Arc;

use image::RgbaImage;
use sitemap_core::constants::{CANVAS_ZONE_ID, ELEMENT_TEMPLATE_ITEM, VIEW_PADDING};
use sitemap_core::{
    AppEvent, EventBus, Point, SceneEvent, SelectionEvent, ToolEvent,
};
use sitemap_settings::BuilderConfig;
use tiny_skia::Pixmap;

use crate::catalog::{Catalog, TemplateLibrary};
use crate::commands::SceneCommand;
use crate::dragdrop::{DragDropCoordinator, DropZone, ZoneEvent};
use crate::duplication::DuplicationOptions;
use crate::history::CommandHistory;
use crate::model::Color;
use crate::renderer::{self, DrawOp, Overlays, RenderStyle};
use crate::scene::Scene;
use crate::selection::Selection;
use crate::tools::{Annotations, IssueMarker, Measurement, Tool, ToolState};
use crate::viewport::Viewport;

/// One open site map and everything needed to edit it.
///
/// All mutation goes through the session so that selection stays a subset of
/// the scene, every edit lands in the history, host events are published, and
/// the redraw flag is raised.
pub struct BuilderSession {
    pub(crate) config: BuilderConfig,
    pub(crate) name: String,
    pub(crate) scene: Scene,
    pub(crate) selection: Selection,
    pub(crate) viewport: Viewport,
    pub(crate) tools: ToolState,
    pub(crate) drag: DragDropCoordinator,
    pub(crate) history: CommandHistory,
    pub(crate) catalog: Box<dyn Catalog>,
    pub(crate) events: Arc<EventBus>,
    pub(crate) annotations: Annotations,
    pub(crate) style: RenderStyle,
    pub(crate) snap_enabled: bool,
    pub(crate) drop_hover: Option<Point>,
    pub(crate) last_drop: Option<u64>,
    pub(crate) pending_duplication: Option<DuplicationOptions>,
    pub(crate) is_modified: bool,
    redraw: bool,
}

impl BuilderSession {
    /// Creates a session with an empty scene, the built-in template library and
    /// a private event bus.
    pub fn new(config: BuilderConfig) -> Self {
        let mut scene = Scene::new(config.canvas.width, config.canvas.height)
            .with_background(Color::parse_or(&config.canvas.background, Color::WHITE));
        if let Err(e) = scene.set_grid(config.grid.enabled, config.grid.cell_size) {
            tracing::warn!("Ignoring grid settings: {}", e);
        }

        let mut viewport = Viewport::new(config.canvas.width, config.canvas.height)
            .with_zoom_step(config.viewport.zoom_step);
        viewport.set_zoom(config.viewport.initial_zoom);

        let mut tools = ToolState::new();
        tools.pin(config.drawing.pin_tools);

        let mut session = Self {
            name: "Untitled".to_string(),
            selection: Selection::new(),
            drag: DragDropCoordinator::new(),
            history: CommandHistory::new(config.history.max_depth),
            catalog: Box::new(TemplateLibrary::with_defaults()),
            events: Arc::new(EventBus::new()),
            annotations: Annotations::default(),
            style: RenderStyle::from_settings(&config.render),
            snap_enabled: config.grid.snap_enabled,
            drop_hover: None,
            last_drop: None,
            pending_duplication: None,
            is_modified: false,
            redraw: true,
            scene,
            viewport,
            tools,
            config,
        };
        session.register_canvas_zone();
        session.sync_snapping();
        session
    }

    /// Replaces the template catalog.
    pub fn with_catalog(mut self, catalog: Box<dyn Catalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Publishes events on a bus shared with the host instead of a private
    /// one.
    pub fn with_event_bus(mut self, events: Arc<EventBus>) -> Self {
        self.events = events;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn drag_coordinator(&self) -> &DragDropCoordinator {
        &self.drag
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.annotations.measurements
    }

    pub fn issues(&self) -> &[IssueMarker] {
        &self.annotations.issues
    }

    /// Unsaved changes since the last save or open.
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    // --- tools ---

    pub fn tool(&self) -> Tool {
        self.tools.tool()
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.tools
    }

    /// Activates a tool, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        self.abort_gesture();
        let changed = self.tools.set_tool(tool);
        if changed {
            self.emit_tool_changed();
            self.redraw = true;
        }
        changed
    }

    /// Keeps creation tools active after each creation.
    pub fn pin_tool(&mut self, pinned: bool) {
        self.tools.pin(pinned);
    }

    pub fn is_tool_pinned(&self) -> bool {
        self.tools.is_pinned()
    }

    // --- grid and snapping ---

    pub fn set_grid(&mut self, enabled: bool, cell_size: f64) -> sitemap_core::Result<()> {
        self.scene.set_grid(enabled, cell_size)?;
        self.sync_snapping();
        self.emit(AppEvent::Scene(SceneEvent::GridChanged {
            enabled: self.scene.grid_enabled(),
            cell_size: self.scene.grid_size(),
        }));
        self.redraw = true;
        Ok(())
    }

    pub fn toggle_grid(&mut self) {
        let enabled = !self.scene.grid_enabled();
        let cell = self.scene.grid_size();
        if let Err(e) = self.set_grid(enabled, cell) {
            tracing::warn!("Failed to toggle grid: {}", e);
        }
    }

    /// Snaps drops, drawn shapes and moves to the grid cell size.
    pub fn set_snapping(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
        self.sync_snapping();
    }

    pub fn snapping_enabled(&self) -> bool {
        self.snap_enabled
    }

    /// Cell size used for snapping, when snapping is on.
    pub fn snap_cell(&self) -> Option<f64> {
        self.snap_enabled.then(|| self.scene.grid_size())
    }

    fn sync_snapping(&mut self) {
        self.drag.set_snapping(self.snap_cell());
    }

    pub(crate) fn maybe_snap(&self, point: Point) -> Point {
        match self.snap_cell() {
            Some(cell) => sitemap_core::snap_to_grid(point, cell),
            None => point,
        }
    }

    // --- viewport ---

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
        self.redraw = true;
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.redraw = true;
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.redraw = true;
    }

    /// Zooms keeping the scene point under `screen_point` fixed (scroll wheel).
    pub fn zoom_at(&mut self, screen_point: Point, zoom: f64) {
        self.viewport.zoom_at(screen_point, zoom);
        self.redraw = true;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
        self.redraw = true;
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.viewport.set_pan(x, y);
        self.redraw = true;
    }

    /// Fits the viewport to the elements, or to the whole map when empty.
    pub fn fit_to_content(&mut self) {
        let bounds = self
            .scene
            .content_bounds()
            .unwrap_or_else(|| self.scene.extent());
        self.viewport.fit_to_bounds(&bounds, VIEW_PADDING);
        self.redraw = true;
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.redraw = true;
    }

    /// Resizes the drawing surface (host window resize).
    pub fn resize_canvas(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
        self.redraw = true;
    }

    // --- rendering ---

    pub fn render_style(&self) -> &RenderStyle {
        &self.style
    }

    /// Feedback for the interaction in progress: the drop point of a catalog
    /// drag, the marquee or drawing band, and pending duplication copies.
    pub fn overlays(&self) -> Overlays {
        let preview = match &self.pending_duplication {
            Some(options) => self.preview_duplication(options).footprints,
            None => Vec::new(),
        };
        Overlays {
            drop_marker: self.drop_hover,
            band: self.tools.gesture().rect(),
            preview,
        }
    }

    pub fn display_list(&self) -> Vec<DrawOp> {
        renderer::build_display_list(
            &self.scene,
            &self.selection,
            &self.viewport,
            &self.style,
            &self.overlays(),
        )
    }

    pub fn render(&self) -> Option<Pixmap> {
        renderer::render_scene(
            &self.scene,
            &self.selection,
            &self.viewport,
            &self.style,
            &self.overlays(),
        )
    }

    pub fn render_image(&self) -> RgbaImage {
        renderer::render_to_image(
            &self.scene,
            &self.selection,
            &self.viewport,
            &self.style,
            &self.overlays(),
        )
    }

    // --- drop zones ---

    /// Registers an extra drop zone. Drops on it are reported through
    /// `DragEvent::Dropped` on the event bus.
    pub fn register_drop_zone(&mut self, zone: DropZone) {
        self.drag.register_zone(zone);
    }

    pub fn unregister_drop_zone(&mut self, id: &str) {
        let events = self.drag.unregister_zone(id);
        self.dispatch_zone_events(&events);
    }

    fn register_canvas_zone(&mut self) {
        self.drag.register_zone(
            DropZone::new(CANVAS_ZONE_ID, self.scene.extent()).accepting([ELEMENT_TEMPLATE_ITEM]),
        );
    }

    /// Keeps the canvas zone in step with the scene size.
    pub(crate) fn sync_canvas_zone(&mut self) {
        if !self.drag.set_zone_bounds(CANVAS_ZONE_ID, self.scene.extent()) {
            self.register_canvas_zone();
        }
    }

    // --- scene changes ---

    /// Applies a command and records it as one history entry.
    pub(crate) fn execute_command(&mut self, command: SceneCommand) {
        self.history.execute(command, &mut self.scene);
        self.after_scene_change();
    }

    /// Records a command whose effect is already in the scene.
    pub(crate) fn record_command(&mut self, command: SceneCommand) {
        self.history.record(command);
        self.after_scene_change();
    }

    pub(crate) fn after_scene_change(&mut self) {
        self.is_modified = true;
        if self.selection.prune(&self.scene) {
            self.emit_selection_changed();
        }
        self.emit_scene_changed();
        self.redraw = true;
    }

    /// Replaces the selection, notifying when it changed.
    pub(crate) fn change_selection<F>(&mut self, change: F) -> bool
    where
        F: FnOnce(&mut Selection, &Scene) -> bool,
    {
        let changed = change(&mut self.selection, &self.scene);
        if changed {
            self.emit_selection_changed();
            self.redraw = true;
        }
        changed
    }

    // --- events ---

    pub(crate) fn emit(&self, event: AppEvent) {
        self.events.publish(event);
    }

    pub(crate) fn emit_selection_changed(&self) {
        self.emit(AppEvent::Selection(SelectionEvent::Changed {
            ids: self.selection.ids().to_vec(),
        }));
    }

    pub(crate) fn emit_scene_changed(&self) {
        self.emit(AppEvent::Scene(SceneEvent::Changed {
            element_ids: self.scene.ids(),
        }));
    }

    pub(crate) fn emit_tool_changed(&self) {
        self.emit(AppEvent::Tool(ToolEvent::Changed {
            tool: self.tools.tool().to_string(),
        }));
    }

    pub(crate) fn dispatch_zone_events(&mut self, events: &[ZoneEvent]) {
        crate::dragdrop::dispatch_all(events, self);
    }
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl std::fmt::Debug for BuilderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderSession")
            .field("name", &self.name)
            .field("elements", &self.scene.len())
            .field("selection", &self.selection)
            .field("tool", &self.tools.tool())
            .field("viewport", &self.viewport)
            .field("dragging", &self.drag.is_dragging())
            .finish()
    }
}

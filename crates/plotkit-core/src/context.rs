//! The owning drawing context and its authoring scopes.
//!
//! A [`Context`] holds the ambient state that paths inherit: the current transform,
//! transform and angle modes, pen style and autoclose policy. Scopes are guard objects
//! whose `Drop` puts that state back, so cleanup also runs when a scope is left early
//! through `?` or a panic.

use crate::bezier::Bezier;
use crate::curve::{Curve, PathItem};
use crate::error::{PathError, PathResult};
use crate::geometry::AngleMode;
use crate::settings::Settings;
use crate::style::{CapStyle, FillRule, JoinStyle, PenStyle, SerializableColor, StyleOverrides};
use crate::transform::{ContextSnapshot, ScopeExit, Transform, TransformMode};
use kurbo::{Affine, BezPath, Stroke};
use peniko::{Color, Fill};
use std::ops::{Deref, DerefMut};

/// Resolved geometry and style handed to a [`Surface`].
#[derive(Debug, Clone)]
pub struct PaintRequest {
    /// Path outline; every subpath starts with a move.
    pub path: BezPath,
    pub transform: Affine,
    pub fill: Option<Color>,
    pub fill_rule: Fill,
    pub stroke: Option<(Color, Stroke)>,
}

impl From<&Bezier> for PaintRequest {
    fn from(path: &Bezier) -> Self {
        let style = &path.style;
        Self {
            path: path.to_bez_path(),
            transform: path.resolved_transform(),
            fill: style.fill_color(),
            fill_rule: style.fill_rule.into(),
            stroke: style.stroke_color().map(|color| (color, style.to_stroke())),
        }
    }
}

/// Rendering backend that consumes finished paths.
pub trait Surface {
    fn paint(&mut self, request: &PaintRequest);
}

/// Surface that keeps every request it receives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub requests: Vec<PaintRequest>,
}

impl Surface for RecordingSurface {
    fn paint(&mut self, request: &PaintRequest) {
        self.requests.push(request.clone());
    }
}

/// Per-path options for [`Context::bezier`].
#[derive(Debug, Clone, Default)]
pub struct BezierOptions {
    pub style: StyleOverrides,
    /// Overrides the context's autoclose policy.
    pub autoclose: Option<bool>,
    /// Draw when finished. Defaults to true.
    pub draw: Option<bool>,
}

/// Saved graphics state.
#[derive(Debug, Clone)]
struct GraphicsState {
    transform: Transform,
    transform_mode: TransformMode,
    angle_mode: AngleMode,
    style: PenStyle,
    autoclose: bool,
}

/// Ambient drawing state shared by the paths it creates.
#[derive(Debug)]
pub struct Context<S: Surface = RecordingSurface> {
    surface: S,
    transform: Transform,
    transform_mode: TransformMode,
    angle_mode: AngleMode,
    style: PenStyle,
    autoclose: bool,
    flatness: f64,
    subdivisions: usize,
    /// Set while a [`PathScope`] is alive.
    path_open: bool,
    state_stack: Vec<GraphicsState>,
}

impl Default for Context<RecordingSurface> {
    fn default() -> Self {
        Self::new(RecordingSurface::default())
    }
}

impl<S: Surface> Context<S> {
    pub fn new(surface: S) -> Self {
        Self::with_settings(surface, &Settings::default())
    }

    pub fn with_settings(surface: S, settings: &Settings) -> Self {
        Self {
            surface,
            transform: Transform::new(),
            transform_mode: settings.transform_mode,
            angle_mode: settings.angle_mode,
            style: PenStyle::default(),
            autoclose: settings.autoclose,
            flatness: settings.flatness,
            subdivisions: settings.subdivisions,
            path_open: false,
            state_stack: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The current transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Reset the current transform to identity.
    pub fn reset(&mut self) {
        self.transform = Transform::new();
    }

    pub fn transform_mode(&self) -> TransformMode {
        self.transform_mode
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn style(&self) -> &PenStyle {
        &self.style
    }

    pub fn autoclose(&self) -> bool {
        self.autoclose
    }

    /// Curve tolerance configured for boolean operations.
    pub fn flatness(&self) -> f64 {
        self.flatness
    }

    pub fn is_path_open(&self) -> bool {
        self.path_open
    }

    fn state(&self) -> GraphicsState {
        GraphicsState {
            transform: self.transform.clone(),
            transform_mode: self.transform_mode,
            angle_mode: self.angle_mode,
            style: self.style.clone(),
            autoclose: self.autoclose,
        }
    }

    fn set_state(&mut self, state: GraphicsState) {
        self.transform = state.transform;
        self.transform_mode = state.transform_mode;
        self.angle_mode = state.angle_mode;
        self.style = state.style;
        self.autoclose = state.autoclose;
    }

    /// Push the graphics state.
    pub fn save(&mut self) {
        let state = self.state();
        self.state_stack.push(state);
    }

    /// Pop the graphics state. Returns false if nothing was saved.
    pub fn restore(&mut self) -> bool {
        match self.state_stack.pop() {
            Some(state) => {
                self.set_state(state);
                true
            }
            None => {
                log::warn!("restore() without a matching save()");
                false
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: &ContextSnapshot) {
        if let Some(affine) = snapshot.transform {
            self.transform = Transform::from(affine);
        }
        if let Some(mode) = snapshot.transform_mode {
            self.transform_mode = mode;
        }
        if let Some(mode) = snapshot.angle_mode {
            self.angle_mode = mode;
        }
    }

    /// Run a mutation on the current transform, tagging the elementary step with the
    /// prior matrix so a scope can restore it.
    fn mutate(&mut self, op: impl FnOnce(&mut Transform) -> Transform) -> Transform {
        let prior = self.transform.affine();
        op(&mut self.transform).with_rollback(ContextSnapshot::transform(prior))
    }

    /// Rotate the current transform by `amount`, read in the context's angle mode.
    pub fn rotate(&mut self, amount: f64) -> Transform {
        let degrees = self.angle_mode.to_degrees(amount);
        self.mutate(|t| t.rotate(degrees))
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> Transform {
        self.mutate(|t| t.translate(dx, dy))
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> Transform {
        self.mutate(|t| t.scale(sx, sy))
    }

    pub fn skew(&mut self, x: f64, y: f64) -> Transform {
        let (x, y) = (self.angle_mode.to_degrees(x), self.angle_mode.to_degrees(y));
        self.mutate(|t| t.skew(x, y))
    }

    /// Switch the transform mode. The returned transform restores the prior mode when
    /// used as a scope.
    pub fn set_transform_mode(&mut self, mode: TransformMode) -> Transform {
        let snapshot = ContextSnapshot {
            transform_mode: Some(self.transform_mode),
            ..ContextSnapshot::default()
        };
        self.transform_mode = mode;
        Transform::new().with_rollback(snapshot)
    }

    /// Switch the angle mode. The returned transform restores the prior mode when used
    /// as a scope.
    pub fn set_angle_mode(&mut self, mode: AngleMode) -> Transform {
        let snapshot = ContextSnapshot {
            angle_mode: Some(self.angle_mode),
            ..ContextSnapshot::default()
        };
        self.angle_mode = mode;
        Transform::new().with_rollback(snapshot)
    }

    pub fn set_fill(&mut self, color: Option<Color>) {
        self.style.fill = color.map(SerializableColor::from);
    }

    pub fn set_stroke(&mut self, color: Option<Color>) {
        self.style.stroke = color.map(SerializableColor::from);
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.stroke_width = width;
    }

    pub fn set_cap_style(&mut self, cap: CapStyle) {
        self.style.cap = cap;
    }

    pub fn set_join_style(&mut self, join: JoinStyle) {
        self.style.join = join;
    }

    pub fn set_dash(&mut self, dash: Vec<f64>) {
        self.style.dash = dash;
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) {
        self.style.fill_rule = rule;
    }

    pub fn set_autoclose(&mut self, autoclose: bool) {
        self.autoclose = autoclose;
    }

    /// Create an empty path inheriting this context's style and transform.
    pub fn bezier(&self, options: BezierOptions) -> Bezier {
        let mut path = Bezier::new().with_style(options.style.apply(&self.style));
        path.transform = Transform::from(self.transform.affine());
        path.transform_mode = self.transform_mode;
        path.autoclose = options.autoclose.unwrap_or(self.autoclose);
        path.autodraw = options.draw.unwrap_or(true);
        path.subdivisions = self.subdivisions;
        path
    }

    /// Build a finished path from points and curves, drawing it unless
    /// `options.draw` is `Some(false)`.
    pub fn bezier_from<I>(&mut self, items: I, options: BezierOptions) -> Bezier
    where
        I: IntoIterator,
        I::Item: Into<PathItem>,
    {
        let mut path = self.bezier(options);
        path.extend(items);
        self.complete(&mut path);
        path
    }

    /// Autoclose, autodraw and mark the path finished.
    fn complete(&mut self, path: &mut Bezier) {
        if path.autoclose && !path.is_empty() && path.elements().last() != Some(&Curve::Close) {
            path.close_path();
        }
        if path.autodraw {
            self.draw(path);
        }
        path.finish();
    }

    /// Paint a path on the surface.
    pub fn draw(&mut self, path: &Bezier) {
        self.surface.paint(&PaintRequest::from(path));
    }

    /// Enter a transform scope. The context is put back when the scope drops.
    pub fn transformed(&mut self, transform: Transform) -> TransformScope<'_, S> {
        TransformScope::enter(self, transform)
    }

    /// Open `path` for authoring.
    ///
    /// Fails if another path is already open on this context or if `path` was
    /// already finished. The graphics state is saved and restored around the scope.
    pub fn begin_path<'a>(&'a mut self, path: &'a mut Bezier) -> PathResult<PathScope<'a, S>> {
        if self.path_open {
            return Err(PathError::RecursivePath);
        }
        if path.is_finished() {
            return Err(PathError::PathComplete);
        }
        self.save();
        self.path_open = true;
        log::debug!("path scope opened ({} elements)", path.len());
        Ok(PathScope { ctx: self, path })
    }
}

/// Scope applying a transform to the context until dropped.
pub struct TransformScope<'a, S: Surface> {
    ctx: &'a mut Context<S>,
    transform: Transform,
}

impl<'a, S: Surface> TransformScope<'a, S> {
    fn enter(ctx: &'a mut Context<S>, transform: Transform) -> Self {
        // rollback-tagged steps were applied when they were created
        if let ScopeExit::Invert = transform.exit() {
            ctx.transform.prepend(&transform);
        }
        log::debug!("transform scope entered: {}", transform);
        Self { ctx, transform }
    }
}

impl<S: Surface> Deref for TransformScope<'_, S> {
    type Target = Context<S>;

    fn deref(&self) -> &Context<S> {
        &*self.ctx
    }
}

impl<S: Surface> DerefMut for TransformScope<'_, S> {
    fn deref_mut(&mut self) -> &mut Context<S> {
        &mut *self.ctx
    }
}

impl<S: Surface> Drop for TransformScope<'_, S> {
    fn drop(&mut self) {
        match self.transform.exit() {
            ScopeExit::Invert => {
                let inverse = self.transform.inverse();
                self.ctx.transform.prepend(&inverse);
            }
            ScopeExit::Restore(snapshot) => self.ctx.apply_snapshot(snapshot),
        }
        log::debug!("transform scope exited");
    }
}

/// Scope authoring a path. Dereferences to the path being built.
pub struct PathScope<'a, S: Surface> {
    ctx: &'a mut Context<S>,
    path: &'a mut Bezier,
}

impl<S: Surface> PathScope<'_, S> {
    /// The owning context.
    pub fn context(&mut self) -> &mut Context<S> {
        &mut *self.ctx
    }
}

impl<S: Surface> Deref for PathScope<'_, S> {
    type Target = Bezier;

    fn deref(&self) -> &Bezier {
        &*self.path
    }
}

impl<S: Surface> DerefMut for PathScope<'_, S> {
    fn deref_mut(&mut self) -> &mut Bezier {
        &mut *self.path
    }
}

impl<S: Surface> Drop for PathScope<'_, S> {
    fn drop(&mut self) {
        self.ctx.complete(&mut *self.path);
        self.ctx.path_open = false;
        self.ctx.restore();
        log::debug!("path scope closed ({} elements)", self.path.len());
    }
}

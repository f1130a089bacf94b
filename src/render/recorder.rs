use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RenderError;
use crate::latex::{top_level_parts, validate_markup};
use crate::render::traits::{Plotter, RenderResult, Renderer};
use crate::render::types::{Animation, AxesSpec, ObjectId, PlotFunction, TextStyle};

/// An object created during recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    Text { content: String, style: TextStyle },
    Math { latex: String, style: TextStyle, parts: usize },
    Axes { spec: AxesSpec },
    AxisLabels { axes: ObjectId, x: String, y: String },
    Curve { axes: ObjectId, function: PlotFunction, x_range: (f64, f64) },
}

/// A timed operation on the recorded timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedOp {
    pub start: f64,
    pub end: f64,
    #[serde(flatten)]
    pub op: Op,
}

impl TimedOp {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Play { animations: Vec<Animation> },
    Wait,
}

/// Everything a [`PlanRecorder`] captured
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedTimeline {
    pub objects: Vec<DisplayObject>,
    pub ops: Vec<TimedOp>,
    pub duration: f64,
}

/// In-process backend that records every timed operation instead of drawing.
///
/// Math markup is checked with [`validate_markup`] so malformed input fails
/// the same way a real typesetter would.
#[derive(Debug, Default)]
pub struct PlanRecorder {
    clock: f64,
    objects: Vec<DisplayObject>,
    ops: Vec<TimedOp>,
    reject_malformed_math: bool,
}

impl PlanRecorder {
    pub fn new() -> Self {
        Self {
            reject_malformed_math: true,
            ..Self::default()
        }
    }

    /// Accept any math markup without validation
    pub fn lenient() -> Self {
        Self::default()
    }

    pub fn with_math_validation(mut self, enabled: bool) -> Self {
        self.reject_malformed_math = enabled;
        self
    }

    /// Seconds recorded so far
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn objects(&self) -> &[DisplayObject] {
        &self.objects
    }

    pub fn ops(&self) -> &[TimedOp] {
        &self.ops
    }

    pub fn object(&self, id: ObjectId) -> Option<&DisplayObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn finish(self) -> RecordedTimeline {
        RecordedTimeline {
            objects: self.objects,
            ops: self.ops,
            duration: self.clock,
        }
    }

    fn create(&mut self, kind: ObjectKind) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(DisplayObject { id, kind });
        id
    }

    fn require(&self, id: ObjectId) -> RenderResult<&DisplayObject> {
        self.object(id).ok_or(RenderError::UnknownObject { id: id.0 })
    }

    fn push(&mut self, op: Op, seconds: f64) {
        let start = self.clock;
        self.clock += seconds;
        self.ops.push(TimedOp { start, end: self.clock, op });
    }
}

impl Renderer for PlanRecorder {
    fn name(&self) -> &str {
        "plan-recorder"
    }

    fn text(&mut self, content: &str, style: &TextStyle) -> RenderResult<ObjectId> {
        Ok(self.create(ObjectKind::Text {
            content: content.to_string(),
            style: style.clone(),
        }))
    }

    fn math(&mut self, latex: &str, style: &TextStyle) -> RenderResult<ObjectId> {
        if self.reject_malformed_math {
            validate_markup(latex)?;
        }
        let parts = top_level_parts(latex).len();
        Ok(self.create(ObjectKind::Math {
            latex: latex.to_string(),
            style: style.clone(),
            parts,
        }))
    }

    fn part_count(&self, id: ObjectId) -> usize {
        match self.object(id).map(|o| &o.kind) {
            Some(ObjectKind::Math { parts, .. }) => *parts,
            _ => 1,
        }
    }

    fn play(&mut self, animations: &[Animation], run_time: f64) {
        let run_time = run_time.max(0.0);
        debug!("play {} animation(s) for {:.2}s at {:.2}s", animations.len(), run_time, self.clock);
        self.push(Op::Play { animations: animations.to_vec() }, run_time);
    }

    fn wait(&mut self, seconds: f64) {
        if seconds <= 0.0 {
            return;
        }
        self.push(Op::Wait, seconds);
    }
}

impl Plotter for PlanRecorder {
    fn axes(&mut self, spec: &AxesSpec) -> RenderResult<ObjectId> {
        if spec.x_range.0 >= spec.x_range.1 || spec.y_range.0 >= spec.y_range.1 {
            return Err(RenderError::PlotFailed {
                reason: "empty axis range".to_string(),
            });
        }
        Ok(self.create(ObjectKind::Axes { spec: spec.clone() }))
    }

    fn axis_labels(&mut self, axes: ObjectId, x_label: &str, y_label: &str) -> RenderResult<ObjectId> {
        self.require(axes)?;
        Ok(self.create(ObjectKind::AxisLabels {
            axes,
            x: x_label.to_string(),
            y: y_label.to_string(),
        }))
    }

    fn plot(
        &mut self,
        axes: ObjectId,
        function: PlotFunction,
        x_range: (f64, f64),
    ) -> RenderResult<ObjectId> {
        let spec = match &self.require(axes)?.kind {
            ObjectKind::Axes { spec } => spec.clone(),
            _ => {
                return Err(RenderError::PlotFailed {
                    reason: format!("object {} is not a coordinate system", axes.0),
                })
            }
        };
        if x_range.0 < spec.x_range.0 || x_range.1 > spec.x_range.1 {
            return Err(RenderError::PlotFailed {
                reason: format!("domain {:?} outside axes {:?}", x_range, spec.x_range),
            });
        }
        Ok(self.create(ObjectKind::Curve { axes, function, x_range }))
    }
}

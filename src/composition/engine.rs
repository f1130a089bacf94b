use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::Config,
    error::{Result, ScriptError},
    mux::AudioMuxer,
    render::{DisplayObject, PlanRecorder, Renderer, TimedOp},
    scene::{SectionScheduler, VisualElementDispatcher},
    script::Script,
};

/// Everything an animation engine needs to play a lesson back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayPlan {
    pub title: String,
    pub backend: String,
    /// Length the script asked for (seconds)
    pub target_duration: f64,
    /// Sum of declared node durations, title included
    pub nominal_duration: f64,
    /// Length of the recorded timeline, final pad included
    pub scheduled_duration: f64,
    pub final_pad: f64,
    pub elements: usize,
    pub fallbacks: usize,
    pub objects: Vec<DisplayObject>,
    pub ops: Vec<TimedOp>,
}

/// Main engine that turns a lesson script into a display plan
///
/// The engine follows a clear pipeline:
/// 1. Script Loading - Read the JSON script and resolve its form and defaults
/// 2. Scheduling - Walk the node sequence and record every timed operation
/// 3. Output - Write the display plan as JSON
///
/// Muxing a narration track onto the rendered video is a separate step, see
/// [`mux`](Self::mux).
pub struct CompositionEngine {
    config: Config,
    scheduler: SectionScheduler,
    muxer: AudioMuxer,
}

impl CompositionEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            scheduler: SectionScheduler::new(&config),
            muxer: AudioMuxer::new(config.mux.clone()),
            config,
        }
    }

    /// Use a dispatcher with custom element strategies
    pub fn with_dispatcher(mut self, dispatcher: VisualElementDispatcher) -> Self {
        self.scheduler = self.scheduler.with_dispatcher(dispatcher);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Main composition method - load, schedule, write
    ///
    /// # Arguments
    ///
    /// * `script_path` - Path to the JSON lesson script
    /// * `output_path` - Path for the display plan JSON
    pub async fn compose<P: AsRef<Path>>(&self, script_path: P, output_path: P) -> Result<DisplayPlan> {
        let script_path = script_path.as_ref();
        let output_path = output_path.as_ref();

        info!("Starting mathreel composition");
        info!("   Script: {:?}", script_path);
        info!("   Output: {:?}", output_path);

        // Pipeline Step 1: Script Loading
        let script = self.load_script(script_path).await?;

        // Pipeline Step 2: Scheduling
        let plan = self.plan(&script);

        // Pipeline Step 3: Output
        self.write_plan(&plan, output_path).await?;

        info!("Composition complete! Plan saved to: {:?}", output_path);
        Ok(plan)
    }

    pub async fn load_script<P: AsRef<Path>>(&self, path: P) -> Result<Script> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|_| ScriptError::ReadFailed { path: path.display().to_string() })?;

        let script = Script::from_json_str(&json, &self.config.defaults)?;
        info!(
            "Loaded '{}': {} element(s), target {:.1}s",
            script.title,
            script.element_count(),
            script.total_duration
        );
        Ok(script)
    }

    /// Schedule `script` on a fresh [`PlanRecorder`]
    pub fn plan(&self, script: &Script) -> DisplayPlan {
        let mut recorder =
            PlanRecorder::new().with_math_validation(self.config.recorder.reject_malformed_math);
        let report = self.scheduler.run(script, &mut recorder);
        let backend = recorder.name().to_string();
        let timeline = recorder.finish();

        debug!(
            "Recorded {} object(s) and {} operation(s)",
            timeline.objects.len(),
            timeline.ops.len()
        );

        DisplayPlan {
            title: script.display_title(),
            backend,
            target_duration: script.total_duration,
            nominal_duration: report.nominal_duration,
            scheduled_duration: timeline.duration,
            final_pad: report.final_pad,
            elements: report.elements,
            fallbacks: report.fallbacks,
            objects: timeline.objects,
            ops: timeline.ops,
        }
    }

    async fn write_plan(&self, plan: &DisplayPlan, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(plan)?;
        tokio::fs::write(output_path, json).await?;
        Ok(())
    }

    /// Lay `audio` under a rendered `video`
    pub async fn mux<P: AsRef<Path>>(&self, video: P, audio: P, output: P) -> Result<()> {
        self.muxer.mux(video, audio, output).await
    }
}

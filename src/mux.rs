use std::path::Path;
use std::process::{Command, Stdio};

use tokio::task;
use tracing::{debug, info, warn};

use crate::config::MuxConfig;
use crate::error::{MuxError, Result};

/// Lays a narration track under a rendered video with an external ffmpeg
pub struct AudioMuxer {
    config: MuxConfig,
}

impl AudioMuxer {
    pub fn new(config: MuxConfig) -> Self {
        Self { config }
    }

    pub fn check_available(&self) -> bool {
        Command::new(&self.config.ffmpeg)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Arguments with explicit stream mapping: video from the first input,
    /// audio from the second
    pub fn primary_args(&self, video: &Path, audio: &Path, output: &Path) -> Vec<String> {
        self.args(video, audio, output, true)
    }

    /// Same as [`primary_args`](Self::primary_args) without `-map`
    pub fn simple_args(&self, video: &Path, audio: &Path, output: &Path) -> Vec<String> {
        self.args(video, audio, output, false)
    }

    fn args(&self, video: &Path, audio: &Path, output: &Path, mapped: bool) -> Vec<String> {
        let mut args = vec![
            "-i".to_string(),
            video.display().to_string(),
            "-i".to_string(),
            audio.display().to_string(),
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            self.config.audio_codec.clone(),
        ];
        if mapped {
            args.extend(["-map", "0:v:0", "-map", "1:a:0"].map(String::from));
        }
        args.extend(["-shortest", "-y"].map(String::from));
        args.push(output.display().to_string());
        args
    }

    /// Mux `audio` into `video`, writing `output`.
    ///
    /// If the mapped command fails it is retried once without stream mapping;
    /// a second failure is returned as [`MuxError::Failed`].
    pub async fn mux<P: AsRef<Path>>(&self, video: P, audio: P, output: P) -> Result<()> {
        let (video, audio, output) = (video.as_ref(), audio.as_ref(), output.as_ref());

        for input in [video, audio] {
            if !input.exists() {
                return Err(MuxError::InputMissing {
                    path: input.display().to_string(),
                }
                .into());
            }
        }

        if !self.check_available() {
            return Err(MuxError::FfmpegMissing {
                binary: self.config.ffmpeg.clone(),
            }
            .into());
        }

        info!("Muxing {:?} + {:?} -> {:?}", video, audio, output);

        if let Err(first) = self.run(self.primary_args(video, audio, output)).await {
            warn!("ffmpeg with stream mapping failed, retrying without: {}", first);
            self.run(self.simple_args(video, audio, output))
                .await
                .map_err(|reason| MuxError::Failed { reason })?;
        }

        info!("Audio and video combined: {:?}", output);
        Ok(())
    }

    async fn run(&self, args: Vec<String>) -> std::result::Result<(), String> {
        debug!("{} {}", self.config.ffmpeg, args.join(" "));

        let mut cmd = Command::new(&self.config.ffmpeg);
        cmd.args(&args);

        let output = task::spawn_blocking(move || cmd.output())
            .await
            .map_err(|e| format!("Failed to spawn ffmpeg: {}", e))?
            .map_err(|e| format!("ffmpeg execution failed: {}", e))?;

        if !output.status.success() {
            return Err(String::from_utf8_lossy(&output.stderr).trim().to_string());
        }
        Ok(())
    }
}

impl Default for AudioMuxer {
    fn default() -> Self {
        Self::new(MuxConfig::default())
    }
}

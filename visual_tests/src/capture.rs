use std::path::PathBuf;
use std::time::{Duration, Instant};

use bubble_button::prelude::*;
use image::RgbaImage;

use crate::Result;

/// Frame interval used while waiting inside a scenario
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// One step of a scripted interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Press { x: f32, y: f32 },
    Release { x: f32, y: f32 },
    /// Keep producing frames for this many milliseconds
    Wait(u64),
}

/// A scripted interaction to capture
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub name: String,
    pub steps: Vec<Step>,
    pub width: u32,
    pub height: u32,
    /// Where the final frame is written, if anywhere
    pub output_path: Option<PathBuf>,
}

impl CaptureConfig {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            steps,
            width: 400,
            height: 200,
            output_path: None,
        }
    }
}

/// Play a scenario against a fresh button and return its last frame.
pub fn capture_scenario(config: &CaptureConfig) -> Result<RgbaImage> {
    let app = App::new().width(config.width).height(config.height);
    let mut button = BubbleButton::new();

    let start = Instant::now();
    let mut now = start;
    // Mount frame: first layout and paint
    app.frame(&mut button, now)?;

    for step in &config.steps {
        match *step {
            Step::Press { x, y } => {
                button.event_at(&Event::PressIn { x, y }, now);
            }
            Step::Release { x, y } => {
                button.event_at(&Event::PressOut { x, y }, now);
            }
            Step::Wait(millis) => {
                let until = now + Duration::from_millis(millis);
                while now < until {
                    now = (now + FRAME_INTERVAL).min(until);
                    app.frame(&mut button, now)?;
                }
            }
        }
    }

    // Reflect any trailing input in the captured frame
    let frame = app.frame(&mut button, now)?;
    log::debug!(
        "Captured '{}' after {:?}, animating: {}",
        config.name,
        now - start,
        frame.animating
    );

    let image = frame.to_image();
    if let Some(ref path) = config.output_path {
        image.save(path)?;
    }
    Ok(image)
}

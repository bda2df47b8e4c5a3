//! Application state management.

use anyhow::Result;
use chrono::Utc;
use fastrand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::display::{ClockFace, RowMirror, RowRole};
use crate::hardware;
use crate::settings::ClockSettings;
use crate::sound::{cues, SoundBoard};

/// Top speed of the travel ramp, in mph.
const TRAVEL_SPEED: u16 = 88;

/// Shared application state.
pub struct AppState {
    /// Configuration
    config: Config,

    /// Clock settings, read before every render
    settings: RwLock<ClockSettings>,

    /// The three rows; the lock serializes whole-row renders against
    /// brightness changes
    face: Mutex<ClockFace>,

    /// Observers of the virtual backend
    mirrors: Option<[RowMirror; 3]>,

    /// Sound catalog and player
    sounds: SoundBoard,

    /// Randomness for animation frames
    rng: Mutex<Rng>,

    /// Set while the time-travel sequence owns the displays
    traveling: AtomicBool,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: Config) -> Result<Self> {
        let hardware = hardware::build(&config.display)?;
        let mut face = hardware.face;

        let settings = config.clock.clone();
        face.apply_settings(&settings);
        face.blank_all();
        info!("Display brightness: {}", settings.brightness());

        let sounds = SoundBoard::new(&config.sound);
        info!(
            "Sound catalog: {} cue(s) from {}",
            sounds.cue_count(),
            config.sound.directory
        );

        Ok(Self {
            settings: RwLock::new(settings),
            face: Mutex::new(face),
            mirrors: hardware.mirrors,
            sounds,
            rng: Mutex::new(Rng::new()),
            traveling: AtomicBool::new(false),
            config,
        })
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a copy of the current clock settings.
    pub fn settings(&self) -> ClockSettings {
        self.settings.read().unwrap().clone()
    }

    /// Normal-time render interval.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.config.refresh.max(1))
    }

    /// Returns true while the time-travel sequence is running.
    pub fn is_traveling(&self) -> bool {
        self.traveling.load(Ordering::SeqCst)
    }

    /// Runs the startup sound self-check and sets the player volume.
    pub async fn init_sound(&self) {
        let missing = self.sounds.verify(&self.config.sound.expected);
        if !missing.is_empty() {
            debug!("Missing cues: {:?}", missing);
        }
        let volume = self.settings.read().unwrap().notification_volume;
        self.sounds.set_volume(volume).await;
    }

    /// Rescans the sound directory.
    pub fn rebuild_sounds(&self) {
        self.sounds.rebuild();
        info!("Sound catalog rebuilt: {} cue(s)", self.sounds.cue_count());
    }

    /// Plays a cue by name.
    pub fn play(&self, name: &str) {
        self.sounds.play(name);
    }

    /// Shows the normal time on all three rows. Skipped while traveling.
    pub fn render_frame(&self) {
        if self.is_traveling() {
            return;
        }

        let settings = self.settings.read().unwrap();
        let destination = settings.destination.snapshot();
        let present = settings.present_time(Utc::now());
        let last_departed = settings.last_departed.snapshot();

        {
            let mut face = self.face.lock().unwrap();
            // The sequence may have started while this frame was waiting for the face.
            if self.is_traveling() {
                return;
            }
            face.show_normal_time(RowRole::Destination, &destination, &settings);
            face.show_normal_time(RowRole::Present, &present, &settings);
            face.show_normal_time(RowRole::LastDeparted, &last_departed, &settings);
        }

        self.log_mirrors();
    }

    /// Sets the brightness of every row and stores it in the settings.
    pub fn set_brightness(&self, level: u8) -> u8 {
        let mut settings = self.settings.write().unwrap();
        self.face
            .lock()
            .unwrap()
            .set_global_brightness(&mut settings, level)
    }

    /// Blanks every display.
    pub fn blank(&self) {
        self.face.lock().unwrap().blank_all();
    }

    /// Blanks every display and silences the player.
    pub async fn shutdown(&self) {
        self.blank();
        self.sounds.stop().await;
    }

    /// Runs the time-travel sequence: speed ramp to 88, flicker, arrival.
    ///
    /// The present time at departure becomes the new Last Time Departed.
    /// Returns immediately if a sequence is already running.
    pub async fn time_travel(&self) {
        {
            let _face = self.face.lock().unwrap();
            if self.traveling.swap(true, Ordering::SeqCst) {
                debug!("Time travel already in progress");
                return;
            }
        }

        let travel = &self.config.travel;
        let (sound, unit) = {
            let mut settings = self.settings.write().unwrap();
            let departed = settings.present_time(Utc::now());
            settings.last_departed = departed.into();
            (settings.time_travel_sound, settings.speed_unit)
        };
        let cue = |name: &str| {
            if sound {
                self.sounds.play(name);
            }
        };

        info!("Time travel sequence started");
        cue(cues::TIME_TRAVEL);

        let ramp_step = Duration::from_millis(travel.ramp_step);
        for mph in 0..=TRAVEL_SPEED {
            self.face.lock().unwrap().show_speed(mph as f32, unit);
            tokio::time::sleep(ramp_step).await;
        }

        cue(cues::WARP_WHOOSH);

        let frame_interval = travel.frame_interval.max(1);
        let frames = travel.animation_duration / frame_interval;
        for _ in 0..frames {
            {
                let mut face = self.face.lock().unwrap();
                let mut rng = self.rng.lock().unwrap();
                for role in RowRole::ALL {
                    face.show_animation_frame(role, &mut rng);
                }
            }
            self.log_mirrors();
            tokio::time::sleep(Duration::from_millis(frame_interval)).await;
        }

        cue(cues::ARRIVAL_THUD);
        self.traveling.store(false, Ordering::SeqCst);
        self.render_frame();
        info!("Time travel sequence complete");
    }

    fn log_mirrors(&self) {
        if let Some(mirrors) = &self.mirrors {
            for (role, mirror) in RowRole::ALL.iter().zip(mirrors) {
                debug!("{:>13}: {}", role.to_string(), mirror.summary());
            }
        }
    }

    #[cfg(test)]
    fn mirrors(&self) -> &[RowMirror; 3] {
        self.mirrors.as_ref().unwrap()
    }
}

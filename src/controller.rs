//! Top level control loop.
//!
//! [`Gauntlet`] owns the sensor, the LED sink and every piece of pipeline
//! state. The driver loop calls [`Gauntlet::tick`] with the current time and
//! sleeps for the returned duration.

use embassy_time::Instant;

use crate::classifier::{
    CalibrationError, ClassifierConfig, Pose, PoseReading, PoseThreshold, PositionClassifier,
};
use crate::control::{CONTROL_QUEUE_LEN, Control, ControlChannel, ControlQueue};
use crate::diagnostics::{DiagnosticEvent, DiagnosticSink, NoopDiagnostics};
use crate::gesture::{GestureConfig, PoseHistory};
use crate::mode::{
    FreecastMode, FreecastTimings, IdleMode, ModeId, ModeSlot, QuickCastMode, TickContext,
    Transition,
};
use crate::render::{DEFAULT_BRIGHTNESS, Frame};
use crate::sample::PhysicalSample;
use crate::scheduler::{Interval, SchedulerConfig, TickResult, tick_result};
use crate::storage::{StoreError, ThresholdStore};
use crate::{LedSink, SensorError, SensorSource};

/// LEDs on the reference gauntlet ring
pub const DEFAULT_LED_COUNT: usize = 12;

/// Configuration of the whole pipeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GauntletConfig {
    pub classifier: ClassifierConfig,
    pub gestures: GestureConfig,
    pub freecast: FreecastTimings,
    pub scheduler: SchedulerConfig,
    /// Default global brightness
    pub brightness: u8,
    /// Fade idle indicator colours
    pub interpolation: bool,
}

impl GauntletConfig {
    pub const DEFAULT: Self = Self {
        classifier: ClassifierConfig::DEFAULT,
        gestures: GestureConfig::DEFAULT,
        freecast: FreecastTimings::DEFAULT,
        scheduler: SchedulerConfig::DEFAULT,
        brightness: DEFAULT_BRIGHTNESS,
        interpolation: true,
    };
}

impl Default for GauntletConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Failed sensor reads
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SensorFailures {
    /// Since the last successful read
    pub consecutive: u32,
    pub total: u32,
    pub last_error: Option<SensorError>,
}

pub struct Gauntlet<S, L, D = NoopDiagnostics, const LEDS: usize = DEFAULT_LED_COUNT>
where
    S: SensorSource,
    L: LedSink,
    D: DiagnosticSink,
{
    sensor: S,
    leds: L,
    diagnostics: D,
    gestures: GestureConfig,
    freecast: FreecastTimings,
    interpolation: bool,
    classifier: PositionClassifier,
    history: PoseHistory,
    reading: PoseReading,
    mode: ModeSlot,
    frame: Frame<LEDS>,
    controls: ControlQueue<CONTROL_QUEUE_LEN>,
    sensor_interval: Interval,
    render_interval: Interval,
    failures: SensorFailures,
}

impl<S, L, D, const LEDS: usize> Gauntlet<S, L, D, LEDS>
where
    S: SensorSource,
    L: LedSink,
    D: DiagnosticSink,
{
    /// Build the pipeline, starting in idle with default thresholds
    pub fn new(sensor: S, leds: L, diagnostics: D, config: &GauntletConfig, now: Instant) -> Self {
        Self {
            sensor,
            leds,
            diagnostics,
            gestures: config.gestures,
            freecast: config.freecast,
            interpolation: config.interpolation,
            classifier: PositionClassifier::new(config.classifier),
            history: PoseHistory::new(),
            reading: PoseReading::unknown(now),
            mode: ModeSlot::Idle(IdleMode::new(&config.gestures, config.interpolation, now)),
            frame: Frame::new(config.brightness),
            controls: ControlQueue::new(),
            sensor_interval: Interval::new(config.scheduler.sensor_period),
            render_interval: Interval::new(config.scheduler.render_period),
            failures: SensorFailures::default(),
        }
    }

    /// Run one scheduler step.
    ///
    /// Order: queued controls, sensor sample (if due), mode update, transition,
    /// render and present (if due).
    pub fn tick(&mut self, now: Instant) -> TickResult {
        self.process_controls(now);

        let sampled = self.sensor_interval.poll(now);
        let sample = if sampled { self.sample_sensor() } else { None };

        let ctx = TickContext {
            now,
            reading: self.reading,
            sample,
        };
        let transition = self
            .mode
            .update(&ctx, &mut self.frame, &mut self.diagnostics);
        self.apply_transition(transition, now);

        let rendered = self.render_interval.poll(now);
        if rendered {
            self.mode.render(now, &mut self.frame);
            self.frame.present(&mut self.leds);
        }

        tick_result(
            now,
            &self.sensor_interval,
            &self.render_interval,
            sampled,
            rendered,
        )
    }

    /// Queue a control for the next tick
    ///
    /// Returns the control if the queue is full
    pub fn push_control(&mut self, control: Control) -> Result<(), Control> {
        self.controls.push(control).inspect_err(|_| {
            self.diagnostics.record(DiagnosticEvent::ControlRejected);
        })
    }

    /// Move controls sent from other tasks into the tick queue.
    ///
    /// Stops when the queue is full; the rest stay in the channel for the next
    /// call. Returns how many controls were moved.
    pub fn receive_controls<const M: usize>(&mut self, channel: &ControlChannel<M>) -> usize {
        let mut moved = 0;
        while self.controls.len() < CONTROL_QUEUE_LEN {
            let Some(control) = channel.receive() else {
                break;
            };
            if let Err(control) = self.controls.push(control) {
                let _ = channel.send(control);
                break;
            }
            moved += 1;
        }
        moved
    }

    /// Calibrate one pose from the owned sensor
    pub fn calibrate(
        &mut self,
        pose: Pose,
        samples: usize,
    ) -> Result<PoseThreshold, CalibrationError> {
        let result = self.classifier.calibrate(pose, &mut self.sensor, samples);
        self.record_calibration(pose, result);
        result
    }

    /// Calibrate all poses, calling `prompt` before each
    pub fn calibrate_all<F: FnMut(Pose)>(
        &mut self,
        samples: usize,
        mut prompt: F,
    ) -> Result<(), (Pose, CalibrationError)> {
        for pose in Pose::NAMED {
            prompt(pose);
            self.calibrate(pose, samples).map_err(|err| (pose, err))?;
        }
        Ok(())
    }

    /// Re-zero the sensor offsets
    pub fn calibrate_zero_offsets(&mut self) -> Result<(), SensorError> {
        self.sensor.calibrate_zero_offsets()
    }

    /// Apply stored thresholds, falling back to defaults
    pub fn load_thresholds<T: ThresholdStore>(&mut self, store: &mut T) -> bool {
        let from_store = self.classifier.load_thresholds(store);
        self.diagnostics
            .record(DiagnosticEvent::ThresholdsLoaded { from_store });
        from_store
    }

    pub fn save_thresholds<T: ThresholdStore>(&mut self, store: &mut T) -> Result<(), StoreError> {
        let result = self.classifier.save_thresholds(store);
        self.diagnostics
            .record(DiagnosticEvent::ThresholdsSaved(result));
        result
    }

    pub const fn mode(&self) -> &ModeSlot {
        &self.mode
    }

    pub const fn mode_id(&self) -> ModeId {
        self.mode.id()
    }

    /// Latest pose reading, retained across failed reads
    pub const fn reading(&self) -> PoseReading {
        self.reading
    }

    pub const fn history(&self) -> &PoseHistory {
        &self.history
    }

    pub const fn classifier(&self) -> &PositionClassifier {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut PositionClassifier {
        &mut self.classifier
    }

    pub const fn frame(&self) -> &Frame<LEDS> {
        &self.frame
    }

    pub const fn failures(&self) -> SensorFailures {
        self.failures
    }

    pub fn pending_controls(&self) -> usize {
        self.controls.len()
    }

    pub const fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub const fn leds(&self) -> &L {
        &self.leds
    }

    pub const fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Read and classify one sample. On failure the previous reading stays.
    fn sample_sensor(&mut self) -> Option<PhysicalSample> {
        match self.sensor.read_sample() {
            Ok(raw) => {
                self.failures.consecutive = 0;
                let reading = self.classifier.classify(raw);
                if reading.pose != self.reading.pose {
                    self.diagnostics.record(DiagnosticEvent::PoseChanged {
                        from: self.reading.pose,
                        to: reading.pose,
                        confidence: reading.confidence,
                    });
                }
                self.reading = reading;
                self.history.push(reading);
                Some(self.classifier.last_physical())
            }
            Err(err) => {
                self.failures.consecutive = self.failures.consecutive.saturating_add(1);
                self.failures.total = self.failures.total.saturating_add(1);
                self.failures.last_error = Some(err);
                self.diagnostics.record(DiagnosticEvent::SensorReadFailed {
                    consecutive: self.failures.consecutive,
                });
                None
            }
        }
    }

    fn process_controls(&mut self, now: Instant) {
        while let Some(control) = self.controls.pop() {
            self.apply_control(control, now);
        }
    }

    fn apply_control(&mut self, control: Control, now: Instant) {
        match control {
            Control::SetInterpolation(enabled) => {
                self.interpolation = enabled;
                if let ModeSlot::Idle(idle) = &mut self.mode {
                    idle.set_interpolation(enabled);
                }
            }
            Control::SetScalePreset(preset) => self.classifier.set_scale_preset(preset),
            Control::SetThreshold(pose, threshold) => {
                // Rejected values keep the current threshold
                if let Err(error) = self.classifier.set_threshold(pose, threshold) {
                    self.diagnostics
                        .record(DiagnosticEvent::ThresholdRejected { pose, error });
                }
            }
            Control::SetBrightness(brightness) => {
                self.frame.set_default_brightness(brightness);
            }
            Control::Abort => self.abort(now),
        }
    }

    fn abort(&mut self, now: Instant) {
        match &mut self.mode {
            ModeSlot::Idle(_) => {}
            ModeSlot::QuickCast(spell) => {
                spell.abort(&mut self.frame);
                self.apply_transition(Transition::ToIdle, now);
            }
            ModeSlot::Freecast(_) => self.apply_transition(Transition::ToIdle, now),
        }
    }

    fn apply_transition(&mut self, transition: Transition, now: Instant) {
        self.mode = match transition {
            Transition::None => return,
            Transition::ToIdle => {
                ModeSlot::Idle(IdleMode::new(&self.gestures, self.interpolation, now))
            }
            Transition::ToFreecast => ModeSlot::Freecast(FreecastMode::new(
                &self.gestures.exit_freecast,
                self.freecast,
                now,
            )),
            Transition::ToQuickCast(spell) => ModeSlot::QuickCast(QuickCastMode::new(spell, now)),
        };
        self.frame.clear();
        self.diagnostics
            .record(DiagnosticEvent::ModeEntered(self.mode.id()));
    }

    fn record_calibration(&mut self, pose: Pose, result: Result<PoseThreshold, CalibrationError>) {
        let event = match result {
            Ok(threshold) => DiagnosticEvent::Calibrated {
                pose,
                axis: threshold.axis,
                threshold: threshold.threshold,
            },
            Err(error) => DiagnosticEvent::CalibrationFailed { pose, error },
        };
        self.diagnostics.record(event);
    }
}

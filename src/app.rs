use color_eyre::eyre::Result;
use strum::Display;
use tokio::time::{sleep, Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, trace};

use crate::{
    components::scene::{compose, farewell},
    config::{AnimationSettings, Timing},
    constants::scene::{FAREWELL_HOLD, TEARDOWN_FAREWELL},
    sink::PresentationSink,
    tree::{
        seeded_rng,
        sequence::{build_order, teardown_order},
        TreeLayout,
    },
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    #[default]
    Starting,
    Building,
    Steady,
    TearingDown,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Interrupted,
}

#[derive(Debug)]
pub struct AnimationState {
    pub frame: u64,
    pub phase: Phase,
    pub started: Instant,
}

/// Drives one run: build, twinkle, tear down, pushing every frame to the sink.
pub struct App<S: PresentationSink> {
    settings: AnimationSettings,
    timing: Timing,
    layout: TreeLayout,
    sink: S,
    interrupt: CancellationToken,
    state: AnimationState,
}

impl<S: PresentationSink> App<S> {
    pub fn new(settings: AnimationSettings, sink: S, interrupt: CancellationToken) -> Result<Self> {
        let timing = settings.validate()?;
        let mut layout = TreeLayout::build(&settings.shape(), &mut seeded_rng(settings.seed))?;
        layout.set_all_visible(!settings.build);

        Ok(Self {
            settings,
            timing,
            layout,
            sink,
            interrupt,
            state: AnimationState { frame: 0, phase: Phase::default(), started: Instant::now() },
        })
    }

    pub async fn run(&mut self) -> Result<Outcome> {
        self.state.started = Instant::now();
        info!("Starting {} tree with {} cells", self.settings.mode, self.layout.cells().len());
        self.show()?;

        if self.settings.build {
            self.enter(Phase::Building);
            let order = build_order(&self.layout, self.settings.build_mode, &mut seeded_rng(self.settings.seed));
            for id in order {
                self.layout.set_visible(id, true);
                self.show()?;
                if !self.hold(self.timing.build_speed).await {
                    return Ok(Outcome::Interrupted);
                }
            }
        }

        self.enter(Phase::Steady);
        let twinkle = !self.settings.build || self.settings.auto_twinkle;
        let mut counter = 0;
        while self.state.started.elapsed() < self.timing.duration {
            self.state.frame = if twinkle { counter } else { 0 };
            self.show()?;
            counter += 1;
            if !self.hold(self.timing.speed).await {
                return Ok(Outcome::Interrupted);
            }
        }

        if self.settings.teardown {
            self.enter(Phase::TearingDown);
            self.state.frame = 0;
            let order =
                teardown_order(&self.layout, self.settings.teardown_mode, &mut seeded_rng(self.settings.seed));
            for id in order {
                self.layout.set_visible(id, false);
                self.show()?;
                if !self.hold(self.timing.teardown_speed).await {
                    return Ok(Outcome::Interrupted);
                }
            }
            self.sink.present(&farewell(TEARDOWN_FAREWELL, self.layout.max_width()))?;
            if !self.hold(FAREWELL_HOLD).await {
                return Ok(Outcome::Interrupted);
            }
        }

        self.enter(Phase::Done);
        Ok(Outcome::Completed)
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn enter(&mut self, phase: Phase) {
        info!("{} -> {phase} after {:?}", self.state.phase, self.state.started.elapsed());
        self.state.phase = phase;
    }

    fn show(&mut self) -> Result<()> {
        trace!(frame = self.state.frame, visible = self.layout.visible_count(), "present");
        self.sink.present(&compose(&self.layout, self.state.frame))
    }

    /// Waits out one frame. Returns `false` if the run was interrupted meanwhile.
    async fn hold(&self, period: Duration) -> bool {
        tokio::select! {
            biased;
            _ = self.interrupt.cancelled() => false,
            _ = sleep(period) => true,
        }
    }
}

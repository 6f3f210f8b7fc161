use std::cell::RefCell;
use std::rc::Rc;

use jam_lib::config::CleanConfig;
use jam_lib::{Context, Game, HostResult, MainLoop, Platform, Stage, Tick, bootstrap};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    InitWindow(u32, u32, String),
    InitAudioDevice,
    GameInit,
    SetMainLoop(MainLoop),
    Frame(u64),
}

type Log = Rc<RefCell<Vec<Call>>>;

struct Recorder {
    log: Log,
    fail_at: Option<Stage>,
    frames: u64,
}

impl Recorder {
    fn new(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
            fail_at: None,
            frames: 3,
        }
    }

    fn failing_at(log: &Log, stage: Stage) -> Self {
        Self {
            fail_at: Some(stage),
            ..Self::new(log)
        }
    }

    fn check(&self, stage: Stage) -> HostResult<()> {
        if self.fail_at == Some(stage) {
            return Err(format!("{} refused", stage).into());
        }
        Ok(())
    }
}

struct FakeDisplay {
    width: u32,
    height: u32,
}

impl Platform for Recorder {
    type Display = FakeDisplay;
    type Audio = ();

    async fn init_window(&mut self, width: u32, height: u32, title: &str) -> HostResult<FakeDisplay> {
        self.log
            .borrow_mut()
            .push(Call::InitWindow(width, height, title.to_string()));
        self.check(Stage::DisplayInit)?;
        Ok(FakeDisplay { width, height })
    }

    async fn init_audio_device(&mut self) -> HostResult<()> {
        self.log.borrow_mut().push(Call::InitAudioDevice);
        self.check(Stage::AudioInit)
    }

    fn set_main_loop<G>(self, mut ctx: Context<Self>, mut game: G, main_loop: MainLoop) -> HostResult<()>
    where
        G: Game<Self> + 'static,
    {
        self.log.borrow_mut().push(Call::SetMainLoop(main_loop));
        self.check(Stage::SchedulerRegister)?;
        for index in 0..self.frames {
            game.frame(&mut ctx, Tick { index, delta: 1.0 / 60.0 });
        }
        Ok(())
    }
}

struct Probe {
    log: Log,
    fail: bool,
}

impl Game<Recorder> for Probe {
    fn init(&mut self, ctx: &mut Context<Recorder>) -> HostResult<()> {
        assert_eq!((ctx.display.width, ctx.display.height), (1280, 720));
        self.log.borrow_mut().push(Call::GameInit);
        if self.fail {
            return Err("game state refused".into());
        }
        Ok(())
    }

    fn frame(&mut self, _ctx: &mut Context<Recorder>, tick: Tick) {
        self.log.borrow_mut().push(Call::Frame(tick.index));
    }
}

fn probe(log: &Log) -> Probe {
    Probe {
        log: Rc::clone(log),
        fail: false,
    }
}

fn setup_calls(log: &Log) -> Vec<Call> {
    log.borrow()
        .iter()
        .filter(|call| !matches!(call, Call::Frame(_)))
        .cloned()
        .collect()
}

#[test]
fn runs_each_step_once_in_order() {
    let log = Log::default();
    let config = CleanConfig::default();

    pollster::block_on(bootstrap(Recorder::new(&log), &config, probe(&log))).unwrap();

    assert_eq!(
        setup_calls(&log),
        vec![
            Call::InitWindow(1280, 720, "Jam".to_string()),
            Call::InitAudioDevice,
            Call::GameInit,
            Call::SetMainLoop(MainLoop {
                fps: 0,
                simulate_infinite_loop: true,
            }),
        ]
    );
}

#[test]
fn run_loop_drives_frames_after_registration() {
    let log = Log::default();
    let config = CleanConfig::default();

    pollster::block_on(bootstrap(Recorder::new(&log), &config, probe(&log))).unwrap();

    let calls = log.borrow();
    let registered = calls
        .iter()
        .position(|call| matches!(call, Call::SetMainLoop(_)))
        .unwrap();
    assert_eq!(
        &calls[registered + 1..],
        &[Call::Frame(0), Call::Frame(1), Call::Frame(2)]
    );
}

#[test]
fn fixed_rate_is_passed_to_the_run_loop() {
    let log = Log::default();
    let config = CleanConfig {
        fps: 30,
        ..CleanConfig::default()
    };

    pollster::block_on(bootstrap(Recorder::new(&log), &config, probe(&log))).unwrap();

    assert!(log.borrow().contains(&Call::SetMainLoop(MainLoop {
        fps: 30,
        simulate_infinite_loop: true,
    })));
}

#[test]
fn display_failure_stops_before_game_init() {
    let log = Log::default();
    let config = CleanConfig::default();

    let err = pollster::block_on(bootstrap(
        Recorder::failing_at(&log, Stage::DisplayInit),
        &config,
        probe(&log),
    ))
    .unwrap_err();

    assert_eq!(err.stage, Stage::DisplayInit);
    assert_eq!(
        *log.borrow(),
        vec![Call::InitWindow(1280, 720, "Jam".to_string())]
    );
}

#[test]
fn audio_failure_stops_before_game_init() {
    let log = Log::default();
    let config = CleanConfig::default();

    let err = pollster::block_on(bootstrap(
        Recorder::failing_at(&log, Stage::AudioInit),
        &config,
        probe(&log),
    ))
    .unwrap_err();

    assert_eq!(err.stage, Stage::AudioInit);
    assert_eq!(setup_calls(&log).last(), Some(&Call::InitAudioDevice));
    assert!(!log.borrow().contains(&Call::GameInit));
}

#[test]
fn game_init_failure_never_registers_run_loop() {
    let log = Log::default();
    let config = CleanConfig::default();
    let game = Probe {
        log: Rc::clone(&log),
        fail: true,
    };

    let err = pollster::block_on(bootstrap(Recorder::new(&log), &config, game)).unwrap_err();

    assert_eq!(err.stage, Stage::AppInit);
    assert_eq!(err.to_string(), "bootstrap failed during app init: game state refused");
    assert_eq!(setup_calls(&log).last(), Some(&Call::GameInit));
    assert!(log.borrow().iter().all(|call| !matches!(call, Call::SetMainLoop(_) | Call::Frame(_))));
}

#[test]
fn scheduler_failure_is_reported_and_runs_no_frames() {
    let log = Log::default();
    let config = CleanConfig::default();

    let err = pollster::block_on(bootstrap(
        Recorder::failing_at(&log, Stage::SchedulerRegister),
        &config,
        probe(&log),
    ))
    .unwrap_err();

    assert_eq!(err.stage, Stage::SchedulerRegister);
    assert_eq!(setup_calls(&log).len(), 4);
    assert!(log.borrow().iter().all(|call| !matches!(call, Call::Frame(_))));
}

use std::error::Error;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rodio::{OutputStream, OutputStreamHandle, Sink};
use winit::dpi::PhysicalSize;

use engine::app::{run_game, AppConfig, AppContext, GameApp, InputFrame};
use engine::graphics::Renderer2d;

use game::audio_director::AudioDirector;
use game::best_score::BestScoreStore;
use game::board_render;
use game::challenge::CHALLENGE_LIMIT;
use game::input::{map_key_to_event, InputEvent, SwipeTracker};
use game::session::GameSession;
use game::settings::{PlayerSettings, SettingsStore};
use game::sfx::{MERGE_SFX_VOLUME, MUSIC_VOLUME};

/// Looping procedural sleigh-ride arpeggio.
///
/// Synthesized on the fly instead of shipping a music asset; an attack and
/// release envelope on each note keeps the loop click-free.
#[derive(Debug, Clone)]
struct BgMusic {
    sample_rate: u32,
    channels: u16,
    frame: u64,
    chan: u16,
}

impl BgMusic {
    fn new() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 2,
            frame: 0,
            chan: 0,
        }
    }
}

impl Iterator for BgMusic {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        // "Jingle Bells" opening phrase; `None` entries are rests.
        const E5: f32 = 659.26;
        const G5: f32 = 784.0;
        const C5: f32 = 523.25;
        const D5: f32 = 587.33;
        const MELODY: [Option<f32>; 16] = [
            Some(E5),
            Some(E5),
            Some(E5),
            None,
            Some(E5),
            Some(E5),
            Some(E5),
            None,
            Some(E5),
            Some(G5),
            Some(C5),
            Some(D5),
            Some(E5),
            None,
            None,
            None,
        ];

        let note_len_frames: u64 = (self.sample_rate as u64) * 3 / 10; // 0.3s per step
        let note_i = ((self.frame / note_len_frames) % (MELODY.len() as u64)) as usize;
        let pos_in_note = self.frame % note_len_frames;

        let sample = match MELODY[note_i] {
            None => 0.0,
            Some(freq_hz) => {
                let t = pos_in_note as f32 / self.sample_rate as f32;
                let phase = 2.0 * std::f32::consts::PI * freq_hz * t;

                let attack_frames: u64 = (self.sample_rate as u64) * 12 / 1_000;
                let release_frames: u64 = (self.sample_rate as u64) * 40 / 1_000;
                let release_start = note_len_frames.saturating_sub(release_frames);
                let env = if pos_in_note < attack_frames {
                    pos_in_note as f32 / attack_frames.max(1) as f32
                } else if pos_in_note >= release_start {
                    let remaining = note_len_frames.saturating_sub(pos_in_note);
                    remaining as f32 / release_frames.max(1) as f32
                } else {
                    1.0
                };

                (phase.sin() + (phase * 2.0).sin() * 0.25) * 0.22 * env
            }
        };

        // Interleaved stereo.
        self.chan += 1;
        if self.chan >= self.channels {
            self.chan = 0;
            self.frame = self.frame.wrapping_add(1);
        }

        Some(sample)
    }
}

impl rodio::Source for BgMusic {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Short decaying sine ding played on each merge.
#[derive(Debug, Clone)]
struct MergeChime {
    sample_rate: u32,
    frame: u64,
    total_frames: u64,
}

impl MergeChime {
    fn new() -> Self {
        let sample_rate = 44_100;
        Self {
            sample_rate,
            frame: 0,
            total_frames: (sample_rate as u64) / 8, // 125ms
        }
    }
}

impl Iterator for MergeChime {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.total_frames {
            return None;
        }
        let t = self.frame as f32 / self.sample_rate as f32;
        let env = 1.0 - (self.frame as f32 / self.total_frames as f32);
        let sample = (2.0 * std::f32::consts::PI * 880.0 * t).sin() * 0.5 * env;
        self.frame += 1;
        Some(sample)
    }
}

impl rodio::Source for MergeChime {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_millis(125))
    }
}

struct Sfx {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music_sink: Option<Sink>,
}

impl Sfx {
    fn new(music_gain: f32) -> Result<Self, Box<dyn Error>> {
        let (stream, handle) = OutputStream::try_default()?;
        let music_sink = Sink::try_new(&handle).ok().map(|sink| {
            sink.set_volume(MUSIC_VOLUME * music_gain);
            sink.append(BgMusic::new());
            sink
        });
        Ok(Self {
            _stream: stream,
            handle,
            music_sink,
        })
    }

    fn play_merge(&self, volume: f32) {
        if volume <= 0.0 {
            return;
        }
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(volume);
        sink.append(MergeChime::new());
        sink.detach();
    }

    fn pause_music(&self) {
        if let Some(sink) = &self.music_sink {
            sink.pause();
        }
    }

    fn resume_music(&self) {
        if let Some(sink) = &self.music_sink {
            sink.play();
        }
    }
}

struct YuleApp {
    settings: PlayerSettings,
    best_store: BestScoreStore,
    persisted_best: u32,
    sfx: Option<Sfx>,
    swipe: SwipeTracker,
    audio: AudioDirector,
}

impl GameApp for YuleApp {
    type State = GameSession;

    fn init_state(&mut self, _ctx: &mut AppContext) -> GameSession {
        let best = self.best_store.load();
        self.persisted_best = best;
        GameSession::new(seed_from_clock(), CHALLENGE_LIMIT, best)
    }

    fn update(
        &mut self,
        session: &mut GameSession,
        input: &InputFrame,
        dt: Duration,
        _ctx: &mut AppContext,
    ) {
        let mut events: Vec<InputEvent> = input
            .keys_pressed
            .iter()
            .filter_map(|&key| map_key_to_event(key))
            .collect();

        if let Some((x, y)) = input.pointer_pos {
            if input.pointer_pressed {
                self.swipe.on_press(x, y);
            }
            if input.pointer_released {
                if let Some(dir) = self.swipe.on_release(x, y) {
                    events.push(InputEvent::Move(dir));
                }
            }
        }

        for event in events {
            match event {
                InputEvent::Move(dir) => {
                    let score_before = session.score();
                    let changed = session.handle_move(dir);
                    if changed && session.score() > score_before {
                        if let Some(sfx) = &self.sfx {
                            let gain = self.settings.audio.effective_sfx_gain();
                            sfx.play_merge(MERGE_SFX_VOLUME * gain);
                        }
                    }
                }
                InputEvent::NewGame => {
                    session.new_game();
                    self.audio.reset();
                    if let Some(sfx) = &self.sfx {
                        sfx.resume_music();
                    }
                }
            }
        }

        session.tick(dt);

        if self.audio.should_pause_music(session.is_game_over()) {
            if let Some(sfx) = &self.sfx {
                sfx.pause_music();
            }
        }

        if session.best() > self.persisted_best {
            if let Err(err) = self.best_store.save(session.best()) {
                eprintln!("warning: failed to save best score: {err}");
            }
            self.persisted_best = session.best();
        }
    }

    fn render(&mut self, session: &GameSession, gfx: &mut dyn Renderer2d) {
        board_render::draw_session(gfx, session, self.settings.gameplay.show_countdown);
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = SettingsStore::from_env().load();

    let sfx = match Sfx::new(settings.audio.effective_music_gain()) {
        Ok(sfx) => Some(sfx),
        Err(err) => {
            eprintln!("warning: audio unavailable, continuing without sound: {err}");
            None
        }
    };

    let side = board_render::board_side();
    let config = AppConfig {
        title: "Yule 2048 Challenge".to_string(),
        desired_size: PhysicalSize::new(side + 32, board_render::HUD_HEIGHT + side + 24),
        clamp_to_monitor: true,
        vsync: Some(true),
    };

    let app = YuleApp {
        settings,
        best_store: BestScoreStore::from_env(),
        persisted_best: 0,
        sfx,
        swipe: SwipeTracker::default(),
        audio: AudioDirector::default(),
    };

    run_game(config, app)
}

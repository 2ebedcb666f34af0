//! Background music: the `<audio id="bgm">` track, with a synthesized
//! "Happy Birthday" phrase when the file cannot play.

use crate::constants::{ID_BGM, ID_MUSIC};
use crate::dom;
use card_core::{
    envelope, track_missing, AutoplayStrategy, FallbackGate, FallbackReason, MusicConfig,
    BIRTHDAY_PHRASE,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("[music] {} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

// Schedule one pass of the phrase on `out`, starting now.
fn play_phrase(audio_ctx: &web::AudioContext, out: &web::GainNode) {
    let t0 = audio_ctx.current_time();
    for note in &BIRTHDAY_PHRASE {
        let env = envelope(note, t0);
        let Ok(osc) = web::OscillatorNode::new(audio_ctx) else {
            log::error!("[music] OscillatorNode unavailable");
            return;
        };
        osc.set_type(web::OscillatorType::Sine);
        osc.frequency().set_value(note.frequency_hz);
        let Ok(gain) = create_gain(audio_ctx, 0.0, "note") else {
            return;
        };
        let param = gain.gain();
        let _ = param.set_value_at_time(0.0, env.start);
        let _ = param.linear_ramp_to_value_at_time(env.peak_gain, env.peak_at);
        let _ = param.exponential_ramp_to_value_at_time(env.floor_gain, env.end);
        let _ = osc.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(out);
        let _ = osc.start_with_when(env.start);
        let _ = osc.stop_with_when(env.end);
    }
}

/// Looping fallback tune. One `AudioContext` per page; each run gets its own
/// output gain so stopping silences notes that were already scheduled.
struct Synth {
    ctx: web::AudioContext,
    out: Option<web::GainNode>,
    interval: Option<i32>,
    repeat: Option<Closure<dyn FnMut()>>,
    loop_ms: i32,
}

impl Synth {
    fn new(loop_ms: i32) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext: {:?}", e))?;
        Ok(Self {
            ctx,
            out: None,
            interval: None,
            repeat: None,
            loop_ms,
        })
    }

    fn start(&mut self) {
        self.stop();
        let _ = self.ctx.resume();
        let Ok(out) = create_gain(&self.ctx, 1.0, "synth out") else {
            return;
        };
        let _ = out.connect_with_audio_node(&self.ctx.destination());
        play_phrase(&self.ctx, &out);

        let ctx = self.ctx.clone();
        let repeat_out = out.clone();
        let closure = Closure::wrap(Box::new(move || play_phrase(&ctx, &repeat_out)) as Box<dyn FnMut()>);
        self.interval = web::window().and_then(|w| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                self.loop_ms,
            )
            .ok()
        });
        self.repeat = Some(closure);
        self.out = Some(out);
        log::info!("[music] fallback synth playing");
    }

    fn stop(&mut self) {
        if let Some(handle) = self.interval.take() {
            if let Some(w) = web::window() {
                w.clear_interval_with_handle(handle);
            }
        }
        self.repeat = None;
        if let Some(out) = self.out.take() {
            let _ = out.disconnect();
            log::info!("[music] fallback synth stopped");
        }
    }
}

#[derive(Default)]
struct MusicState {
    gate: FallbackGate,
    synth: Option<Synth>,
    playing: bool,
}

pub struct Music {
    bgm: Option<web::HtmlAudioElement>,
    button: Option<web::HtmlElement>,
    config: MusicConfig,
    state: RefCell<MusicState>,
}

impl Music {
    pub fn mount(document: &web::Document, config: MusicConfig, button_text: Option<&str>) -> Rc<Self> {
        let bgm: Option<web::HtmlAudioElement> = dom::element(document, ID_BGM);
        let button: Option<web::HtmlElement> = dom::element(document, ID_MUSIC);
        if let (Some(b), Some(text)) = (&button, button_text) {
            dom::set_text(b, text);
        }
        if let Some(a) = &bgm {
            a.set_loop(true);
            a.set_volume(config.volume);
        }
        let music = Rc::new(Self {
            bgm,
            button,
            config,
            state: RefCell::new(MusicState::default()),
        });
        {
            let m = music.clone();
            dom::add_click_listener(document, ID_MUSIC, move || {
                let m = m.clone();
                spawn_local(async move { m.play_from_gesture().await });
            });
        }
        music
    }

    // A missing or broken file routes to the fallback: either the element
    // reports an error, or it still has no duration after the probe delay.
    // Armed on the first play attempt only.
    fn watch_for_missing_file(self: &Rc<Self>) {
        let Some(bgm) = &self.bgm else {
            return;
        };
        if !self.state.borrow_mut().gate.arm_watch() {
            return;
        }
        {
            let m = self.clone();
            dom::add_once_listener(bgm, "error", move || m.engage_fallback(FallbackReason::MediaError));
        }
        let m = self.clone();
        dom::set_timeout_once(self.config.load_probe_ms, move || {
            let duration = m.bgm.as_ref().map(|a| a.duration()).unwrap_or(f64::NAN);
            let playing = m.state.borrow().playing;
            if track_missing(duration, playing) {
                m.engage_fallback(FallbackReason::NotLoaded);
            }
        });
    }

    pub fn apply_autoplay(self: &Rc<Self>, strategy: AutoplayStrategy) {
        match strategy {
            AutoplayStrategy::Immediate => {
                let m = self.clone();
                spawn_local(async move { m.try_autoplay().await });
            }
            AutoplayStrategy::Probe { delay_ms } => {
                let m = self.clone();
                dom::set_timeout_once(delay_ms, move || {
                    spawn_local(async move { m.try_autoplay().await });
                });
            }
            AutoplayStrategy::ButtonOnly => self.show_button(true),
        }
    }

    async fn try_autoplay(self: Rc<Self>) {
        self.watch_for_missing_file();
        match self.play_bgm().await {
            Ok(()) => self.show_button(false),
            Err(e) => {
                log::warn!("[music] autoplay blocked: {}", e);
                self.show_button(true);
            }
        }
    }

    async fn play_from_gesture(self: Rc<Self>) {
        self.show_button(false);
        self.watch_for_missing_file();
        // A synth started before any gesture is still suspended.
        self.resume_synth();
        if let Err(e) = self.play_bgm().await {
            log::warn!("[music] play rejected: {}", e);
            self.engage_fallback(FallbackReason::PlayRejected);
        }
    }

    async fn play_bgm(&self) -> anyhow::Result<()> {
        let bgm = self
            .bgm
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no #{} element", ID_BGM))?;
        if self.state.borrow().playing {
            return Ok(());
        }
        let promise = bgm.play().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        self.state.borrow_mut().playing = true;
        log::info!("[music] playing");
        Ok(())
    }

    fn engage_fallback(&self, reason: FallbackReason) {
        let mut state = self.state.borrow_mut();
        if !state.gate.engage(reason) {
            return;
        }
        log::info!("[music] falling back to synth ({:?})", reason);
        if state.synth.is_none() {
            match Synth::new(self.config.fallback_loop_ms) {
                Ok(s) => state.synth = Some(s),
                Err(e) => {
                    log::error!("[music] {}", e);
                    return;
                }
            }
        }
        if let Some(synth) = state.synth.as_mut() {
            synth.start();
        }
    }

    fn resume_synth(&self) {
        let state = self.state.borrow();
        if !state.gate.is_engaged() {
            return;
        }
        if let Some(synth) = state.synth.as_ref() {
            let _ = synth.ctx.resume();
            log::info!("[music] fallback synth resumed");
        }
    }

    fn show_button(&self, visible: bool) {
        if let Some(b) = &self.button {
            dom::set_hidden(b, !visible);
        }
    }

    /// Silence everything and rewind; the next failure may fall back again.
    pub fn stop(&self) {
        if let Some(bgm) = &self.bgm {
            let _ = bgm.pause();
            bgm.set_current_time(0.0);
        }
        let mut state = self.state.borrow_mut();
        if let Some(synth) = state.synth.as_mut() {
            synth.stop();
        }
        state.gate.release();
        state.playing = false;
    }
}

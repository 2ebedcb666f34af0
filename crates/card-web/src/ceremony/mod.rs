mod balloons;
mod stage;

use crate::audio::Music;
use crate::cake::CakeHandle;
use crate::confetti::ConfettiLayer;
use crate::constants::*;
use crate::dom;
use card_core::{CardConfig, Step, StepDriver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use stage::Stage;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Everything the steps act on besides the page elements.
pub struct Effects {
    pub music: Rc<Music>,
    pub confetti: Option<ConfettiLayer>,
    pub cake: CakeHandle,
}

fn build_steps(
    document: &web::Document,
    config: &CardConfig,
    stage: &Rc<Stage>,
    effects: &Effects,
) -> Vec<Step> {
    let labels = &config.steps;
    let mut steps = Vec::with_capacity(5);

    {
        let stage = stage.clone();
        steps.push(Step::new(labels.banner.clone(), move || {
            Stage::add(&stage.banner, CLASS_SHOW);
        }));
    }
    {
        let stage = stage.clone();
        let document = document.clone();
        let balloon_config = config.balloons.clone();
        let mut rng = StdRng::seed_from_u64(dom::random_seed());
        steps.push(Step::new(labels.balloons.clone(), move || {
            if let Some(container) = &stage.balloons {
                match balloons::spawn(&document, container, &balloon_config, &mut rng) {
                    Ok(n) => log::debug!("[steps] {} balloons released", n),
                    Err(e) => log::warn!("[steps] balloons: {}", e),
                }
            }
            Stage::add(&stage.balloons, CLASS_FLY);
        }));
    }
    {
        let stage = stage.clone();
        let cake = effects.cake.clone();
        let delay = config.cake.light_delay_ms;
        steps.push(Step::new(labels.bring_cake.clone(), move || {
            Stage::add(&stage.cake, CLASS_SHOW);
            let lit_stage = stage.clone();
            let cake = cake.clone();
            stage.later(delay, move || {
                Stage::add(&lit_stage.cake, CLASS_LIT);
                cake.show_flame();
            });
        }));
    }
    {
        let stage = stage.clone();
        let cake = effects.cake.clone();
        let delay = config.cake.candle_out_delay_ms;
        steps.push(Step::new(labels.blow_candle.clone(), move || {
            Stage::add(&stage.cake, CLASS_BLOW);
            cake.hide_flame();
            cake.create_smoke();
            let out_stage = stage.clone();
            stage.later(delay, move || Stage::remove(&out_stage.cake, &[CLASS_LIT]));
        }));
    }
    {
        let stage = stage.clone();
        let confetti = effects.confetti.clone();
        let replay_enabled = config.replay_enabled;
        steps.push(Step::new(labels.finale.clone(), move || {
            Stage::add(&stage.message, CLASS_SHOW);
            if let Some(c) = &confetti {
                c.start();
            }
            stage.show_action(false);
            if replay_enabled {
                stage.show_replay(true);
            }
        }));
    }
    steps
}

fn reset_hook(stage: &Rc<Stage>, effects: &Effects) -> impl FnMut() + 'static {
    let stage = stage.clone();
    let music = effects.music.clone();
    let confetti = effects.confetti.clone();
    let cake = effects.cake.clone();
    move || {
        stage.clear();
        music.stop();
        if let Some(c) = &confetti {
            c.stop();
        }
        cake.hide_flame();
        stage.show_action(true);
        stage.show_replay(false);
    }
}

fn apply_texts(document: &web::Document, config: &CardConfig) {
    let overrides = [
        (ID_BANNER, config.text.banner.as_deref()),
        (ID_MESSAGE, config.text.message.as_deref()),
        (ID_REPLAY, config.text.replay_button.as_deref()),
    ];
    for (id, text) in overrides {
        if let (Some(text), Some(el)) = (text, document.get_element_by_id(id)) {
            dom::set_text(&el, text);
        }
    }
}

/// Wire the action and replay buttons to a step driver over the page.
pub fn mount(document: &web::Document, config: &CardConfig, effects: Effects) -> anyhow::Result<()> {
    apply_texts(document, config);
    let stage = Rc::new(Stage::find(document));
    let steps = build_steps(document, config, &stage, &effects);
    let driver = Rc::new(RefCell::new(StepDriver::new(
        steps,
        reset_hook(&stage, &effects),
    )?));

    stage.set_action_label(driver.borrow().current_label());
    stage.show_replay(false);

    {
        let stage = stage.clone();
        let driver = driver.clone();
        dom::add_click_listener(document, ID_ACTION, move || {
            let Ok(mut driver) = driver.try_borrow_mut() else {
                log::warn!("[steps] click ignored while a step is running");
                return;
            };
            let label = driver.advance().to_owned();
            stage.set_action_label(&label);
        });
    }
    if config.replay_enabled {
        let stage = stage.clone();
        let driver = driver.clone();
        dom::add_click_listener(document, ID_REPLAY, move || {
            let Ok(mut driver) = driver.try_borrow_mut() else {
                return;
            };
            driver.reset();
            stage.set_action_label(driver.current_label());
        });
    }
    log::info!("[steps] ready with {} steps", driver.borrow().len());
    Ok(())
}

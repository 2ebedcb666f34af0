#![cfg(target_arch = "wasm32")]
mod audio;
mod cake;
mod canvas;
mod ceremony;
mod confetti;
mod constants;
mod dom;
mod frame;
mod render;
mod sched;
mod stars;

use constants::{CLASS_ON, ID_LIGHTS};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("card-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let config = dom::read_config(&document);

    if let Some(lights) = document.get_element_by_id(ID_LIGHTS) {
        dom::add_class(&lights, CLASS_ON);
    }

    // Each layer is optional; a missing element only disables that layer.
    if let Err(e) = stars::mount(&document, config.stars.clone()) {
        log::warn!("[stars] not started: {:?}", e);
    }
    let confetti = match confetti::ConfettiLayer::mount(&document, config.confetti.clone()) {
        Ok(layer) => Some(layer),
        Err(e) => {
            log::warn!("[confetti] not mounted: {:?}", e);
            None
        }
    };
    let music = audio::Music::mount(
        &document,
        config.music.clone(),
        config.text.music_button.as_deref(),
    );
    music.apply_autoplay(config.autoplay);
    let cake = cake::mount(&document, config.cake.clone());

    ceremony::mount(
        &document,
        &config,
        ceremony::Effects {
            music,
            confetti,
            cake,
        },
    )?;
    log::info!("card ready");
    Ok(())
}

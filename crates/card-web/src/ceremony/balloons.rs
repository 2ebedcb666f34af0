use crate::constants::CLASS_BALLOON;
use crate::dom;
use card_core::{balloon_layout, BalloonConfig, BalloonSpec};
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use web_sys as web;

fn balloon_element(document: &web::Document, spec: &BalloonSpec) -> anyhow::Result<web::HtmlElement> {
    let el: web::HtmlElement = document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    el.set_class_name(&format!("{} {}", CLASS_BALLOON, spec.color_class));
    let style = el.style();
    let _ = style.set_property("--x", &format!("{}vw", spec.x_vw));
    let _ = style.set_property("--s", &spec.scale.to_string());
    let _ = style.set_property("--dur", &format!("{}s", spec.duration_s));
    let _ = style.set_property("animation-delay", &format!("{}s", spec.delay_s));
    // Each balloon removes itself once its flight animation ends.
    let target = el.clone();
    dom::add_once_listener(&el, "animationend", move || target.remove());
    Ok(el)
}

/// Append a fresh flight of balloons to `container` in one DOM write.
pub fn spawn(
    document: &web::Document,
    container: &web::Element,
    config: &BalloonConfig,
    rng: &mut StdRng,
) -> anyhow::Result<usize> {
    let fragment = document.create_document_fragment();
    let layout = balloon_layout(config, rng);
    for spec in &layout {
        let el = balloon_element(document, spec)?;
        fragment
            .append_child(&el)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    container
        .append_child(&fragment)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(layout.len())
}

/// Remove every generated balloon still in `container`.
pub fn clear(container: &web::Element) {
    let Ok(list) = container.query_selector_all(&format!(".{}", CLASS_BALLOON)) else {
        return;
    };
    for i in 0..list.length() {
        if let Some(el) = list.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            el.remove();
        }
    }
}

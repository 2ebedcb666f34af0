use crate::canvas::CanvasSurface;
use crate::constants::ID_STARS;
use crate::{dom, frame};
use card_core::{StarField, StarFieldConfig, Surface2d};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

struct StarLayer {
    field: StarField,
    surface: CanvasSurface,
}

/// Start the background star field on `#bgStars`. Runs for the whole session.
pub fn mount(document: &web::Document, config: StarFieldConfig) -> anyhow::Result<()> {
    let canvas: web::HtmlCanvasElement = dom::element(document, ID_STARS)
        .ok_or_else(|| anyhow::anyhow!("#{} is not a canvas", ID_STARS))?;
    let mut surface = CanvasSurface::new(canvas)?;
    let viewport = dom::window_viewport();
    surface.fit(&viewport);
    let field = StarField::new(config, viewport, dom::random_seed());
    log::info!("[stars] {} stars for {}x{}", field.stars().len(), viewport.width, viewport.height);

    let layer = Rc::new(RefCell::new(StarLayer { field, surface }));
    {
        let layer = layer.clone();
        dom::add_window_listener("resize", move || {
            let viewport = dom::window_viewport();
            let mut l = layer.borrow_mut();
            l.surface.fit(&viewport);
            l.field.resize(viewport);
        });
    }
    frame::start_loop("stars", move |_ts| {
        let mut l = layer.borrow_mut();
        let StarLayer { field, surface } = &mut *l;
        field.tick(surface);
        Ok(())
    });
    Ok(())
}

use crate::canvas::CanvasSurface;
use crate::constants::ID_CONFETTI;
use crate::dom;
use crate::sched::WebScheduler;
use card_core::{ConfettiConfig, ConfettiController, Fired, StartOutcome, Surface2d};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys as web;

struct Inner {
    controller: ConfettiController<WebScheduler>,
    surface: CanvasSurface,
}

/// Confetti controller bound to the `#confetti` canvas and the browser clock.
#[derive(Clone)]
pub struct ConfettiLayer {
    inner: Rc<RefCell<Inner>>,
}

fn deliver(weak: &Weak<RefCell<Inner>>, fired: Fired) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let Ok(mut inner) = inner.try_borrow_mut() else {
        log::warn!("[confetti] dropped re-entrant callback");
        return;
    };
    let Inner { controller, surface } = &mut *inner;
    match fired {
        Fired::Frame { id, at } => controller.on_frame(id, at, surface),
        Fired::Timeout { id, at } => controller.on_timeout(id, at, surface),
    }
}

impl ConfettiLayer {
    pub fn mount(document: &web::Document, config: ConfettiConfig) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let canvas: web::HtmlCanvasElement = dom::element(document, ID_CONFETTI)
            .ok_or_else(|| anyhow::anyhow!("#{} is not a canvas", ID_CONFETTI))?;
        let mut surface = CanvasSurface::new(canvas)?;
        surface.set_visible(false);
        let viewport = dom::window_viewport();
        let seed = dom::random_seed();

        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<Inner>>| {
            let weak = weak.clone();
            let scheduler = WebScheduler::new(window, move |fired| deliver(&weak, fired));
            RefCell::new(Inner {
                controller: ConfettiController::new(config, scheduler, viewport, seed),
                surface,
            })
        });

        {
            let weak = Rc::downgrade(&inner);
            dom::add_window_listener("resize", move || {
                if let Some(inner) = weak.upgrade() {
                    inner
                        .borrow_mut()
                        .controller
                        .set_viewport(dom::window_viewport());
                }
            });
        }
        Ok(Self { inner })
    }

    pub fn start(&self) {
        let mut inner = self.inner.borrow_mut();
        let Inner { controller, surface } = &mut *inner;
        if controller.start(dom::now_ms(), surface) == StartOutcome::Ignored {
            log::debug!("[confetti] already running");
        }
    }

    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        let Inner { controller, surface } = &mut *inner;
        controller.stop(surface);
        log::info!("[confetti] stopped");
    }
}

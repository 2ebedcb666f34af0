use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Run `body` on every animation frame for the rest of the session.
///
/// The next frame is requested before `body` runs, so a frame that returns
/// `Err` is logged and the loop carries on. A panic is not recoverable: it
/// traps the module and leaves any borrowed layer state poisoned. `body`
/// receives the rAF timestamp in milliseconds.
pub fn start_loop(label: &'static str, mut body: impl FnMut(f64) -> anyhow::Result<()> + 'static) {
    let tick: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        request(&tick_clone);
        if let Err(e) = body(ts) {
            log::error!("[{}] frame error: {:?}", label, e);
        }
    }) as Box<dyn FnMut(f64)>));
    request(&tick);
}

fn request(tick: &Rc<RefCell<Option<FrameClosure>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(closure) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

use crate::constants::*;
use crate::dom;
use card_core::PendingTimers;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

/// The page elements the ceremony toggles. Any of them may be missing; the
/// corresponding effect is then skipped.
pub struct Stage {
    pub lights: Option<web::Element>,
    pub banner: Option<web::Element>,
    pub balloons: Option<web::Element>,
    pub cake: Option<web::Element>,
    pub message: Option<web::Element>,
    pub action: Option<web::HtmlElement>,
    pub replay: Option<web::HtmlElement>,
    // Delayed class changes still waiting to fire
    timers: Rc<RefCell<PendingTimers>>,
}

impl Stage {
    pub fn find(document: &web::Document) -> Self {
        Self {
            lights: dom::element(document, ID_LIGHTS),
            banner: dom::element(document, ID_BANNER),
            balloons: dom::element(document, ID_BALLOONS),
            cake: dom::element(document, ID_CAKE),
            message: dom::element(document, ID_MESSAGE),
            action: dom::element(document, ID_ACTION),
            replay: dom::element(document, ID_REPLAY),
            timers: Rc::default(),
        }
    }

    pub fn add(el: &Option<web::Element>, class: &str) {
        if let Some(el) = el {
            dom::add_class(el, class);
        }
    }

    pub fn remove(el: &Option<web::Element>, classes: &[&str]) {
        if let Some(el) = el {
            for class in classes {
                dom::remove_class(el, class);
            }
        }
    }

    /// Run `f` after `ms`, unless the stage is reset first.
    pub fn later(&self, ms: i32, f: impl FnOnce() + 'static) {
        let timers = self.timers.clone();
        let slot: Rc<Cell<Option<i32>>> = Rc::default();
        let fired = slot.clone();
        let handle = dom::set_timeout_once(ms, move || {
            if let Some(handle) = fired.get() {
                timers.borrow_mut().fired(handle);
            }
            f();
        });
        if let Some(handle) = handle {
            slot.set(Some(handle));
            self.timers.borrow_mut().track(handle);
        }
    }

    pub fn show_action(&self, visible: bool) {
        if let Some(b) = &self.action {
            dom::set_hidden(b, !visible);
        }
    }

    pub fn show_replay(&self, visible: bool) {
        if let Some(b) = &self.replay {
            dom::set_hidden(b, !visible);
        }
    }

    pub fn set_action_label(&self, label: &str) {
        if let Some(b) = &self.action {
            dom::set_text(b, label);
        }
    }

    /// Undo every class the steps add and drop pending delayed changes.
    pub fn clear(&self) {
        let pending = self.timers.borrow_mut().drain();
        for handle in pending {
            dom::clear_timeout(handle);
        }
        Self::remove(&self.banner, &[CLASS_SHOW]);
        Self::remove(&self.balloons, &[CLASS_FLY]);
        if let Some(b) = &self.balloons {
            super::balloons::clear(b);
        }
        Self::remove(&self.cake, &[CLASS_SHOW, CLASS_LIT, CLASS_BLOW]);
        Self::remove(&self.message, &[CLASS_SHOW]);
        Self::add(&self.lights, CLASS_ON);
    }
}

//! Browser [`Scheduler`]: `requestAnimationFrame` and `setTimeout` behind
//! task ids.
//!
//! Both browser callbacks are persistent closures owned by the scheduler.
//! Frame requests made before the next repaint share one rAF; timeouts carry
//! their task id as the callback argument. Cancelled ids are simply forgotten,
//! so a callback that still fires finds nothing to deliver.

use card_core::{Fired, Scheduler, TaskId};
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[derive(Default)]
struct Queue {
    frame_waiters: Vec<TaskId>,
    raf_handle: Option<i32>,
    timeouts: FnvHashMap<TaskId, i32>,
}

pub struct WebScheduler {
    window: web::Window,
    next_id: u32,
    queue: Rc<RefCell<Queue>>,
    on_frame: Closure<dyn FnMut(f64)>,
    on_timeout: Closure<dyn FnMut(JsValue)>,
}

impl WebScheduler {
    /// `dispatch` receives every task that fires and was not cancelled.
    pub fn new(window: web::Window, dispatch: impl Fn(Fired) + 'static) -> Self {
        let dispatch: Rc<dyn Fn(Fired)> = Rc::new(dispatch);
        let queue: Rc<RefCell<Queue>> = Rc::default();

        let on_frame = {
            let queue = queue.clone();
            let dispatch = dispatch.clone();
            Closure::wrap(Box::new(move |ts: f64| {
                let ids = {
                    let mut q = queue.borrow_mut();
                    q.raf_handle = None;
                    std::mem::take(&mut q.frame_waiters)
                };
                for id in ids {
                    dispatch(Fired::Frame { id, at: ts });
                }
            }) as Box<dyn FnMut(f64)>)
        };

        let on_timeout = {
            let queue = queue.clone();
            Closure::wrap(Box::new(move |arg: JsValue| {
                let Some(raw) = arg.as_f64() else {
                    return;
                };
                let id = TaskId(raw as u32);
                let known = queue.borrow_mut().timeouts.remove(&id).is_some();
                if known {
                    dispatch(Fired::Timeout {
                        id,
                        at: crate::dom::now_ms(),
                    });
                }
            }) as Box<dyn FnMut(JsValue)>)
        };

        Self {
            window,
            next_id: 1,
            queue,
            on_frame,
            on_timeout,
        }
    }

    fn alloc(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }
}

impl Scheduler for WebScheduler {
    fn request_frame(&mut self) -> TaskId {
        let id = self.alloc();
        let mut q = self.queue.borrow_mut();
        q.frame_waiters.push(id);
        if q.raf_handle.is_none() {
            match self
                .window
                .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            {
                Ok(handle) => q.raf_handle = Some(handle),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }
        id
    }

    fn set_timeout(&mut self, delay_ms: f64) -> TaskId {
        let id = self.alloc();
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_1(
                self.on_timeout.as_ref().unchecked_ref(),
                delay_ms.max(0.0).round() as i32,
                &JsValue::from(id.0),
            );
        match handle {
            Ok(handle) => {
                self.queue.borrow_mut().timeouts.insert(id, handle);
            }
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
        id
    }

    fn cancel(&mut self, task: TaskId) {
        let mut q = self.queue.borrow_mut();
        if let Some(handle) = q.timeouts.remove(&task) {
            self.window.clear_timeout_with_handle(handle);
            return;
        }
        q.frame_waiters.retain(|id| *id != task);
        if q.frame_waiters.is_empty() {
            if let Some(handle) = q.raf_handle.take() {
                let _ = self.window.cancel_animation_frame(handle);
            }
        }
    }
}

impl Drop for WebScheduler {
    fn drop(&mut self) {
        let mut q = self.queue.borrow_mut();
        if let Some(handle) = q.raf_handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        for (_, handle) in q.timeouts.drain() {
            self.window.clear_timeout_with_handle(handle);
        }
        q.frame_waiters.clear();
    }
}

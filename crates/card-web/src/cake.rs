use crate::constants::{CAKE_CANVAS_CLASS, ID_CAKE_3D};
use crate::render::CakeRenderer;
use crate::{dom, frame};
use card_core::cake::CakeScene;
use card_core::{cake_canvas_size, CakeConfig, Viewport};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Shared handle the ceremony uses to drive the cake, whether or not the
/// renderer came up.
#[derive(Clone)]
pub struct CakeHandle {
    scene: Rc<RefCell<CakeScene>>,
}

impl CakeHandle {
    pub fn show_flame(&self) {
        self.scene.borrow_mut().show_flame();
    }

    pub fn hide_flame(&self) {
        self.scene.borrow_mut().hide_flame();
    }

    pub fn create_smoke(&self) {
        self.scene.borrow_mut().create_smoke();
    }
}

fn square_viewport(container: &web::Element, config: &CakeConfig) -> Viewport {
    let window_width = dom::window_viewport().width as f64;
    let size = cake_canvas_size(config, container.client_width() as f64, window_width) as f32;
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    Viewport::new(size, size, dpr as f32)
}

fn create_canvas(document: &web::Document, container: &web::Element) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_class_name(CAKE_CANVAS_CLASS);
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Mount the 3D cake into `#cake3d`. The scene exists immediately; the GPU
/// side comes up asynchronously and is skipped if WebGPU is unavailable.
pub fn mount(document: &web::Document, config: CakeConfig) -> CakeHandle {
    let handle = CakeHandle {
        scene: Rc::new(RefCell::new(CakeScene::new(dom::random_seed()))),
    };
    if !config.enabled {
        log::info!("[cake] disabled by config");
        return handle;
    }
    let Some(container) = document.get_element_by_id(ID_CAKE_3D) else {
        log::warn!("[cake] missing #{}; 3D cake skipped", ID_CAKE_3D);
        return handle;
    };
    let canvas = match create_canvas(document, &container) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("[cake] {}", e);
            return handle;
        }
    };
    dom::sync_canvas_backing_size(&canvas, &square_viewport(&container, &config));

    let scene = handle.scene.clone();
    spawn_local(async move {
        let renderer = match CakeRenderer::new(canvas.clone()).await {
            Ok(r) => Rc::new(RefCell::new(r)),
            Err(e) => {
                log::error!("[cake] WebGPU init error: {:?}", e);
                return;
            }
        };
        {
            let canvas = canvas.clone();
            let renderer = renderer.clone();
            dom::add_window_listener("resize", move || {
                let viewport = square_viewport(&container, &config);
                dom::sync_canvas_backing_size(&canvas, &viewport);
                renderer
                    .borrow_mut()
                    .resize_if_needed(canvas.width(), canvas.height());
            });
        }
        let started = Instant::now();
        frame::start_loop("cake", move |_ts| {
            let now_ms = started.elapsed().as_secs_f64() * 1000.0;
            let instances = {
                let mut scene = scene.borrow_mut();
                scene.tick(now_ms);
                scene.instances()
            };
            renderer
                .borrow_mut()
                .render(&instances)
                .map_err(|e| anyhow::anyhow!("{:?}", e))
        });
    });
    handle
}

//! Leptos component owning the full-viewport particle canvas.
//!
//! The component sizes a fixed canvas to the window, seeds a [`ParticleField`],
//! and drives it from a `requestAnimationFrame` loop. Window `resize` re-seeds
//! the field; window `mousemove` is translated into canvas space and applied as
//! a pointer impulse. Everything registered here is released in `on_cleanup`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::particles::ParticleField;
use super::render;
use crate::config::FieldConfig;
use crate::palette::Palette;

/// Everything the animation loop and listeners share.
#[derive(Default)]
struct Runtime {
	field: RefCell<Option<ParticleField>>,
	animate: RefCell<Option<Closure<dyn FnMut()>>>,
	resize_cb: RefCell<Option<Closure<dyn FnMut()>>>,
	pointer_cb: RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>,
	frame: Cell<Option<i32>>,
	running: Cell<bool>,
}

impl Runtime {
	/// Stop the loop and unregister listeners. Safe to call twice.
	fn teardown(&self) {
		self.running.set(false);
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(handle) = self.frame.take() {
			let _ = window.cancel_animation_frame(handle);
		}
		if let Some(cb) = self.resize_cb.borrow_mut().take() {
			let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if let Some(cb) = self.pointer_cb.borrow_mut().take() {
			let _ =
				window.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}
		// The frame closure holds a handle to itself; dropping it breaks the cycle.
		self.animate.borrow_mut().take();
		self.field.borrow_mut().take();
	}
}

fn viewport(window: &Window) -> (f64, f64) {
	(
		window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
		window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
	)
}

/// Full-window animated particle background.
///
/// Re-seeds with the matching palette whenever `dark` changes.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(into)] dark: Signal<bool>,
	#[prop(default = FieldConfig::default())] config: FieldConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let runtime = Rc::new(Runtime::default());
	let opacity = config.canvas_opacity;

	let runtime_init = runtime.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if runtime_init.running.get() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};

		let (w, h) = viewport(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let field = ParticleField::new(
			config.clone(),
			Palette::for_theme(dark.get_untracked()).field,
			w,
			h,
		);
		info!("web2api: particle field seeded with {} particles", field.particles.len());
		*runtime_init.field.borrow_mut() = Some(field);
		runtime_init.running.set(true);

		let (runtime_resize, canvas_resize) = (runtime_init.clone(), canvas.clone());
		*runtime_init.resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut field) = *runtime_resize.field.borrow_mut() {
				field.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *runtime_init.resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (runtime_pointer, canvas_pointer) = (runtime_init.clone(), canvas.clone());
		*runtime_init.pointer_cb.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			let rect = canvas_pointer.get_bounding_client_rect();
			let (x, y) = (
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
			if let Some(ref mut field) = *runtime_pointer.field.borrow_mut() {
				field.apply_pointer(x, y);
			}
		}));
		if let Some(ref cb) = *runtime_init.pointer_cb.borrow() {
			let _ =
				window.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}

		let runtime_anim = runtime_init.clone();
		*runtime_init.animate.borrow_mut() = Some(Closure::new(move || {
			if !runtime_anim.running.get() {
				return;
			}
			if let Some(ref mut field) = *runtime_anim.field.borrow_mut() {
				field.step();
				render::render(field, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), runtime_anim.animate.borrow().as_ref())
			{
				runtime_anim
					.frame
					.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *runtime_init.animate.borrow() {
			runtime_init
				.frame
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let runtime_theme = runtime.clone();
	Effect::new(move |prev: Option<bool>| {
		let is_dark = dark.get();
		if prev.is_some_and(|was_dark| was_dark != is_dark) {
			if let Some(ref mut field) = *runtime_theme.field.borrow_mut() {
				field.restyle(Palette::for_theme(is_dark).field);
			}
		}
		is_dark
	});

	let runtime_cleanup = SendWrapper::new(runtime);
	on_cleanup(move || runtime_cleanup.teardown());

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			style=format!(
				"position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
				 z-index: -10; pointer-events: none; opacity: {opacity};"
			)
		/>
	}
}

//! Leptos component wrapping the spinning globe.
//!
//! The SVG chrome (ocean sphere, gradient, glow filter, graticule, atmosphere
//! ring) is rendered once by `view!`. An animation loop runs via
//! `requestAnimationFrame`, advancing [`GlobeMotion`] and reassigning the `d`
//! attribute of paths that already exist. Country paths are created a single
//! time, when the topology fetch completes. Decorative rays and halos sit
//! behind the SVG and never receive pointer events.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, PointerEvent};

use super::activity::ActivityTable;
use super::loader::{COUNTRIES_OBJECT, WORLD_ATLAS_URL, fetch_countries};
use super::scene::{Chrome, GlobeScene};
use super::state::GlobeMotion;
use crate::components::theme::{GLOBE_HALOS, GLOBE_RAYS, GlobeTheme};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Source of per-instance suffixes for SVG definition ids.
static NEXT_INSTANCE: AtomicUsize = AtomicUsize::new(0);

const WRAPPER_STYLE: &str = "position: relative; width: 100%; display: flex; \
	justify-content: center; align-items: center; padding: 1rem 0; touch-action: none;";

/// Per-instance state shared by the frame loop, the pointer handlers and the
/// fetch task.
struct GlobeContext {
	motion: GlobeMotion,
	scene: GlobeScene,
	country_paths: Vec<Element>,
}

/// An auto-spinning, draggable orthographic globe with countries shaded by
/// activity.
///
/// The world topology is fetched once from `topology_url`. If that fails the
/// globe keeps spinning with its ocean and graticule only.
#[component]
pub fn SpinningGlobe(
	#[prop(default = WORLD_ATLAS_URL.to_string(), into)] topology_url: String,
) -> impl IntoView {
	let graticule_ref = NodeRef::<leptos::svg::Path>::new();
	let countries_ref = NodeRef::<leptos::svg::G>::new();
	let (dragging, set_dragging) = signal(false);

	let theme = GlobeTheme::default();
	let chrome = Chrome::new(&theme).scoped(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed));
	let glow = chrome.glow_filter();
	let context = Rc::new(RefCell::new(GlobeContext {
		motion: GlobeMotion::default(),
		scene: GlobeScene::empty(&theme),
		country_paths: Vec::new(),
	}));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	// Cleanup runs through `on_cleanup`, which needs Send + Sync captures.
	let alive = Arc::new(AtomicBool::new(true));
	let frame_handle = Arc::new(AtomicI32::new(0));

	let (context_init, animate_init, alive_init, frame_init) = (
		context.clone(),
		animate.clone(),
		alive.clone(),
		frame_handle.clone(),
	);
	Effect::new(move |_| {
		let (Some(graticule), Some(group)) = (graticule_ref.get(), countries_ref.get()) else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		if animate_init.borrow().is_some() {
			return;
		}

		let (context_anim, animate_inner, alive_anim, frame_anim) = (
			context_init.clone(),
			Rc::downgrade(&animate_init),
			alive_init.clone(),
			frame_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}
			{
				let mut c = context_anim.borrow_mut();
				c.motion.tick();
				let projection = GlobeScene::projection(c.motion.angles());
				let frame = c.scene.update(&projection);
				let _ = graticule.set_attribute("d", &frame.graticule);
				for (node, d) in c.country_paths.iter().zip(&frame.countries) {
					let _ = node.set_attribute("d", d);
				}
			}
			let Some(cell) = animate_inner.upgrade() else {
				return;
			};
			if let (Some(cb), Some(win)) = (&*cell.borrow(), web_sys::window()) {
				if let Ok(handle) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					frame_anim.store(handle, Ordering::Relaxed);
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(handle) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frame_init.store(handle, Ordering::Relaxed);
			}
		}

		let (context_load, alive_load, url, glow) = (
			context_init.clone(),
			alive_init.clone(),
			topology_url.clone(),
			glow.clone(),
		);
		let group: Element = group.into();
		spawn_local(async move {
			let result = fetch_countries(&url, COUNTRIES_OBJECT).await;
			if !alive_load.load(Ordering::Relaxed) {
				debug!("globe-field: globe unmounted before world data arrived");
				return;
			}
			let theme = GlobeTheme::default();
			let scene = GlobeScene::from_load_result(result, &ActivityTable::default(), &theme);
			let paths = mount_country_paths(&group, &scene, &glow);
			let mut c = context_load.borrow_mut();
			c.scene = scene;
			c.country_paths = paths;
		});
	});

	on_cleanup(move || {
		alive.store(false, Ordering::Relaxed);
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(frame_handle.load(Ordering::Relaxed));
		}
		debug!("globe-field: globe animation stopped");
	});

	let context_pd = context.clone();
	let on_pointerdown = move |ev: PointerEvent| {
		if let Some(target) = ev.current_target().and_then(|t| t.dyn_into::<Element>().ok()) {
			let _ = target.set_pointer_capture(ev.pointer_id());
		}
		context_pd
			.borrow_mut()
			.motion
			.pointer_down(ev.client_x() as f64, ev.client_y() as f64);
		set_dragging.set(true);
	};

	let context_pm = context.clone();
	let on_pointermove = move |ev: PointerEvent| {
		context_pm
			.borrow_mut()
			.motion
			.pointer_move(ev.client_x() as f64, ev.client_y() as f64);
	};

	let context_pu = context.clone();
	let on_pointerup = move |_: PointerEvent| {
		context_pu.borrow_mut().motion.pointer_up();
		set_dragging.set(false);
	};

	let context_pl = context;
	let on_pointerleave = move |_: PointerEvent| {
		context_pl.borrow_mut().motion.pointer_up();
		set_dragging.set(false);
	};

	let [cx, cy] = chrome.center;
	let (focus_x, focus_y) = chrome.gradient_focus.clone();
	let [(inner_offset, inner_color), (outer_offset, outer_color)] = chrome.gradient_stops.clone();
	let [glow_x, glow_y, glow_width, glow_height] = chrome.glow_region.clone();

	view! {
		<div
			class="spinning-globe-wrapper"
			style=move || {
				let cursor = if dragging.get() { "grabbing" } else { "grab" };
				format!("{WRAPPER_STYLE} cursor: {cursor};")
			}
		>
			{GLOBE_RAYS.iter().map(|ray| view! { <div style=ray.style() /> }).collect_view()}
			{GLOBE_HALOS.iter().map(|halo| view! { <div style=halo.style() /> }).collect_view()}
			<svg
				class="spinning-globe"
				viewBox=chrome.view_box.clone()
				style="position: relative; z-index: 1; display: block; width: 100%; max-width: 400px; touch-action: none;"
				on:pointerdown=on_pointerdown
				on:pointermove=on_pointermove
				on:pointerup=on_pointerup
				on:pointerleave=on_pointerleave
			>
				<defs>
					<radialGradient id=chrome.gradient_id.clone() cx=focus_x cy=focus_y>
						<stop offset=inner_offset stop-color=inner_color />
						<stop offset=outer_offset stop-color=outer_color />
					</radialGradient>
					<filter
						id=chrome.glow_filter_id.clone()
						x=glow_x
						y=glow_y
						width=glow_width
						height=glow_height
					>
						<feGaussianBlur stdDeviation=chrome.glow_blur result="blur" />
						<feMerge>
							<feMergeNode in="blur" />
							<feMergeNode in="SourceGraphic" />
						</feMerge>
					</filter>
				</defs>
				<circle cx=cx cy=cy r=chrome.radius fill=chrome.gradient_fill() />
				<path
					node_ref=graticule_ref
					fill="none"
					stroke=chrome.graticule_stroke.clone()
					stroke-width=chrome.graticule_width
				/>
				<g node_ref=countries_ref stroke-width=chrome.country_stroke_width />
				<circle
					cx=cx
					cy=cy
					r=chrome.ring_radius
					fill="none"
					stroke=chrome.ring_stroke.clone()
					stroke-width=chrome.ring_width
				/>
			</svg>
		</div>
	}
}

/// Creates one `<path>` per country with its fixed styling. Frames only ever
/// change their `d` attribute afterwards.
fn mount_country_paths(group: &Element, scene: &GlobeScene, glow: &str) -> Vec<Element> {
	let Some(document) = group.owner_document() else {
		return Vec::new();
	};
	let mut paths = Vec::with_capacity(scene.countries().len());
	for country in scene.countries() {
		let path = match document.create_element_ns(Some(SVG_NS), "path") {
			Ok(path) => path,
			Err(e) => {
				warn!("globe-field: failed to create path for {}: {:?}", country.id, e);
				break;
			}
		};
		let _ = path.set_attribute("data-id", &country.id);
		let _ = path.set_attribute("fill", &country.fill());
		let _ = path.set_attribute("stroke", &country.stroke());
		if country.style.glow {
			let _ = path.set_attribute("filter", glow);
		}
		let _ = group.append_child(&path);
		paths.push(path);
	}
	paths
}

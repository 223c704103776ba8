//! Leptos component rendering a particle field as CSS-animated `<div>`s.
//!
//! The descriptor list is memoized on `count`. Twinkling and orb drift are
//! CSS keyframe animations, so nothing is updated per frame from Rust.

use leptos::prelude::*;
use leptos_meta::Style;

use super::particles::{FieldParams, generate_field};
use crate::components::fmt_decimal;
use crate::components::theme::{ORBS, Orb, StarPalette};

const CONTAINER_STYLE: &str =
	"position: absolute; inset: 0; overflow: hidden; pointer-events: none; z-index: 0;";

const OVERLAY_STYLE: &str = "position: absolute; inset: 0; \
	 background: radial-gradient(ellipse at center, rgba(20, 184, 166, 0.08) 0%, transparent 50%);";

const TWINKLE_KEYFRAMES: &str = "@keyframes starfield-twinkle { \
	 0%, 100% { opacity: calc(var(--star-opacity) * 0.4); transform: scale(0.8); } \
	 50% { opacity: var(--star-opacity); transform: scale(1.3); } }";

/// Twinkling star particles over a soft teal glow, with optional drifting
/// orbs behind them.
///
/// Two instances with the same `count` differ only if their `params` use
/// different seed offsets.
#[component]
pub fn StarfieldBackground(
	#[prop(into)] count: Signal<usize>,
	#[prop(default = FieldParams::starfield())] params: FieldParams,
	#[prop(default = true)] orbs: bool,
) -> impl IntoView {
	let palette = StarPalette::default();
	let field = Memo::new(move |_| generate_field(count.get(), &params));

	view! {
		<Style id="starfield-keyframes">{stylesheet()}</Style>
		<div class="starfield" style=CONTAINER_STYLE>
			<div class="starfield-overlay" style=OVERLAY_STYLE />
			<For each=move || field.get() key=|particle| particle.id let:particle>
				<div
					class="starfield-star"
					style=format!("position: absolute; border-radius: 50%; {}", particle.inline_style(&palette))
				/>
			</For>
			{orbs
				.then(|| {
					ORBS.iter()
						.enumerate()
						.map(|(i, orb)| view! { <div class="starfield-orb" style=orb_style(i, orb) /> })
						.collect_view()
				})}
		</div>
	}
}

/// Keyframes for the twinkle and one drift loop per orb.
fn stylesheet() -> String {
	let mut css = String::from(TWINKLE_KEYFRAMES);
	for (i, orb) in ORBS.iter().enumerate() {
		css.push('\n');
		css.push_str(&orb_keyframes(i, orb));
	}
	css
}

fn orb_keyframes(index: usize, orb: &Orb) -> String {
	format!(
		"@keyframes starfield-orb-{index} {{ \
		 0%, 100% {{ transform: translate(0px, 0px) scale(1); opacity: {}; }} \
		 50% {{ transform: translate({}px, {}px) scale({}); opacity: {}; }} }}",
		fmt_decimal(orb.opacity.0),
		fmt_decimal(orb.drift.0),
		fmt_decimal(orb.drift.1),
		fmt_decimal(orb.scale_peak),
		fmt_decimal(orb.opacity.1),
	)
}

fn orb_style(index: usize, orb: &Orb) -> String {
	format!(
		"position: absolute; width: {d}px; height: {d}px; border-radius: 50%; \
		 background: {}; filter: blur({}px); {} \
		 animation: starfield-orb-{index} {}s ease-in-out infinite;",
		orb.background(),
		fmt_decimal(orb.blur),
		orb.anchor,
		fmt_decimal(orb.period),
		d = fmt_decimal(orb.diameter),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stylesheet_has_one_drift_per_orb() {
		let css = stylesheet();
		assert!(css.starts_with("@keyframes starfield-twinkle"));
		for i in 0..ORBS.len() {
			assert!(css.contains(&format!("@keyframes starfield-orb-{i} ")));
		}
	}

	#[test]
	fn first_orb_drifts_right_and_down() {
		assert_eq!(
			orb_keyframes(0, &ORBS[0]),
			"@keyframes starfield-orb-0 { \
			 0%, 100% { transform: translate(0px, 0px) scale(1); opacity: 0.8; } \
			 50% { transform: translate(80px, 50px) scale(1.3); opacity: 1; } }"
		);
	}

	#[test]
	fn orb_style_places_and_animates() {
		let style = orb_style(1, &ORBS[1]);
		assert!(style.starts_with("position: absolute; width: 400px; height: 400px;"));
		assert!(style.contains("filter: blur(70px); right: 10%; bottom: 20%;"));
		assert!(style.ends_with("animation: starfield-orb-1 12s ease-in-out infinite;"));
	}
}

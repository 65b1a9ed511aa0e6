use leptos::prelude::*;

use crate::components::particle_field::ParticleFieldCanvas;

/// Default Home Page: the full-screen particle field under a hero overlay.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-field">
				<ParticleFieldCanvas fullscreen=true />
				<div class="field-overlay">
					<h1>"Particle Network"</h1>
					<p class="subtitle">
						"Drifting nodes, proximity-faded connections. Move the mouse to pull the field around."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

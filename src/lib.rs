//! # dynform-ui
//!
//! Client-side rendered form generation from a declarative field
//! configuration. The hosting application supplies an ordered list of
//! field descriptors as JSON; the [`DynamicForm`] component compiles it
//! into typed input controls, an initial-values record and a validation
//! schema, and renders a submittable form with per-field error display.
//!
//! The demo shell below mounts the form with the embedded configuration
//! from `assets/config.json`.

use leptos::prelude::*;

mod components;

pub use components::dynamic_form;

use components::dynamic_form::{DynamicForm, FieldConfig};

const DEMO_CONFIG: &str = include_str!("../assets/config.json");

#[component]
pub fn App() -> impl IntoView {
    let config: Vec<FieldConfig> = serde_json::from_str(DEMO_CONFIG).unwrap_or_else(|error| {
        log::error!("invalid demo field configuration: {error}");
        Vec::new()
    });

    view! {
        <div class="min-h-screen bg-gray-100 py-10">
            <div class="max-w-4xl mx-auto bg-white rounded-lg shadow p-6">
                <h1 class="text-2xl font-bold text-gray-800 mb-6">"Registration"</h1>
                <DynamicForm config=config/>
            </div>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}

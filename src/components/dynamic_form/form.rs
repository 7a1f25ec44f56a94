//! Form orchestration: derivation, layout and the submission flow.

use leptos::prelude::*;
use leptos::web_sys;
use std::collections::HashMap;

use super::engine::FormState;
use super::fields::FieldControl;
use super::schema::derive_schema;
use super::types::{FieldConfig, FieldKind, FormValues};

/// Configuration-driven form.
///
/// Compiles the descriptor list once at mount into initial values and
/// validation rules, binds them into a [`FormState`], and lays out one
/// block per field in declaration order: label (with a marker when the
/// field is required), control, and an error slot fed by live validation.
///
/// Submission runs full validation; failures populate the error slots and
/// block the attempt. On success `on_submit` receives the full value
/// record. Without a callback the record is logged, a stand-in for a real
/// host integration.
#[component]
pub fn DynamicForm(
    /// Ordered field descriptors supplied by the hosting application
    config: Vec<FieldConfig>,
    /// Invoked with the value record once validation has passed
    #[prop(optional, into)]
    on_submit: Option<Callback<FormValues>>,
) -> impl IntoView {
    let schema = derive_schema(&config);
    for error in &schema.errors {
        log::warn!("field configuration rejected: {error}");
    }
    let config_errors: HashMap<String, String> = schema
        .errors
        .iter()
        .map(|error| (error.field().to_string(), error.to_string()))
        .collect();

    let state = FormState::new(&schema);

    let handle_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(values) = state.try_submit() else {
            return;
        };
        state.begin_submit();
        match on_submit {
            Some(callback) => callback.run(values),
            None => log::info!(
                "form submitted (in flight: {}): {values:?}",
                state.is_submitting()
            ),
        }
        state.finish_submit();
    };

    let blocks = config
        .iter()
        .map(|field| {
            // unknown kinds get no block at all: no control, no error slot
            if FieldKind::of(field) == FieldKind::Unknown {
                return ().into_any();
            }

            let name = field.name.clone();
            let name_for_error = name.clone();
            let config_error = config_errors.get(&name).cloned();

            view! {
                <div class="mb-4">
                    <label
                        for=name.clone()
                        class="block text-sm font-medium text-gray-700 mb-1"
                    >
                        {name.clone()}
                        {field
                            .required
                            .then(|| view! { <span class="text-red-500">"*"</span> })}
                    </label>
                    {match config_error {
                        // a rejected descriptor shows its notice in place of
                        // a control; sibling fields are unaffected
                        Some(message) => {
                            view! {
                                <div class="px-3 py-2 text-sm text-red-700 bg-red-50 border border-red-200 rounded-md">
                                    {message}
                                </div>
                            }
                                .into_any()
                        }
                        None => {
                            view! { <FieldControl field=field.clone() state=state/> }.into_any()
                        }
                    }}
                    {move || {
                        state
                            .error(&name_for_error)
                            .map(|message| {
                                view! { <p class="mt-1 text-xs text-red-500">{message}</p> }
                            })
                    }}
                </div>
            }
            .into_any()
        })
        .collect_view();

    view! {
        <form on:submit=handle_submit>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-x-4">{blocks}</div>
            <button
                type="submit"
                class="px-4 py-2 text-sm font-medium text-white bg-blue-600 rounded-md hover:bg-blue-700 disabled:opacity-50"
                disabled=move || state.is_submitting()
            >
                "Submit"
            </button>
        </form>
    }
}

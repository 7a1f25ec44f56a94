//! Control renderers, one per field kind.
//!
//! `FieldControl` dispatches over the closed kind set; every arm produces
//! the visible control(s) for one descriptor, bound to the shared form
//! state. The renderers themselves hold no state: change events write
//! through the `FormState` bindings and reads go through reactive closures.

use leptos::prelude::*;
use leptos::web_sys;
use wasm_bindgen::JsCast;

use super::engine::FormState;
use super::types::{FieldConfig, FieldKind, FieldOption};

const INPUT_CLASS: &str = "w-full px-3 py-2 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";
const CHECK_CLASS: &str = "h-4 w-4 border-gray-300 text-blue-600 focus:ring-blue-500";

// ============================================================================
// Dispatch
// ============================================================================

/// Render the control(s) for one field descriptor
#[component]
pub fn FieldControl(field: FieldConfig, state: FormState) -> impl IntoView {
    let name = field.name.clone();
    let options = field.options.clone().unwrap_or_default();

    match FieldKind::of(&field) {
        FieldKind::Text => {
            view! { <StringInput name=name input_type="text" state=state/> }.into_any()
        }
        FieldKind::Password => {
            // masked display only; the validation path is identical to text
            view! { <StringInput name=name input_type="password" state=state/> }.into_any()
        }
        FieldKind::SelectOne => {
            view! { <SingleSelect name=name options=options state=state/> }.into_any()
        }
        FieldKind::SelectMany => {
            view! { <MultiSelect name=name options=options state=state/> }.into_any()
        }
        FieldKind::Radio => {
            view! { <RadioGroup name=name options=options state=state/> }.into_any()
        }
        FieldKind::Checkbox => {
            view! { <CheckboxGroup name=name options=options state=state/> }.into_any()
        }
        FieldKind::File => {
            let accept = field
                .file_format_supported
                .clone()
                .unwrap_or_default()
                .join(",");
            view! { <FileInput name=name accept=accept state=state/> }.into_any()
        }
        // no control for kinds this form cannot render
        FieldKind::Unknown => ().into_any(),
    }
}

// ============================================================================
// Text / Password
// ============================================================================

#[component]
fn StringInput(name: String, input_type: &'static str, state: FormState) -> impl IntoView {
    let name_for_input = name.clone();
    let name_for_blur = name.clone();
    let name_for_value = name.clone();

    let on_input = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let input: web_sys::HtmlInputElement = target.dyn_into().unwrap();
        state.set_text(&name_for_input, input.value());
    };

    view! {
        <input
            type=input_type
            id=name.clone()
            class=INPUT_CLASS
            prop:value=move || state.text(&name_for_value)
            on:input=on_input
            on:blur=move |_| state.blur(&name_for_blur)
        />
    }
}

// ============================================================================
// Select (single and multiple)
// ============================================================================

#[component]
fn SingleSelect(name: String, options: Vec<FieldOption>, state: FormState) -> impl IntoView {
    let name_for_change = name.clone();
    let name_for_blur = name.clone();
    let name_for_value = name.clone();

    let on_change = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let select: web_sys::HtmlSelectElement = target.dyn_into().unwrap();
        state.set_text(&name_for_change, select.value());
    };

    view! {
        <select
            id=name.clone()
            class=INPUT_CLASS
            prop:value=move || state.text(&name_for_value)
            on:change=on_change
            on:blur=move |_| state.blur(&name_for_blur)
        >
            // placeholder choice: its empty value can never satisfy validation
            <option value="">"Select"</option>
            {options
                .into_iter()
                .map(|option| {
                    view! { <option value=option.value.clone()>{option.label}</option> }
                })
                .collect_view()}
        </select>
    }
}

#[component]
fn MultiSelect(name: String, options: Vec<FieldOption>, state: FormState) -> impl IntoView {
    let name_for_change = name.clone();
    let name_for_blur = name.clone();
    let name_for_options = name.clone();

    let on_change = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let select: web_sys::HtmlSelectElement = target.dyn_into().unwrap();
        let selected = select.selected_options();
        let mut picked = Vec::with_capacity(selected.length() as usize);
        for i in 0..selected.length() {
            if let Some(option) = selected
                .item(i)
                .and_then(|el| el.dyn_into::<web_sys::HtmlOptionElement>().ok())
            {
                picked.push(option.value());
            }
        }
        state.set_many(&name_for_change, picked);
    };

    view! {
        <select
            id=name.clone()
            multiple=true
            class=INPUT_CLASS
            on:change=on_change
            on:blur=move |_| state.blur(&name_for_blur)
        >
            {options
                .into_iter()
                .map(|option| {
                    let name = name_for_options.clone();
                    let value = option.value.clone();
                    view! {
                        <option
                            value=option.value.clone()
                            prop:selected=move || state.is_selected(&name, &value)
                        >
                            {option.label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}

// ============================================================================
// Radio / Checkbox groups
// ============================================================================

#[component]
fn RadioGroup(name: String, options: Vec<FieldOption>, state: FormState) -> impl IntoView {
    view! {
        <div class="space-y-1">
            {options
                .into_iter()
                .map(|option| {
                    let name_for_checked = name.clone();
                    let name_for_change = name.clone();
                    let value = option.value.clone();
                    let value_for_change = option.value.clone();
                    view! {
                        <div class="flex items-center gap-2">
                            <input
                                type="radio"
                                name=name.clone()
                                value=option.value.clone()
                                class=CHECK_CLASS
                                prop:checked=move || state.text(&name_for_checked) == value
                                on:change=move |_| {
                                    state.set_text(&name_for_change, value_for_change.clone())
                                }
                            />
                            <label class="text-sm text-gray-700">{option.label}</label>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn CheckboxGroup(name: String, options: Vec<FieldOption>, state: FormState) -> impl IntoView {
    view! {
        <div class="space-y-1">
            {options
                .into_iter()
                .map(|option| {
                    let name_for_checked = name.clone();
                    let name_for_change = name.clone();
                    let value = option.value.clone();
                    let value_for_change = option.value.clone();
                    view! {
                        <div class="flex items-center gap-2">
                            <input
                                type="checkbox"
                                name=name.clone()
                                value=option.value.clone()
                                class=CHECK_CLASS
                                prop:checked=move || state.is_selected(&name_for_checked, &value)
                                on:change=move |ev: web_sys::Event| {
                                    let target = ev.target().unwrap();
                                    let input: web_sys::HtmlInputElement =
                                        target.dyn_into().unwrap();
                                    state.set_member(
                                        &name_for_change,
                                        &value_for_change,
                                        input.checked(),
                                    );
                                }
                            />
                            <label class="text-sm text-gray-700">{option.label}</label>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

// ============================================================================
// File
// ============================================================================

#[component]
fn FileInput(name: String, accept: String, state: FormState) -> impl IntoView {
    let name_for_change = name.clone();
    let name_for_blur = name.clone();

    let on_change = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let input: web_sys::HtmlInputElement = target.dyn_into().unwrap();
        // the stored value is the chosen file's name, so required file
        // fields are satisfiable; clearing the picker empties it again
        let file_name = input
            .files()
            .and_then(|files| files.get(0))
            .map(|file| file.name())
            .unwrap_or_default();
        state.set_text(&name_for_change, file_name);
    };

    // the accept list is a picker filter hint only, never a validation rule
    let accept_attr = (!accept.is_empty()).then_some(accept);

    view! {
        <input
            type="file"
            id=name.clone()
            accept=accept_attr
            class=INPUT_CLASS
            on:change=on_change
            on:blur=move |_| state.blur(&name_for_blur)
        />
    }
}

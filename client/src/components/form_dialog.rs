//! Create/edit dialog rendered from a [`FormSchema`].
//!
//! The dialog owns no request logic. Submit runs
//! [`FormState::begin_submit`]; only a validated payload reaches `on_submit`.

use leptos::prelude::*;
use models::validation::{Field, InputKind};
use models::FormSchema;
use serde_json::Value;

use crate::util::form::FormState;

#[component]
pub fn FormDialog(
    title: String,
    schema: FormSchema,
    form: RwSignal<FormState>,
    on_submit: Callback<Value>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let fields = schema.fields.clone();
    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut payload = None;
        form.update(|state| payload = state.begin_submit(&schema));
        if let Some(payload) = payload {
            on_submit.run(payload);
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <form class="dialog dialog--form" on:click=move |ev| ev.stop_propagation() on:submit=submit>
                <h2 class="dialog__title">{title}</h2>
                <Show when=move || form.get().message.is_some()>
                    <p class="dialog__error">{move || form.get().message.unwrap_or_default()}</p>
                </Show>
                {fields.into_iter().map(|field| view! { <FormField field form/> }).collect::<Vec<_>>()}
                <div class="dialog__actions">
                    <button type="button" class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn--primary" disabled=move || form.get().submitting>
                        {move || if form.get().submitting { "Saving…" } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn FormField(field: Field, form: RwSignal<FormState>) -> impl IntoView {
    let name = field.name;
    let value = move || form.get().value(name);
    let on_input = move |ev: leptos::ev::Event| {
        form.update(|state| state.set(name, event_target_value(&ev)));
    };
    let label = if field.is_required() { format!("{} *", field.label) } else { field.label.to_owned() };

    let input = match field.input {
        InputKind::TextArea => view! {
            <textarea class="dialog__textarea" name=name prop:value=value on:input=on_input></textarea>
        }
        .into_any(),
        InputKind::Checkbox => view! {
            <input
                class="dialog__checkbox"
                type="checkbox"
                name=name
                prop:checked=move || matches!(value().as_str(), "true" | "on" | "1")
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    form.update(|state| state.set(name, checked.to_string()));
                }
            />
        }
        .into_any(),
        InputKind::Select(options) => view! {
            <select class="dialog__input" name=name prop:value=value on:change=on_input>
                <option value="">"Select…"</option>
                {options
                    .iter()
                    .map(|option| view! { <option value=*option>{*option}</option> })
                    .collect::<Vec<_>>()}
            </select>
        }
        .into_any(),
        other => {
            let (kind, placeholder) = match other {
                InputKind::Email => ("email", ""),
                InputKind::Password => ("password", ""),
                InputKind::Number => ("number", ""),
                InputKind::Date => ("date", "YYYY-MM-DD"),
                InputKind::IdList => ("text", "1, 2, 3"),
                _ => ("text", ""),
            };
            view! {
                <input
                    class="dialog__input"
                    type=kind
                    name=name
                    placeholder=placeholder
                    prop:value=value
                    on:input=on_input
                />
            }
            .into_any()
        }
    };

    view! {
        <label class="dialog__label">
            {label}
            {input}
            {move || form.get().error(name).map(|message| view! { <span class="dialog__field-error">{message}</span> })}
        </label>
    }
}

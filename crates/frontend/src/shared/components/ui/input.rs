use leptos::prelude::*;

/// Labelled text input bound to a form field.
///
/// `error` is rendered under the input; pass the form's visible error so it
/// only shows once the field was touched.
#[component]
pub fn TextField(
    #[prop(into)] label: String,
    /// Input value
    #[prop(into)]
    value: Signal<String>,
    on_input: Callback<String>,
    /// Called when the input loses focus
    #[prop(optional)]
    on_blur: Option<Callback<()>>,
    #[prop(optional, into)] error: Signal<Option<String>>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    /// Input type: "text" (default), "password", "email", "date", "time", "number"
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] required: bool,
    /// ID for the input element, also used by the label
    #[prop(into)]
    id: String,
    #[prop(optional, into)] autocomplete: MaybeProp<String>,
) -> impl IntoView {
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());
    let label_id = id.clone();

    view! {
        <div class="form__group" class:form__group--error=move || error.get().is_some()>
            <label class="form__label" for=label_id>
                {label}
                {required.then_some(" *")}
            </label>
            <input
                id=id
                class="form__input"
                type=input_t
                prop:value=move || value.get()
                placeholder=move || placeholder.get().unwrap_or_default()
                disabled=move || disabled.get()
                autocomplete=move || autocomplete.get().unwrap_or_default()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                on:blur=move |_| {
                    if let Some(handler) = on_blur {
                        handler.run(());
                    }
                }
            />
            {move || error.get().map(|e| view! { <span class="form__error">{e}</span> })}
        </div>
    }
}

use leptos::prelude::*;

/// Labelled textarea with an optional character counter
#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)] on_blur: Option<Callback<()>>,
    #[prop(optional, into)] error: Signal<Option<String>>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] required: bool,
    /// Rows attribute (default 3)
    #[prop(optional)]
    rows: Option<u32>,
    /// Shows "n / max" under the field
    #[prop(optional)]
    max_chars: Option<usize>,
    #[prop(into)] id: String,
) -> impl IntoView {
    let label_id = id.clone();

    view! {
        <div class="form__group" class:form__group--error=move || error.get().is_some()>
            <label class="form__label" for=label_id>
                {label}
                {required.then_some(" *")}
            </label>
            <textarea
                id=id
                class="form__textarea"
                placeholder=move || placeholder.get().unwrap_or_default()
                disabled=move || disabled.get()
                rows=rows.unwrap_or(3)
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                on:blur=move |_| {
                    if let Some(handler) = on_blur {
                        handler.run(());
                    }
                }
            />
            <div class="form__hint-row">
                {move || error.get().map(|e| view! { <span class="form__error">{e}</span> })}
                {max_chars.map(|max| view! {
                    <span class="form__counter">
                        {move || format!("{} / {}", value.with(|v| v.trim().chars().count()), max)}
                    </span>
                })}
            </div>
        </div>
    }
}

use leptos::prelude::*;

/// Labelled select bound to a form field
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    /// Current value
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    /// Options: Vec of (value, label) tuples
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    /// First, empty option ("Seleccione...")
    #[prop(optional, into)]
    placeholder: Option<String>,
    #[prop(optional, into)] error: Signal<Option<String>>,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] required: bool,
    #[prop(into)] id: String,
) -> impl IntoView {
    let label_id = id.clone();

    view! {
        <div class="form__group" class:form__group--error=move || error.get().is_some()>
            <label class="form__label" for=label_id>
                {label}
                {required.then_some(" *")}
            </label>
            <select
                id=id
                class="form__select"
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {placeholder.map(|text| {
                    view! { <option value="" selected=move || value.get().is_empty()>{text}</option> }
                })}
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, label)| {
                        let val_clone = val.clone();
                        let is_selected = move || value.get() == val_clone;
                        view! {
                            <option value=val selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
            {move || error.get().map(|e| view! { <span class="form__error">{e}</span> })}
        </div>
    }
}

use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay + modal surface with a title bar.
///
/// Closes on Escape and on overlay click. An overlay click only counts when
/// both press and release happened on the overlay itself, so selecting text
/// inside the modal and releasing outside does not close it.
#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: Signal<String>,
    /// Called when the modal should close
    on_close: Callback<()>,
    /// Extra class for the modal surface
    #[prop(optional)]
    modal_class: Option<&'static str>,
    /// Action buttons rendered under the content
    #[prop(optional, into)]
    footer: Option<ViewFn>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let key_handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || key_handle.remove());

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get_untracked() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // Defer: the overlay must not be removed during its own click dispatch
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let modal_class = match modal_class {
        Some(cls) => format!("modal {cls}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=move |ev| overlay_mouse_down.set(is_direct_overlay_event(&ev))
            on:click=handle_overlay_click
        >
            <div class=modal_class on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
                {footer.map(|footer| view! { <div class="modal-footer">{footer.run()}</div> })}
            </div>
        </div>
    }
}

/// Yes/no confirmation for destructive actions
#[component]
pub fn ConfirmModal(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(optional, into)] confirm_label: Option<String>,
    /// Disables the buttons while the confirmed action runs
    #[prop(into)]
    busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let confirm_label = confirm_label.unwrap_or_else(|| "Eliminar".to_string());

    view! {
        <Modal
            title=title
            on_close=on_cancel
            modal_class="modal--confirm"
            footer=move || {
                let confirm_label = confirm_label.clone();
                view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_cancel.run(())
                        disabled=busy
                    >
                        "Cancelar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| on_confirm.run(())
                        disabled=busy
                    >
                        {move || if busy.get() { "Procesando...".to_string() } else { confirm_label.clone() }}
                    </Button>
                }
            }
        >
            <p class="modal__message">{message}</p>
        </Modal>
    }
}

/// Outcome shown after an operation finished
#[derive(Debug, Clone, PartialEq)]
pub enum ResultMessage {
    Success(String),
    Error(String),
}

impl ResultMessage {
    pub fn from_result(result: Result<&str, String>) -> Self {
        match result {
            Ok(msg) => ResultMessage::Success(msg.to_string()),
            Err(e) => ResultMessage::Error(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultMessage::Success(_))
    }

    pub fn text(&self) -> &str {
        match self {
            ResultMessage::Success(s) | ResultMessage::Error(s) => s,
        }
    }
}

/// Success/error notice. Closes itself after a few seconds.
#[component]
pub fn ResultModal(
    /// `None` hides the modal
    result: RwSignal<Option<ResultMessage>>,
) -> impl IntoView {
    const AUTO_CLOSE_MS: u32 = 3000;

    Effect::new(move |_| {
        if let Some(shown) = result.get() {
            spawn_local(async move {
                TimeoutFuture::new(AUTO_CLOSE_MS).await;
                // A newer message keeps its own timer; the page may be gone
                let _ = result.try_update(|current| {
                    if current.as_ref() == Some(&shown) {
                        *current = None;
                    }
                });
            });
        }
    });

    move || {
        result.get().map(|message| {
            let success = message.is_success();
            let title = if success { "Operación exitosa" } else { "Error" };
            view! {
                <Modal
                    title=title.to_string()
                    on_close=Callback::new(move |_| result.set(None))
                    modal_class=if success { "modal--result modal--success" } else { "modal--result modal--error" }
                >
                    <div class="result-modal__body">
                        {icon(if success { "check-circle" } else { "alert-circle" })}
                        <p>{message.text().to_string()}</p>
                    </div>
                </Modal>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_message_from_result() {
        let ok = ResultMessage::from_result(Ok("Orden de trabajo creada correctamente"));
        assert!(ok.is_success());
        assert_eq!(ok.text(), "Orden de trabajo creada correctamente");

        let err = ResultMessage::from_result(Err("HTTP 500".to_string()));
        assert!(!err.is_success());
        assert_eq!(err.text(), "HTTP 500");
    }
}

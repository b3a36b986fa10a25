use dioxus::prelude::*;
use dioxus_primitives::toast as prim;

pub use dioxus_primitives::toast::{use_toast, ToastOptions, Toasts};

/// Toast host for the whole app; mount once near the root.
#[component]
pub fn ToastProvider(props: prim::ToastProviderProps) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::ToastProvider { ..props }
    }
}

/// Success toast for a completed action such as a restore or approval.
pub fn toast_done(toasts: Toasts, message: impl Into<String>) {
    toasts.success(message.into(), ToastOptions::new());
}

/// Error toast for a failed action.
pub fn toast_failed(toasts: Toasts, message: impl Into<String>) {
    toasts.error(message.into(), ToastOptions::new());
}

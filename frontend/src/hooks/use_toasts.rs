use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// How long a toast stays on screen.
pub const TOAST_DURATION_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub message: String,
}

pub struct UseToastsResult {
    pub toast: Option<Toast>,
    pub actions: UseToastsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseToastsActions {
    pub show_success: Callback<String>,
    pub show_error: Callback<String>,
    pub dismiss: Callback<()>,
}

/// Transient notification slot. A new toast replaces the current one and
/// clears itself after a few seconds.
#[hook]
pub fn use_toasts() -> UseToastsResult {
    let toast = use_state(|| Option::<Toast>::None);
    // Id of the toast currently on screen. Only the timer whose id still
    // matches may clear the slot, so a replaced toast's timer cannot cut
    // its replacement short.
    let active_id = use_mut_ref(|| Option::<String>::None);

    let show = {
        let toast = toast.clone();
        let active_id = active_id.clone();
        use_callback((), move |(kind, message): (ToastKind, String), _| {
            let id = uuid::Uuid::new_v4().to_string();
            *active_id.borrow_mut() = Some(id.clone());
            toast.set(Some(Toast {
                id: id.clone(),
                kind,
                message,
            }));

            let toast_clear = toast.clone();
            let active_id = active_id.clone();
            spawn_local(async move {
                gloo::timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
                let still_showing = active_id.borrow().as_deref() == Some(id.as_str());
                if still_showing {
                    *active_id.borrow_mut() = None;
                    toast_clear.set(None);
                }
            });
        })
    };

    let show_success = {
        let show = show.clone();
        use_callback((), move |message: String, _| {
            show.emit((ToastKind::Success, message));
        })
    };

    let show_error = {
        let show = show.clone();
        use_callback((), move |message: String, _| {
            show.emit((ToastKind::Error, message));
        })
    };

    let dismiss = {
        let toast = toast.clone();
        let active_id = active_id.clone();
        use_callback((), move |_, _| {
            *active_id.borrow_mut() = None;
            toast.set(None);
        })
    };

    UseToastsResult {
        toast: (*toast).clone(),
        actions: UseToastsActions {
            show_success,
            show_error,
            dismiss,
        },
    }
}

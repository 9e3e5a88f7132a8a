//! Single-slot toast: a new notice replaces the one on screen.

use leptos::prelude::*;
use stockdesk::{Notice, NoticeLevel};

use crate::web::Timeout;

const TOAST_MILLIS: u32 = 3000;

#[derive(Clone, Copy)]
pub struct Toaster {
    notice: RwSignal<Option<Notice>>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
}

impl Toaster {
    fn new() -> Self {
        Self {
            notice: RwSignal::new(None),
            timer: StoredValue::new_local(None),
        }
    }

    pub fn show(&self, notice: Notice) {
        self.notice.set(Some(notice));
        let slot = self.notice;
        // Replacing the old handle cancels its pending dismissal.
        self.timer
            .set_value(Timeout::new(TOAST_MILLIS, move || slot.set(None)));
    }

    pub fn show_opt(&self, notice: Option<Notice>) {
        if let Some(notice) = notice {
            self.show(notice);
        }
    }

    pub fn dismiss(&self) {
        self.timer.set_value(None);
        self.notice.set(None);
    }
}

pub fn provide_toaster() -> Toaster {
    let toaster = Toaster::new();
    provide_context(toaster);
    toaster
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster should be provided")
}

fn alert_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "alert alert-success",
        NoticeLevel::Info => "alert alert-info",
        NoticeLevel::Warning => "alert alert-warning",
        NoticeLevel::Error => "alert alert-error",
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_toaster();

    move || {
        toaster.notice.get().map(|notice| {
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class={alert_class(notice.level)} on:click=move |_| toaster.dismiss()>
                        <span>{notice.message}</span>
                    </div>
                </div>
            }
        })
    }
}

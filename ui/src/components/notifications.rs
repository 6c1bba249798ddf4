// Notification components
use gloo_timers::callback::Timeout;
use leptos::*;

use crate::manager::{Notice, Notifier};

const DISMISS_AFTER_MS: u32 = 4_000;

/// Dismissible banner showing the latest notice.
#[component]
pub fn NoticeBanner(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|current| {
            let class = if current.is_error() {
                "mb-4 flex items-center justify-between rounded-md bg-red-50 p-4 text-sm text-red-800"
            } else {
                "mb-4 flex items-center justify-between rounded-md bg-green-50 p-4 text-sm text-green-800"
            };

            view! {
                <div class=class role="alert">
                    <span>{current.to_string()}</span>
                    <button
                        type="button"
                        class="ml-4 font-semibold"
                        aria-label="Dismiss"
                        on:click=move |_| notice.set(None)
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}

/// Browser side of [`Notifier`]: notices go to the banner signal,
/// confirmation uses `window.confirm`.
#[derive(Clone, Copy)]
pub struct BrowserNotifier {
    notice: RwSignal<Option<Notice>>,
    // bumped on every notice so a stale timer cannot clear a newer one
    shown: StoredValue<u64>,
}

impl BrowserNotifier {
    pub fn new(notice: RwSignal<Option<Notice>>) -> Self {
        Self {
            notice,
            shown: store_value(0),
        }
    }

    /// Puts `notice` on the banner and returns its generation.
    fn show(&self, notice: Notice) -> u64 {
        self.shown.update_value(|generation| *generation += 1);
        self.notice.set(Some(notice));
        self.shown.get_value()
    }

    /// Clears the banner if nothing was shown after `generation`.
    fn dismiss(&self, generation: u64) {
        if self.shown.try_get_value() == Some(generation) {
            self.notice.set(None);
        }
    }
}

impl Notifier for BrowserNotifier {
    fn notify(&self, notice: Notice) {
        let generation = self.show(notice);

        let notifier = *self;
        Timeout::new(DISMISS_AFTER_MS, move || notifier.dismiss(generation)).forget();
    }

    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

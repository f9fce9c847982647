//! Transient notice display.

use leptos::*;

use crate::notice::{NOTICE_TTL, Notice};

/// Shared handle to the on-screen toasts (provided as context).
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<(u64, Notice)>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: create_rw_signal(Vec::new()),
            next_id: store_value(0),
        }
    }

    /// Show each notice and drop it after [`NOTICE_TTL`].
    pub fn show(&self, notices: Vec<Notice>) {
        for notice in notices {
            let id = self.next_id.get_value();
            self.next_id.set_value(id + 1);
            self.items.update(|items| items.push((id, notice)));

            let items = self.items;
            set_timeout(
                move || items.update(|items| items.retain(|(i, _)| *i != id)),
                NOTICE_TTL,
            );
        }
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ToastList(toasts: Toasts) -> impl IntoView {
    view! {
        <div class="toasts">
            <For
                each=move || toasts.items.get()
                key=|(id, _)| *id
                children=|(_, notice)| {
                    view! {
                        <div class=format!("toast {}", notice.level.css_class())>{notice.message}</div>
                    }
                }
            />
        </div>
    }
}

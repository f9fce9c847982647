//! Navigation sidebar and the content region it offsets.

use leptos::*;

use crate::frontend::local_storage::LocalStorage;
use crate::sidebar::{NavEntry, Sidebar, SidebarConfig};

fn nav_entries() -> Vec<NavEntry> {
    vec![
        NavEntry::new("Dashboard", "/"),
        NavEntry::new("New voucher", "/vouchers/new"),
        NavEntry::new("Vouchers", "/vouchers"),
        NavEntry::new("Chart of accounts", "/accounts"),
        NavEntry::new("Third parties", "/third-parties"),
        NavEntry::new("Tax rules", "/rules"),
    ]
}

/// Viewport width in px. Unknown reads as wide.
fn viewport_width() -> u32 {
    window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map_or(u32::MAX, |w| w as u32)
}

#[component]
pub fn SidebarShell(children: Children) -> impl IntoView {
    let sidebar = create_rw_signal(Sidebar::restore(
        SidebarConfig::default(),
        LocalStorage::open(),
        nav_entries(),
        viewport_width(),
    ));

    let resize = window_event_listener(ev::resize, move |_| {
        let width = viewport_width();
        if sidebar.with_untracked(|s| !s.is_collapsed()) {
            sidebar.update(|s| {
                s.on_resize(width);
            });
        }
    });
    on_cleanup(move || resize.remove());

    view! {
        <nav class=move || sidebar.with(|s| s.css_class())>
            <button
                class="sidebar-toggle"
                on:click=move |_| sidebar.update(|s| {
                    s.toggle();
                })
            >
                "☰"
            </button>
            <ul>
                {move || sidebar.with(|s| {
                    s.tooltips()
                        .map(|(entry, tooltip)| {
                            view! {
                                <li>
                                    <a href=entry.href.clone() title=tooltip.map(str::to_string)>
                                        <span class="label">{entry.label.clone()}</span>
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()
                })}
            </ul>
        </nav>
        <div
            class="content"
            style:margin-left=move || format!("{}px", sidebar.with(|s| s.content_offset_px()))
        >
            {children()}
        </div>
    }
}

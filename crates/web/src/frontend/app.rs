//! Leptos application with routing.

use leptos::*;
use leptos_router::*;

use crate::frontend::sidebar_view::SidebarShell;
use crate::frontend::toasts::{ToastList, Toasts};
use crate::frontend::voucher_view::VoucherFormPage;

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let toasts = Toasts::new();
    provide_context(toasts);

    view! {
        <Router>
            <SidebarShell>
                <Routes>
                    <Route path="/" view=VoucherFormPage/>
                    <Route path="/vouchers/new" view=VoucherFormPage/>
                </Routes>
            </SidebarShell>
            <ToastList toasts/>
        </Router>
    }
}

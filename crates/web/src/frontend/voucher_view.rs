//! Voucher entry page.

use chrono::NaiveDate;
use leptos::*;
use motor_client::{AccountingApi, HttpAccountingClient};
use motor_core::{AccountId, ThirdPartyId};
use motor_vouchers::{BalanceStatus, LineDraft, LineId, VoucherType};

use crate::frontend::toasts::Toasts;
use crate::voucher_form::{FormConfig, VoucherForm};

type Form = VoucherForm<HttpAccountingClient>;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for the API served under `/api` on the page's origin.
fn api_client() -> HttpAccountingClient {
    let origin = window().location().origin().unwrap_or_default();
    HttpAccountingClient::new(format!("{origin}/api"))
}

/// Read from the loaded form, or `T::default()` while it is loading.
fn read<T: Default>(form: RwSignal<Option<Form>>, f: impl FnOnce(&Form) -> T) -> T {
    form.with(|slot| slot.as_ref().map(f).unwrap_or_default())
}

/// Apply an edit and show whatever notices it queued.
fn edit(form: RwSignal<Option<Form>>, toasts: Toasts, f: impl FnOnce(&mut Form)) {
    let notices = form
        .try_update(|slot| {
            slot.as_mut().map(|form| {
                f(form);
                form.take_notices()
            })
        })
        .flatten()
        .unwrap_or_default();
    toasts.show(notices);
}

#[component]
pub fn VoucherFormPage() -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    let form: RwSignal<Option<Form>> = create_rw_signal(None);

    spawn_local(async move {
        let today = chrono::Local::now().date_naive();
        let mut loaded = VoucherForm::initialize(api_client(), today, FormConfig::default()).await;
        toasts.show(loaded.take_notices());
        form.set(Some(loaded));
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let mut begun = None;
        edit(form, toasts, |f| {
            begun = Some(f.begin_submit().map(|payload| (payload, f.api().clone())));
        });
        let Some(Ok((payload, api))) = begun else {
            return;
        };

        spawn_local(async move {
            let result = api.create_voucher(&payload).await;
            let mut finished = None;
            edit(form, toasts, |f| finished = Some(f.finish_submit(result)));
            if let Some(Ok(outcome)) = finished {
                let target = outcome.redirect.to;
                set_timeout(
                    move || {
                        if let Err(err) = window().location().set_href(&target) {
                            tracing::warn!(to = %target, error = ?err, "redirect after save failed");
                        }
                    },
                    outcome.redirect.after,
                );
            }
        });
    };

    let line_ids = move || read(form, |f| f.draft().lines().iter().map(LineDraft::id).collect::<Vec<_>>());
    let totals = move || read(form, |f| f.totals());
    let submitting = move || read(form, |f| f.is_submitting());

    view! {
        <div class="voucher-form">
            <h2>"New voucher"</h2>
            {move || form.with(|f| f.is_none()).then(|| view! { <p class="loading">"Loading…"</p> })}

            <form on:submit=on_submit>
                <div class="form-row">
                    <label for="voucher_type">"Type"</label>
                    <select
                        id="voucher_type"
                        on:change=move |ev| {
                            if let Some(t) = VoucherType::parse(&event_target_value(&ev)) {
                                edit(form, toasts, |f| f.set_voucher_type(t));
                            }
                        }
                    >
                        {VoucherType::ALL
                            .into_iter()
                            .map(|t| {
                                view! {
                                    <option
                                        value=t.as_str()
                                        selected=move || read(form, |f| f.draft().voucher_type == t)
                                    >
                                        {t.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>

                    <label for="date">"Date"</label>
                    <input
                        type="date"
                        id="date"
                        prop:value=move || read(form, |f| f.draft().date.format(DATE_FORMAT).to_string())
                        on:input=move |ev| {
                            if let Ok(date) = NaiveDate::parse_from_str(&event_target_value(&ev), DATE_FORMAT) {
                                edit(form, toasts, |f| f.set_date(date));
                            }
                        }
                    />
                </div>

                <div class="form-row">
                    <label for="description">"Description"</label>
                    <input
                        type="text"
                        id="description"
                        prop:value=move || read(form, |f| f.draft().description.clone())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            edit(form, toasts, |f| f.set_description(text));
                        }
                    />

                    <label for="reference">"Reference"</label>
                    <input
                        type="text"
                        id="reference"
                        prop:value=move || read(form, |f| f.draft().reference.clone())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            edit(form, toasts, |f| f.set_reference(text));
                        }
                    />

                    <label for="third_party">"Third party"</label>
                    <select
                        id="third_party"
                        on:change=move |ev| {
                            let party = event_target_value(&ev).parse::<ThirdPartyId>().ok();
                            edit(form, toasts, |f| f.set_third_party(party));
                        }
                    >
                        <option value="">"None"</option>
                        {move || {
                            read(form, |f| f.third_parties().to_vec())
                                .into_iter()
                                .map(|p| {
                                    let id = p.id;
                                    view! {
                                        <option
                                            value=id.to_string()
                                            selected=move || read(form, |f| f.draft().third_party_id == Some(id))
                                        >
                                            {p.label()}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                </div>

                <table class="voucher-lines">
                    <thead>
                        <tr>
                            <th>"Account"</th>
                            <th>"Description"</th>
                            <th>"Debit"</th>
                            <th>"Credit"</th>
                            <th>"Third party"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For each=line_ids key=|id| *id children=move |id| view! { <LineRow form id/> }/>
                    </tbody>
                    <tfoot>
                        <tr>
                            <td colspan="2">"Totals"</td>
                            <td class="total-debit">{move || totals().debit.to_string()}</td>
                            <td class="total-credit">{move || totals().credit.to_string()}</td>
                            <td class="difference">{move || format!("Difference: {}", totals().difference)}</td>
                            <td>
                                <span class=move || format!("status {}", totals().status.as_str())>
                                    {move || match totals().status {
                                        BalanceStatus::Balanced => "Balanced",
                                        BalanceStatus::Unbalanced => "Unbalanced",
                                    }}
                                </span>
                            </td>
                        </tr>
                    </tfoot>
                </table>

                <div class="form-actions">
                    <button type="button" on:click=move |_| edit(form, toasts, |f| f.add_line())>
                        "Add line"
                    </button>
                    <button type="submit" disabled=submitting>
                        {move || if submitting() { "Saving..." } else { "Save voucher" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn LineRow(form: RwSignal<Option<Form>>, id: LineId) -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    let line = move |pick: fn(&LineDraft) -> String| {
        read(form, move |f| f.draft().line(id).map(pick).unwrap_or_default())
    };

    view! {
        <tr>
            <td>
                <select on:change=move |ev| {
                    let account = event_target_value(&ev).parse::<AccountId>().ok();
                    edit(form, toasts, |f| {
                        let _ = f.set_account(id, account);
                    });
                }>
                    <option value="">"Select account"</option>
                    {move || {
                        read(form, |f| f.accounts().to_vec())
                            .into_iter()
                            .map(|a| {
                                let value = a.id.to_string();
                                let current = value.clone();
                                view! {
                                    <option
                                        value=value
                                        selected=move || {
                                            line(|l| l.account_id.map(|a| a.to_string()).unwrap_or_default()) == current
                                        }
                                    >
                                        {a.label()}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </td>
            <td>
                <input
                    type="text"
                    prop:value=move || line(|l| l.description.clone())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        edit(form, toasts, |f| {
                            let _ = f.set_line_description(id, text);
                        });
                    }
                />
            </td>
            <td>
                <input
                    type="text"
                    inputmode="decimal"
                    class="amount debit"
                    prop:value=move || line(|l| l.debit.text().to_string())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        edit(form, toasts, |f| {
                            let _ = f.set_debit(id, text);
                        });
                    }
                />
            </td>
            <td>
                <input
                    type="text"
                    inputmode="decimal"
                    class="amount credit"
                    prop:value=move || line(|l| l.credit.text().to_string())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        edit(form, toasts, |f| {
                            let _ = f.set_credit(id, text);
                        });
                    }
                />
            </td>
            <td>
                <select on:change=move |ev| {
                    let party = event_target_value(&ev).parse::<ThirdPartyId>().ok();
                    edit(form, toasts, |f| {
                        let _ = f.set_line_third_party(id, party);
                    });
                }>
                    <option value="">"None"</option>
                    {move || {
                        read(form, |f| f.third_parties().to_vec())
                            .into_iter()
                            .map(|p| {
                                let party = p.id;
                                view! {
                                    <option
                                        value=party.to_string()
                                        selected=move || {
                                            read(form, |f| {
                                                f.draft().line(id).and_then(|l| l.third_party_id) == Some(party)
                                            })
                                        }
                                    >
                                        {p.label()}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </td>
            <td>
                <button
                    type="button"
                    class="remove-line"
                    on:click=move |_| edit(form, toasts, |f| {
                        let _ = f.remove_line(id);
                    })
                >
                    "✕"
                </button>
            </td>
        </tr>
    }
}

use crate::api::{Account, AccountId, PanelClient};
use crate::components::{AccountCard, AddAccount, Icon, IconKind};
use crate::config::PanelConfig;
use crate::reorder::{step_target, submit_drop, ReorderStep, Selection};
use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

/// Replaces the local list with the backend's and forgets selected ids that
/// are no longer linked. A failure leaves both as they are; the next user
/// action tries again.
fn reload_accounts(
    client: PanelClient,
    mut accounts: Signal<Vec<Account>>,
    mut selection: Signal<Selection>,
) {
    spawn(async move {
        match client.list_accounts().await {
            Ok(list) => {
                info!("loaded {} linked accounts", list.len());
                commit_reload(list, &mut accounts.write(), &mut selection.write());
            }
            Err(err) => warn!("could not load accounts: {err}"),
        }
    });
}

fn commit_reload(list: Vec<Account>, accounts: &mut Vec<Account>, selection: &mut Selection) {
    selection.retain_linked(&list);
    *accounts = list;
}

#[component]
pub fn Dashboard(user_email: String) -> Element {
    let client = use_context::<PanelClient>();
    let config = use_context::<PanelConfig>();
    let mut accounts = use_signal(Vec::<Account>::new);
    let mut selection = use_signal(Selection::default);
    let mut drag_source = use_signal(|| None::<AccountId>);
    let mut drop_target = use_signal(|| None::<AccountId>);

    {
        let client = client.clone();
        use_effect(move || reload_accounts(client.clone(), accounts, selection));
    }

    let commit_drop = {
        let client = client.clone();
        move |dragged: AccountId, target: Option<AccountId>| {
            let save = submit_drop(&client, &mut accounts.write(), dragged, target);
            if let Some(save) = save {
                spawn(save);
            }
        }
    };

    let on_drop = {
        let mut commit_drop = commit_drop.clone();
        move |target: AccountId| {
            let Some(source) = drag_source() else {
                return;
            };
            drag_source.set(None);
            drop_target.set(None);
            commit_drop(source, Some(target));
        }
    };

    let on_remove = {
        let client = client.clone();
        move |account_id: AccountId| {
            accounts.with_mut(|list| list.retain(|a| a.id != account_id));
            selection.with_mut(|s| s.retain_linked(&accounts.peek()));
            let client = client.clone();
            spawn(async move {
                if let Err(err) = client.delete_account(account_id).await {
                    warn!("removing account {account_id} failed: {err}");
                }
                reload_accounts(client, accounts, selection);
            });
        }
    };

    let on_sign_out = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn(async move { client.logout().await });
        }
    };

    let list = accounts();
    let linked = list.len();
    let max_accounts = config.max_accounts;
    let can_link_more = config.can_link_more(linked);
    let selected_count = selection().len();

    rsx! {
        div { class: "min-h-screen bg-zinc-950 text-white",
            header { class: "flex flex-wrap items-center justify-between gap-4 px-6 py-5 border-b border-zinc-800/60",
                div { class: "flex items-center gap-3",
                    div { class: "w-10 h-10 rounded-xl bg-gradient-to-br from-emerald-500 to-teal-600 flex items-center justify-center shadow-lg shadow-emerald-500/20",
                        Icon { kind: IconKind::Music, class: "w-5 h-5 text-white" }
                    }
                    div {
                        h1 { class: "text-lg font-bold", "Spotify Control Panel" }
                        p { class: "text-xs text-zinc-500",
                            "{linked}/{max_accounts} accounts"
                            if selected_count > 0 {
                                " · {selected_count} selected"
                            }
                        }
                    }
                }
                div { class: "flex items-center gap-3",
                    if can_link_more {
                        AddAccount {}
                    }
                    span { class: "text-sm text-zinc-400", "{user_email}" }
                    button {
                        r#type: "button",
                        class: "flex items-center gap-2 px-3 py-2 rounded-lg text-sm text-zinc-300 hover:text-white hover:bg-zinc-800 transition-colors",
                        onclick: on_sign_out,
                        Icon { kind: IconKind::SignOut, class: "w-4 h-4" }
                        "Sign out"
                    }
                }
            }

            main { class: "px-6 py-6",
                div { class: "grid gap-5 sm:grid-cols-2 xl:grid-cols-3",
                    for (id , account) in list.iter().map(|a| (a.id, a.clone())) {
                        AccountCard {
                            key: "{id}",
                            selected: selection().contains(id),
                            dragging: drag_source() == Some(id),
                            drop_target: drop_target() == Some(id) && drag_source() != Some(id),
                            account,
                            on_remove: on_remove.clone(),
                            on_toggle_select: move |id| selection.with_mut(|s| s.toggle(id)),
                            on_drag_start: move |id| drag_source.set(Some(id)),
                            on_drag_enter: move |id| drop_target.set(Some(id)),
                            on_drop: on_drop.clone(),
                            on_step: {
                                let mut commit_drop = commit_drop.clone();
                                move |step: ReorderStep| {
                                    let target = step_target(&accounts.peek(), id, step);
                                    if target.is_some() {
                                        commit_drop(id, target);
                                    }
                                }
                            },
                            on_drag_end: move |_| {
                                drag_source.set(None);
                                drop_target.set(None);
                            },
                        }
                    }
                }
                if list.is_empty() {
                    p { class: "mt-16 text-center text-sm text-zinc-500",
                        "No accounts connected yet. Click the + button to get started."
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reorder::ordered_ids;

    fn account(id: AccountId) -> Account {
        Account {
            id,
            provider_user_id: format!("user-{id}"),
            display_name: format!("Account {id}"),
        }
    }

    #[test]
    fn reload_drops_selection_of_unlinked_accounts() {
        let mut accounts = vec![account(1), account(2), account(3)];
        let mut selection = Selection::default();
        selection.toggle(2);
        selection.toggle(3);

        commit_reload(vec![account(1), account(3)], &mut accounts, &mut selection);

        assert_eq!(ordered_ids(&accounts), vec![1, 3]);
        assert!(!selection.contains(2));
        assert!(selection.contains(3));
        assert_eq!(selection.len(), 1);
    }
}

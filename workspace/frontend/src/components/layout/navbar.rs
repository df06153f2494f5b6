use yew::prelude::*;

use crate::api_client;
use crate::hooks::{use_fetch_with_refetch, FetchState};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let (health, recheck) = use_fetch_with_refetch(api_client::health);

    let badge = match &*health {
        FetchState::Success(h) if h.is_ok() => html! {
            <span class="badge badge-success gap-1"><i class="fas fa-circle text-xs"></i>{"Service online"}</span>
        },
        FetchState::Success(h) => html! {
            <span class="badge badge-warning">{format!("Service {}", h.status)}</span>
        },
        FetchState::Error(_) => html! {
            <span class="badge badge-error gap-1"><i class="fas fa-circle text-xs"></i>{"Service offline"}</span>
        },
        FetchState::Loading | FetchState::NotStarted => html! {
            <span class="badge badge-ghost">{"Checking..."}</span>
        },
    };

    let on_recheck = Callback::from(move |_| {
        log::debug!("Re-checking service health");
        recheck.emit(());
    });

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-none lg:hidden">
                <label aria-label="open sidebar" class="btn btn-square btn-ghost" for="my-drawer">
                    <i class="fas fa-bars text-xl"></i>
                </label>
            </div>
            <div class="flex-1 px-4">
                <h1 class="text-xl font-bold" id="page-title">{ &props.title }</h1>
            </div>
            <div class="flex-none gap-2">
                {badge}
                <button class="btn btn-ghost btn-circle btn-sm" title="Re-check" onclick={on_recheck}>
                    <i class="fas fa-sync-alt"></i>
                </button>
            </div>
        </div>
    }
}

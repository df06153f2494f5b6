use common::ModelInfo;
use yew::prelude::*;

use crate::api_client;
use crate::components::error::ErrorDisplay;
use crate::components::loading::Loading;
use crate::hooks::{use_fetch_with_refetch, FetchState};

#[derive(Clone, PartialEq)]
enum Notice {
    Deleted(String),
    Failed(String),
}

#[function_component(Models)]
pub fn models() -> Html {
    let (fetch_state, refetch) = use_fetch_with_refetch(api_client::list_models);
    let notice = use_state(|| None::<Notice>);

    let on_delete = {
        let refetch = refetch.clone();
        let notice = notice.clone();

        Callback::from(move |ticker: String| {
            let refetch = refetch.clone();
            let notice = notice.clone();
            log::info!("Deleting saved model for {}", ticker);

            wasm_bindgen_futures::spawn_local(async move {
                match api_client::delete_model(&ticker).await {
                    Ok(response) => {
                        notice.set(Some(Notice::Deleted(response.deleted)));
                        refetch.emit(());
                    }
                    Err(err) => notice.set(Some(Notice::Failed(err.to_string()))),
                }
            });
        })
    };

    let notice_html = match &*notice {
        Some(Notice::Deleted(path)) => html! {
            <div class="alert alert-success"><span>{format!("Deleted {}", path)}</span></div>
        },
        Some(Notice::Failed(message)) => html! {
            <div class="alert alert-error"><span>{format!("Error: {}", message)}</span></div>
        },
        None => html! {},
    };

    let body = match &*fetch_state {
        FetchState::Loading | FetchState::NotStarted => html! { <Loading text={"Loading saved models...".to_string()} /> },
        FetchState::Error(message) => {
            let refetch = refetch.clone();
            html! { <ErrorDisplay message={message.clone()} on_retry={Some(Callback::from(move |_| refetch.emit(())))} /> }
        }
        FetchState::Success(response) if response.models.is_empty() => html! {
            <div class="text-center py-8 text-gray-500">
                <i class="fas fa-database text-4xl mb-4 opacity-50"></i>
                <p>{"No saved models yet."}</p>
                <p class="text-sm mt-2">{"Models are saved after the first prediction for a ticker."}</p>
            </div>
        },
        FetchState::Success(response) => html! {
            <table class="table">
                <thead>
                    <tr><th>{"Ticker"}</th><th>{"Path"}</th><th></th></tr>
                </thead>
                <tbody>
                    { for response.models.iter().map(|model| model_row(model, on_delete.clone())) }
                </tbody>
            </table>
        },
    };

    html! {
        <div class="flex flex-col gap-4">
            {notice_html}
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">{"Saved models"}</h3>
                    {body}
                </div>
            </div>
        </div>
    }
}

fn model_row(model: &ModelInfo, on_delete: Callback<String>) -> Html {
    let ticker = model.ticker.clone();
    let onclick = Callback::from(move |_| on_delete.emit(ticker.clone()));

    html! {
        <tr key={model.ticker.clone()}>
            <td class="font-semibold">{&model.ticker}</td>
            <td class="font-mono text-sm">{&model.path}</td>
            <td class="text-right">
                <button class="btn btn-error btn-xs" onclick={onclick}>
                    <i class="fas fa-trash"></i>{" Delete"}
                </button>
            </td>
        </tr>
    }
}

use chart::ViewState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub state: ViewState,
}

#[function_component(StatusPanel)]
pub fn status_panel(props: &Props) -> Html {
    let state = &props.state;
    let status_class = if state.failed {
        "text-error"
    } else if state.busy {
        "text-info"
    } else {
        "text-success"
    };

    html! {
        <div class="flex flex-col gap-2">
            {if let Some(metrics) = &state.metrics {
                html! {
                    <div class="stats shadow">
                        <div class="stat">
                            <div class="stat-title">{"Ticker"}</div>
                            <div class="stat-value text-2xl">{&metrics.ticker}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">{"RMSE"}</div>
                            <div class="stat-value text-2xl">{metrics.rmse_text()}</div>
                            {if let Some(path) = &metrics.model_path {
                                html! { <div class="stat-desc">{format!("Model: {}", path)}</div> }
                            } else {
                                html! {}
                            }}
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}
            {if state.status.is_empty() {
                html! {}
            } else {
                html! { <p id="status" class={classes!("text-sm", status_class)}>{&state.status}</p> }
            }}
        </div>
    }
}

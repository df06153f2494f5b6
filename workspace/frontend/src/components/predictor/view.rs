use chart::{ViewController, ViewState};
use common::PredictionForm;
use yew::prelude::*;

use super::form::PredictionFormView;
use super::metrics::StatusPanel;
use crate::api_client::PredictionClient;
use crate::settings;
use crate::surface::PageSurface;

const CHART_DIV: &str = "forecast-chart";

#[function_component(Predictor)]
pub fn predictor() -> Html {
    let view_state = use_state(ViewState::default);

    let on_submit = {
        let view_state = view_state.clone();

        Callback::from(move |form: PredictionForm| {
            if view_state.busy {
                log::warn!("Submission ignored while a prediction is running");
                return;
            }

            let view_state = view_state.clone();
            let config = settings::get_settings().chart_config();

            wasm_bindgen_futures::spawn_local(async move {
                let surface = PageSurface::new(CHART_DIV, view_state);
                let mut controller = ViewController::new(PredictionClient, surface, config);
                let state = controller.submit_form(&form).await;
                log::debug!("Submission finished: {}", state.status);
            });
        })
    };

    html! {
        <div class="flex flex-col gap-6">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h3 class="card-title">{"Train & forecast"}</h3>
                    <PredictionFormView busy={view_state.busy} on_submit={on_submit} />
                </div>
            </div>
            <StatusPanel state={(*view_state).clone()} />
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div id={CHART_DIV} style="width:100%; min-height:560px;"></div>
                </div>
            </div>
        </div>
    }
}

use common::{
    PredictionForm, DEFAULT_BATCH_SIZE, DEFAULT_EPOCHS, DEFAULT_FUTURE_DAYS, DEFAULT_LOOKBACK,
};
use wasm_bindgen::JsCast;
use web_sys::{FormData, HtmlFormElement, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub busy: bool,
    pub on_submit: Callback<PredictionForm>,
}

fn text_field(data: &FormData, name: &str) -> Option<String> {
    data.get(name).as_string()
}

/// `None` when the page has no such checkbox.
fn checkbox(form: &HtmlFormElement, name: &str) -> Option<bool> {
    form.query_selector(&format!("input[name='{}']", name))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.checked())
}

fn read_form(form: &HtmlFormElement) -> Option<PredictionForm> {
    let data = match FormData::new_with_form(form) {
        Ok(data) => data,
        Err(e) => {
            log::error!("Could not read prediction form: {:?}", e);
            return None;
        }
    };

    Some(PredictionForm {
        ticker: text_field(&data, "ticker").unwrap_or_default(),
        start: text_field(&data, "start").unwrap_or_default(),
        end: text_field(&data, "end").unwrap_or_default(),
        lookback: text_field(&data, "lookback"),
        epochs: text_field(&data, "epochs"),
        future_days: text_field(&data, "future_days"),
        batch_size: text_field(&data, "batch_size"),
        force_retrain: checkbox(form, "force_retrain"),
        show_rangeslider: checkbox(form, "show_rangeslider"),
        smooth_predicted: checkbox(form, "smooth_predicted"),
        show_recent_markers: checkbox(form, "show_recent_markers"),
    })
}

#[function_component(PredictionFormView)]
pub fn prediction_form(props: &Props) -> Html {
    let form_ref = use_node_ref();

    let on_submit = {
        let on_submit = props.on_submit.clone();
        let form_ref = form_ref.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                if let Some(values) = read_form(&form) {
                    log::debug!("Prediction form submitted: {:?}", values);
                    on_submit.emit(values);
                }
            }
        })
    };

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    html! {
        <form ref={form_ref} onsubmit={on_submit} class="space-y-4">
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Ticker"}</span></label>
                    <input type="text" name="ticker" class="input input-bordered w-full" value="AAPL" required={true} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Start"}</span></label>
                    <input type="date" name="start" class="input input-bordered w-full" value="2018-01-01" />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"End"}</span></label>
                    <input type="date" name="end" class="input input-bordered w-full" value={today} />
                </div>
            </div>

            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Lookback"}</span></label>
                    <input type="number" min="1" name="lookback" class="input input-bordered w-full" value={DEFAULT_LOOKBACK.to_string()} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Epochs"}</span></label>
                    <input type="number" min="1" name="epochs" class="input input-bordered w-full" value={DEFAULT_EPOCHS.to_string()} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Future days"}</span></label>
                    <input type="number" min="0" name="future_days" class="input input-bordered w-full" value={DEFAULT_FUTURE_DAYS.to_string()} />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Batch size"}</span></label>
                    <input type="number" min="1" name="batch_size" class="input input-bordered w-full" value={DEFAULT_BATCH_SIZE.to_string()} />
                </div>
            </div>

            <div class="flex flex-wrap gap-6">
                <label class="label cursor-pointer gap-2">
                    <input type="checkbox" name="show_rangeslider" class="toggle toggle-sm" checked={true} />
                    <span class="label-text">{"Range slider"}</span>
                </label>
                <label class="label cursor-pointer gap-2">
                    <input type="checkbox" name="smooth_predicted" class="toggle toggle-sm" checked={true} />
                    <span class="label-text">{"Smooth predictions"}</span>
                </label>
                <label class="label cursor-pointer gap-2">
                    <input type="checkbox" name="show_recent_markers" class="toggle toggle-sm" checked={true} />
                    <span class="label-text">{"Highlight recent prices"}</span>
                </label>
                <label class="label cursor-pointer gap-2">
                    <input type="checkbox" name="force_retrain" class="checkbox checkbox-sm" />
                    <span class="label-text">{"Force retrain"}</span>
                </label>
            </div>

            <button type="submit" class="btn btn-primary" disabled={props.busy}>
                {if props.busy {
                    html! { <><span class="loading loading-spinner loading-sm"></span>{" Running"}</> }
                } else {
                    html! { <><i class="fas fa-play"></i>{" Train & Predict"}</> }
                }}
            </button>
        </form>
    }
}

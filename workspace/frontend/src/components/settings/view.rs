use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

use crate::settings::{self, AppSettings};

fn apply_form(data: &FormData, settings: &mut AppSettings) {
    let field = |name: &str| data.get(name).as_string().map(|v| v.trim().to_string());

    if let Some(host) = field("api_host").filter(|h| !h.is_empty()) {
        settings.api_host = host;
    }
    if let Some(port) = field("api_port").and_then(|p| p.parse().ok()) {
        settings.api_port = port;
    }
    if let Some(path) = field("api_path") {
        settings.api_path = path;
    }
    settings.api_use_https = field("api_use_https").is_some();
    if let Some(count) = field("recent_markers").and_then(|c| c.parse().ok()) {
        settings.recent_markers = count;
    }
    if let Some(window) = field("smoothing_window")
        .and_then(|w| w.parse::<usize>().ok())
        .filter(|w| *w > 0)
    {
        settings.smoothing_window = window;
    }
}

#[function_component(SettingsView)]
pub fn settings_view() -> Html {
    let current = settings::get_settings();
    let form_ref = use_node_ref();
    let error = use_state(|| None::<String>);

    let on_submit = {
        let form_ref = form_ref.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let Ok(data) = FormData::new_with_form(&form) else {
                error.set(Some("Could not read the settings form".to_string()));
                return;
            };

            settings::update_settings(|s| apply_form(&data, s));
            let updated = settings::get_settings();
            log::info!("Saving settings: {:?}", updated);

            if let Err(e) = updated.save_to_storage() {
                log::error!("Failed to persist settings: {:?}", e);
                error.set(Some("Could not save settings to local storage".to_string()));
                return;
            }
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        })
    };

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
            <div class="card bg-base-100 shadow">
                <form ref={form_ref} onsubmit={on_submit} class="card-body">
                    <h2 class="card-title">{"Connection"}</h2>
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"Host"}</span></label>
                        <input type="text" name="api_host" class="input input-bordered w-full" value={current.api_host.clone()} />
                    </div>
                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Port"}</span></label>
                            <input type="number" name="api_port" class="input input-bordered w-full" value={current.api_port.to_string()} />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Path prefix"}</span></label>
                            <input type="text" name="api_path" class="input input-bordered w-full" value={current.api_path.clone()} />
                        </div>
                    </div>
                    <label class="label cursor-pointer justify-start gap-2">
                        <input type="checkbox" name="api_use_https" class="checkbox checkbox-sm" checked={current.api_use_https} />
                        <span class="label-text">{"Use HTTPS"}</span>
                    </label>

                    <h2 class="card-title mt-4">{"Chart"}</h2>
                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Recent markers"}</span></label>
                            <input type="number" min="0" name="recent_markers" class="input input-bordered w-full" value={current.recent_markers.to_string()} />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Smoothing window"}</span></label>
                            <input type="number" min="1" name="smoothing_window" class="input input-bordered w-full" value={current.smoothing_window.to_string()} />
                        </div>
                    </div>

                    {if let Some(message) = &*error {
                        html! { <div class="alert alert-error mt-2"><span>{message}</span></div> }
                    } else {
                        html! {}
                    }}

                    <div class="card-actions justify-end mt-4">
                        <button type="submit" class="btn btn-primary">{"Save & Reload"}</button>
                    </div>
                </form>
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Current endpoint"}</h2>
                    <p class="font-mono text-sm break-all">{current.api_base_url()}</p>
                    <p class="text-sm text-gray-500">{format!("Log level: {}", current.log_level)}</p>
                </div>
            </div>
        </div>
    }
}

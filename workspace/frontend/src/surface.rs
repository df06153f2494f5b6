use chart::{Chart, ChartError, ChartSurface, ViewState};
use wasm_bindgen::prelude::*;
use yew::UseStateHandle;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Plotly, js_name = newPlot)]
    fn new_plot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = Plotly)]
    fn purge(div_id: &str) -> Result<JsValue, JsValue>;
}

fn parse_json(part: &str, json: &str) -> Result<JsValue, ChartError> {
    js_sys::JSON::parse(json).map_err(|e| ChartError::Render(format!("invalid {} JSON: {:?}", part, e)))
}

/// Draws into a page `<div>` through the global `Plotly` object and mirrors
/// the controller state into a Yew state handle.
pub struct PageSurface {
    div_id: String,
    state: UseStateHandle<ViewState>,
}

impl PageSurface {
    pub fn new(div_id: impl Into<String>, state: UseStateHandle<ViewState>) -> Self {
        Self {
            div_id: div_id.into(),
            state,
        }
    }
}

impl ChartSurface for PageSurface {
    fn publish(&mut self, state: &ViewState) {
        log::debug!("Publishing view state: busy={} status={}", state.busy, state.status);
        self.state.set(state.clone());
    }

    fn clear(&mut self) {
        if let Err(e) = purge(&self.div_id) {
            log::warn!("Could not clear chart {}: {:?}", self.div_id, e);
        }
    }

    fn draw(&mut self, chart: &Chart) -> chart::Result<()> {
        let json = chart.to_plot_json()?;
        let data = parse_json("data", &json.data)?;
        let layout = parse_json("layout", &json.layout)?;
        let config = parse_json("config", &json.config)?;

        new_plot(&self.div_id, data, layout, config)
            .map_err(|e| ChartError::Render(format!("{:?}", e)))?;

        log::info!("Chart drawn into #{} with {} series", self.div_id, chart.series.len());
        Ok(())
    }
}

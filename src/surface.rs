use chart::{Chart, ChartError, ChartSurface, PlotJson, ViewState};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const CHART_DIV: &str = "forecast-chart";

/// Renders charts into a standalone HTML file and reports status on stdout.
pub struct HtmlSurface {
    path: PathBuf,
}

impl HtmlSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartSurface for HtmlSurface {
    fn publish(&mut self, state: &ViewState) {
        if let Some(metrics) = &state.metrics {
            println!("{}", metrics.summary());
            if let Some(model_path) = &metrics.model_path {
                println!("Model: {}", model_path);
            }
        }
        println!("{}", state.status);
        debug!(busy = state.busy, failed = state.failed, "Status published");
    }

    fn clear(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed previous chart"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "Could not remove previous chart: {}", e),
        }
    }

    fn draw(&mut self, chart: &Chart) -> chart::Result<()> {
        let json = chart.to_plot_json()?;
        let html = render_page(&chart.layout.title.text, &json);

        std::fs::write(&self.path, html)
            .map_err(|e| ChartError::Render(format!("{}: {}", self.path.display(), e)))?;

        info!(path = %self.path.display(), series = chart.series.len(), "Chart written");
        Ok(())
    }
}

/// JSON inside a `<script>` element must not contain a closing tag.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_page(title: &str, json: &PlotJson) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="{div}" style="width:100%;"></div>
<script>
Plotly.newPlot("{div}", {data}, {layout}, {config});
</script>
</body>
</html>
"#,
        title = html_escape(title),
        cdn = PLOTLY_CDN,
        div = CHART_DIV,
        data = script_safe(&json.data),
        layout = script_safe(&json.layout),
        config = script_safe(&json.config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::test_utils::test_utils::{spawn_stub_service, StubBehaviour};
    use chart::{ChartConfig, DisplayToggles, ViewController};
    use common::PredictionForm;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stockcast-{}-{}.html", name, std::process::id()))
    }

    #[test]
    fn test_script_safe_breaks_closing_tags() {
        assert_eq!(script_safe(r#"{"name":"</script>"}"#), r#"{"name":"<\/script>"}"#);
    }

    #[test]
    fn test_page_embeds_all_parts() {
        let json = PlotJson {
            data: "[1]".to_string(),
            layout: "{\"height\":2}".to_string(),
            config: "{\"responsive\":true}".to_string(),
        };
        let page = render_page("A<B", &json);
        assert!(page.contains("<title>A&lt;B</title>"));
        assert!(page.contains(r#"Plotly.newPlot("forecast-chart", [1], {"height":2}, {"responsive":true});"#));
    }

    #[tokio::test]
    async fn test_prediction_end_to_end_writes_chart() {
        let base = spawn_stub_service(StubBehaviour::Succeed).await;
        let path = scratch_file("success");

        let mut controller = ViewController::new(
            ApiClient::new(base),
            HtmlSurface::new(&path),
            ChartConfig::default(),
        );
        let form = PredictionForm {
            ticker: "ABC".to_string(),
            start: "2024-01-01".to_string(),
            end: "2024-01-31".to_string(),
            future_days: Some("5".to_string()),
            ..Default::default()
        };
        let state = controller.submit_form(&form).await.clone();

        assert!(!state.failed, "{}", state.status);
        assert_eq!(state.metrics.unwrap().rmse_text(), "0.99");
        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.contains("Predicted (Future 5 days)"));
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_service_error_leaves_no_chart() {
        let base = spawn_stub_service(StubBehaviour::ModelFailed).await;
        let path = scratch_file("failure");
        std::fs::write(&path, "stale chart").unwrap();

        let mut controller = ViewController::new(
            ApiClient::new(base),
            HtmlSurface::new(&path),
            ChartConfig::default(),
        );
        let state = controller
            .submit(
                PredictionForm {
                    ticker: "ABC".to_string(),
                    ..Default::default()
                }
                .to_request(),
                DisplayToggles::default(),
            )
            .await
            .clone();

        assert_eq!(state.status, "Error: model failed");
        assert!(!state.busy);
        assert!(!path.exists());
    }
}

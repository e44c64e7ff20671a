use anyhow::{Context, Result};
use env_insights::{config::Settings, dashboard::Dashboard, data::Datasets};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let settings = Settings::from_env()?;
    let data = Datasets::load(&settings.data_dir).with_context(|| {
        format!("loading tables from {}", settings.data_dir.display())
    })?;

    let mut dash = Dashboard::new()?;
    dash.draw(&data).context("drawing the figure")?;

    match &settings.output {
        Some(path) => dash.save(path, settings.dpi)
            .with_context(|| format!("saving {}", path.display()))?,
        None => {
            info!("showing figure");
            dash.show()?
        }
    }
    Ok(())
}

use tracing::{info, error};

use trade_plots::config::PlotConfig;
use trade_plots::dataset;
use trade_plots::services::chart_service::PngChartRenderer;
use trade_plots::services::plot_service::{self, RunSummary};
use trade_plots::utils::logging;
use trade_plots::utils::PlotError;

fn run(config: &PlotConfig) -> Result<RunSummary, PlotError> {
    info!(
        "Loading trades from {} and candles from {}",
        config.data_file.display(),
        config.dataset_file().display()
    );
    let dataset = dataset::load_dataset(config)?;

    plot_service::plot_all(config, &dataset, &PngChartRenderer)
}

fn main() {
    dotenv::dotenv().ok();

    logging::init_tracing();

    let config = PlotConfig::default();
    info!(
        "📈 Plotting {} {} trades, {} extra rows per side",
        config.dataset.symbol, config.dataset.interval, config.extra_rows
    );

    match run(&config) {
        Ok(summary) => {
            info!("Done: {} charts in {}", summary.rendered, config.output_dir.display());
        }
        Err(e) => {
            error!("Plotting failed: {}", e);
            std::process::exit(1);
        }
    }
}

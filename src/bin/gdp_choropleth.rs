//! Animated GDP-per-capita choropleth, one frame per year, opened in the browser.

use geoviz_board::charts::HtmlPage;
use geoviz_board::config::GAPMINDER_URL;
use geoviz_board::data::load_gapminder;
use geoviz_board::view::{ChoroplethBinder, ChoroplethBinding, ChoroplethStyle};

fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;

    let df = match load_gapminder(GAPMINDER_URL) {
        Ok(df) => {
            log::info!("Data loaded successfully.");
            df
        }
        Err(e) => {
            log::error!("Error loading data: {}", e);
            std::process::exit(1);
        }
    };

    let binder = ChoroplethBinder::new(ChoroplethBinding::gapminder(), ChoroplethStyle::default());
    let spec = binder.bind(&df)?;
    log::info!("Bound {} frames", spec.frames.len());

    let html = HtmlPage::choropleth(&spec)?;
    let path = HtmlPage::write_temp("gdp_choropleth.html", &html)?;
    log::info!("Wrote {}", path.display());
    HtmlPage::open(&path)?;
    Ok(())
}

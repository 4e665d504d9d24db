use anyhow::Result;

use tempo_cards::{App, CardField, JsonFileStore, TextCardFactory, TextShell};
use tempo_core::Config;
use tempo_forecast::MockForecastSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    tempo_core::init()?;

    let config = Config::load_validated()?;

    // Headless card host: restore the saved selection (or seed the first
    // run) and render the view-model the UI layer would bind to.
    let mut app = App::new(
        Box::new(MockForecastSource),
        Box::new(JsonFileStore::new(&config.config_dir)),
        Box::new(TextCardFactory),
        Box::new(TextShell::default()),
    );
    app.bootstrap()?;

    for key in app.cards().keys() {
        if let Some(card) = app.cards().get(&key) {
            tracing::info!(
                "Card {}: {} {}°",
                key,
                card.field(CardField::Location).unwrap_or("?"),
                card.field(CardField::Temperature).unwrap_or("?"),
            );
        }
    }
    tracing::info!("Tracking {} selected cities", app.selected_cities().len());

    // Static shell: serves the UI assets until shutdown
    tempo_server::run(&config.server).await
}

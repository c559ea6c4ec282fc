use std::io;

use anyhow::Context;

use kiosk_catalog::AssetLibrary;
use kiosk_console::Console;
use kiosk_events::InMemoryEventBus;
use kiosk_infra::{JsonFileStore, KioskConfig, LibraryService, OrderingService, SystemClock};
use kiosk_library::LibraryEvent;
use kiosk_ordering::CartEvent;

fn main() -> anyhow::Result<()> {
    kiosk_observability::init();

    let config = KioskConfig::from_env();
    tracing::info!(
        data_file = %config.data_file.display(),
        assets_dir = %config.assets_dir.display(),
        loan_days = config.loan_days,
        "starting kiosk console"
    );

    let ordering = OrderingService::with_seed_menu(InMemoryEventBus::<CartEvent>::new(), SystemClock);
    let library = LibraryService::open(
        JsonFileStore::new(&config.data_file),
        InMemoryEventBus::<LibraryEvent>::new(),
        SystemClock,
        AssetLibrary::new(&config.assets_dir),
    )
    .with_loan_days(config.loan_days);

    let mut console = Console::new(ordering, library, io::stdout().lock());
    console
        .run(io::stdin().lock())
        .context("console session ended with an error")
}

//! `debug` subcommand: the debug console in text form.

use proofreader_page_content::Document;
use proofreader_runtime::{ping, run_self_test, snapshot};
use tracing::warn;

use crate::app::App;

pub(crate) async fn handle_debug_command(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    println!("== Storage");
    match snapshot(app.settings.as_ref()).await {
        Ok(snap) => println!("{}", snap),
        Err(e) => {
            warn!(error = %e, "storage snapshot failed");
            println!("Error loading storage: {}", e);
        }
    }

    println!();
    println!("== Self-test");
    let result = run_self_test(&app.router).await;
    println!("{}", result.unwrap_or_else(|message| message));

    println!();
    println!("== Content script");
    let tab = app.host.open(Document::new());
    let status = ping(app.host.as_ref(), Some(tab)).await;
    println!("{}", status.message);
    app.host.close(tab);

    if app.badge.is_visible() {
        println!();
        println!("Badge: {} ({})", app.badge.text(), app.badge.title());
    }
    Ok(())
}

//! `proofread` subcommand: run the context-menu flow against a scratch page.

use proofreader_page_content::Document;
use proofreader_protocols::Tone;
use proofreader_protocols::settings::save_tone;
use tracing::info;

use crate::app::App;

/// Handle the proofread subcommand.
pub(crate) async fn handle_proofread_command(
    app: &App,
    text: &str,
    select: Option<(usize, usize)>,
    tone: Option<Tone>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(tone) = tone {
        save_tone(app.settings.as_ref(), tone).await?;
        info!(%tone, "tone preference updated");
    }

    let (start, end) = select.unwrap_or((0, text.chars().count()));
    let mut doc = Document::new();
    let field = doc.add_text_field(None, text);
    if !doc.select_in_field(field, start, end) {
        return Err(format!("selection {}:{} is outside the text", start, end).into());
    }
    let tab = app.host.open(doc);

    let selected = app.host.context_menu(tab).unwrap_or_default();
    info!(tab, chars = selected.chars().count(), "proofreading selection");

    let outcome = app.router.on_context_menu(&selected, Some(tab)).await;
    let value = app
        .host
        .with_document(tab, |doc| doc.text_of(field).map(str::to_string))
        .flatten()
        .unwrap_or_default();

    match outcome {
        Ok(corrected) => {
            info!(chars = corrected.chars().count(), "replacement applied");
            println!("{}", value);
            Ok(())
        }
        Err(err) => {
            for notice in app.host.notices(tab) {
                eprintln!("{}", notice.message());
            }
            Err(err.into())
        }
    }
}

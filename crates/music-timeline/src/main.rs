mod bootstrap;

use anyhow::Result;
use timeline_core::settings::Settings;
use timeline_data::reader;
use timeline_data::session::TimelineSession;
use timeline_ui::app::App;
use timeline_ui::timeline_view::Notification;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    let app_dir = bootstrap::ensure_directories()?;
    let tui = !settings.json_output() && !settings.dump_categories;
    let log_file = bootstrap::resolve_log_file(settings.log_file.as_deref(), tui, &app_dir);
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Music Timeline v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Category: {}, Theme: {}",
        settings.view.label(),
        settings.category.label(),
        settings.theme
    );

    let table = settings.category_table()?;

    if settings.dump_categories {
        println!("{}", table.to_json_pretty()?);
        return Ok(());
    }

    let mut session = TimelineSession::new(table);
    let mut startup_error = None;

    if let Some(ref path) = settings.file {
        match reader::read_export(path).await {
            Ok(export) => session.adopt(export),
            // Without a screen to show it on, a bad file is fatal.
            Err(e) if settings.json_output() => return Err(e.into()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load export");
                startup_error = Some(Notification::error(e.to_string()));
            }
        }
    }

    if let Some(ref name) = settings.playlist {
        if !session.playlist_options().iter().any(|p| p.name == *name) {
            tracing::warn!(playlist = %name, "playlist not found or has no items");
        }
        session.select_playlist(name.clone());
    }
    session.set_filter(settings.category);
    session.set_granularity(settings.view);

    if settings.json_output() {
        println!("{}", serde_json::to_string_pretty(session.result())?);
        return Ok(());
    }

    let mut app = App::new(&settings.theme, session, settings.file.clone());
    if let Some(notification) = startup_error {
        app.notify(notification);
    }

    // The loop exits on 'q' / Esc / Ctrl+C inside the TUI.
    app.run().await?;

    Ok(())
}

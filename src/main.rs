// Event Countdown
// Main entry point

use std::time::Instant;

use anyhow::Result;
use event_countdown::models::countdown::LifecycleState;
use event_countdown::models::settings::CountdownSettings;
use event_countdown::services::countdown::{
    CountdownConfig, CountdownPage, RenderTarget, SystemClock, Transition,
};
use event_countdown::services::notification::NotificationService;
use event_countdown::services::settings::SettingsService;
use event_countdown::ui_terminal::TerminalRenderTarget;
use event_countdown::utils::date::format_in_zone;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Event Countdown");

    let settings_service = SettingsService::from_default_path();
    let settings = settings_service.load()?;
    let config = CountdownConfig::from_settings(&settings)?;

    log::info!(
        "Counting down to {} ({}h event)",
        format_in_zone(config.target.at(), settings.display_timezone.as_deref()),
        settings.event_duration_hours
    );

    let render = TerminalRenderTarget::new(
        std::io::stdout(),
        settings.output,
        settings.event_title.clone(),
    );
    let notifications = NotificationService::new(settings.notifications);
    let mut page = CountdownPage::new(config, SystemClock, render, settings.viewport_width);

    page.init(Instant::now());
    if handle_transition(&mut page, &notifications, &settings) {
        page.shutdown();
        return Ok(());
    }

    loop {
        let Some(deadline) = page.next_deadline() else {
            log::info!("Countdown has no running timer; exiting");
            break;
        };

        tokio::select! {
            _ = tokio::time::sleep_until(deadline.into()) => {
                page.run_due(Instant::now());
                if handle_transition(&mut page, &notifications, &settings) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted; stopping countdown");
                break;
            }
        }
    }

    page.shutdown();
    Ok(())
}

/// Announces a pending lifecycle transition. Returns true once the event is over.
fn handle_transition<R: RenderTarget>(
    page: &mut CountdownPage<SystemClock, R>,
    notifications: &NotificationService,
    settings: &CountdownSettings,
) -> bool {
    if let Some(transition @ Transition { to, .. }) = page.take_transition() {
        let message = match to {
            LifecycleState::Live => settings.live_message.as_str(),
            LifecycleState::Ended => settings.ended_message.as_str(),
            LifecycleState::Pending => "",
        };
        notifications.notify_transition(&settings.event_title, transition, message);
    }

    page.controller()
        .is_some_and(|controller| controller.state() == LifecycleState::Ended)
}

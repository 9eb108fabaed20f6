use super::PendingAlert;
use notify_rust::Notification;
use std::io::{self, Write};
use tracing::warn;

/// Shows fired alerts as desktop notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopDelivery;

impl DesktopDelivery {
    pub fn deliver(&self, alert: &PendingAlert) {
        let shown = Notification::new()
            .summary(&alert.title)
            .body(&alert.body)
            .show();

        if let Err(e) = shown {
            warn!(id = %alert.id, "desktop notification failed: {}", e);
            bell(alert);
        }
    }
}

fn bell(alert: &PendingAlert) {
    eprintln!("\x07⏰ {}: {}", alert.title, alert.body);
    let _ = io::stderr().flush();
}

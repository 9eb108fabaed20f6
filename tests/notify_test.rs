use anyhow::Result;
use grind_timer::error::TimerError;
use grind_timer::notify::Notifier;
use grind_timer::timer::store::{
    add_timer_to_new_section, delete_timer, restart_timer, update_timer,
};
use grind_timer::timer::{Collection, DurationParts, NotificationId};

const NOW: i64 = 1_700_000_000_000;

/// Records gateway calls in order.
#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
    next: u32,
    fail_schedule: bool,
}

impl Notifier for Recorder {
    fn schedule(&mut self, title: &str, body: &str, fires_at_ms: i64)
        -> Result<Option<NotificationId>> {
        if self.fail_schedule {
            anyhow::bail!("scheduler unavailable");
        }
        self.next += 1;
        let id = format!("n{}", self.next);
        self.calls
            .push(format!("schedule {} {}|{}|{}", id, title, body, fires_at_ms - NOW));
        Ok(Some(NotificationId(id)))
    }

    fn cancel(&mut self, id: &NotificationId) -> Result<()> {
        self.calls.push(format!("cancel {}", id));
        Ok(())
    }
}

fn seeded(recorder: &mut Recorder) -> Collection {
    add_timer_to_new_section(
        &Collection::default(),
        "ESO",
        "horse",
        DurationParts::new(0, 1, 0),
        NOW,
        recorder,
    )
    .unwrap()
}

#[test]
fn test_schedule_on_create() {
    let mut recorder = Recorder::default();
    let collection = seeded(&mut recorder);

    assert_eq!(recorder.calls, vec!["schedule n1 ESO|horse is done|3600000"]);
    assert_eq!(
        collection.sections[0].timers[0].notification_id,
        Some(NotificationId("n1".to_string()))
    );
}

#[test]
fn test_restart_cancels_before_scheduling() {
    let mut recorder = Recorder::default();
    let collection = seeded(&mut recorder);
    recorder.calls.clear();

    restart_timer(&collection, 0, 0, NOW, &mut recorder).unwrap();
    assert_eq!(
        recorder.calls,
        vec!["cancel n1", "schedule n2 ESO|horse is done|3600000"]
    );
}

#[test]
fn test_update_cancels_before_scheduling() {
    let mut recorder = Recorder::default();
    let collection = seeded(&mut recorder);
    recorder.calls.clear();

    update_timer(
        &collection,
        0,
        0,
        "saddle",
        DurationParts::new(0, 0, 5),
        NOW,
        &mut recorder,
    )
    .unwrap();
    assert_eq!(
        recorder.calls,
        vec!["cancel n1", "schedule n2 ESO|saddle is done|300000"]
    );
}

#[test]
fn test_delete_cancels_only() {
    let mut recorder = Recorder::default();
    let collection = seeded(&mut recorder);
    recorder.calls.clear();

    delete_timer(&collection, 0, 0, &mut recorder).unwrap();
    assert_eq!(recorder.calls, vec!["cancel n1"]);
}

#[test]
fn test_rejected_update_touches_no_alert() {
    let mut recorder = Recorder::default();
    let collection = seeded(&mut recorder);
    recorder.calls.clear();

    let err = update_timer(
        &collection,
        0,
        0,
        "saddle",
        DurationParts::default(),
        NOW,
        &mut recorder,
    )
    .unwrap_err();
    assert!(err.is_validation());

    let err = restart_timer(&collection, 2, 0, NOW, &mut recorder).unwrap_err();
    assert!(matches!(err, TimerError::SectionIndex { .. }));

    assert!(recorder.calls.is_empty());
}

#[test]
fn test_gateway_failure_propagates() {
    let mut recorder = Recorder {
        fail_schedule: true,
        ..Default::default()
    };
    let err = add_timer_to_new_section(
        &Collection::default(),
        "ESO",
        "horse",
        DurationParts::new(0, 1, 0),
        NOW,
        &mut recorder,
    )
    .unwrap_err();

    assert!(matches!(err, TimerError::Gateway(_)));
    assert_eq!(err.to_string(), "scheduler unavailable");
}

#[test]
fn test_update_reports_schedule_failure_after_cancel() {
    let mut recorder = Recorder::default();
    let collection = seeded(&mut recorder);
    recorder.calls.clear();
    recorder.fail_schedule = true;

    let err = update_timer(
        &collection,
        0,
        0,
        "saddle",
        DurationParts::new(0, 0, 5),
        NOW,
        &mut recorder,
    )
    .unwrap_err();

    assert!(matches!(err, TimerError::Gateway(_)));
    assert_eq!(recorder.calls, vec!["cancel n1"]);
    assert_eq!(collection.sections[0].timers[0].name, "horse");
}

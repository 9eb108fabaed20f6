use crate::timer::{Collection, Progress, Section, Timer, timer_progress};
use serde::Serialize;
use termtree::Tree;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Text progress bar, e.g. `███░░░░░░░`.
pub fn progress_bar(percent: u8, width: u16) -> String {
    let width = usize::from(width);
    let filled = (usize::from(percent.min(100)) * width).div_ceil(100);
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, width - filled));
    bar
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView<'a> {
    pub index: usize,
    pub name: &'a str,
    pub duration: u64,
    pub end_time: i64,
    pub progress: Progress,
}

#[derive(Debug, Serialize)]
pub struct SectionView<'a> {
    pub index: usize,
    pub id: u32,
    pub name: &'a str,
    pub timers: Vec<TimerView<'a>>,
}

/// Collection with progress evaluated at `now_ms`, for JSON output.
pub fn views(collection: &Collection, now_ms: i64) -> Vec<SectionView<'_>> {
    collection
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| section_view(index, section, now_ms))
        .collect()
}

fn section_view(index: usize, section: &Section, now_ms: i64) -> SectionView<'_> {
    SectionView {
        index,
        id: section.id,
        name: &section.name,
        timers: section
            .timers
            .iter()
            .enumerate()
            .map(|(i, timer)| TimerView {
                index: i,
                name: &timer.name,
                duration: timer.duration,
                end_time: timer.end_time,
                progress: timer_progress(timer, now_ms),
            })
            .collect(),
    }
}

fn timer_line(index: usize, timer: &Timer, now_ms: i64, bar_width: u16) -> String {
    let progress = timer_progress(timer, now_ms);
    format!(
        "[{}] {} ({}) {} {:>3}% {}",
        index,
        timer.name,
        progress.total_label,
        progress_bar(progress.percent, bar_width),
        progress.percent,
        progress.remaining_label
    )
}

/// Sections as a tree, one leaf per timer.
pub fn build_tree(collection: &Collection, now_ms: i64, bar_width: u16) -> Tree<String> {
    let done = collection
        .sections
        .iter()
        .flat_map(|s| &s.timers)
        .filter(|t| timer_progress(t, now_ms).is_done())
        .count();
    let header = match done {
        0 => format!("Timers ({})", collection.timer_count()),
        n => format!("Timers ({}, {} done)", collection.timer_count(), n),
    };
    let mut root = Tree::new(header);

    for (index, section) in collection.sections.iter().enumerate() {
        let mut node = Tree::new(format!("[{}] {}", index, section.name));
        for (i, timer) in section.timers.iter().enumerate() {
            node.push(Tree::new(timer_line(i, timer, now_ms, bar_width)));
        }
        root.push(node);
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::duration::MS_PER_HOUR;

    fn sample(now: i64) -> Collection {
        Collection::new(vec![Section {
            id: 1,
            name: "ESO".to_string(),
            timers: vec![
                Timer {
                    name: "horse".to_string(),
                    duration: 2 * MS_PER_HOUR,
                    end_time: now + MS_PER_HOUR as i64,
                    notification_id: None,
                },
                Timer {
                    name: "cotton".to_string(),
                    duration: MS_PER_HOUR,
                    end_time: now - 5,
                    notification_id: None,
                },
            ],
        }])
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0, 4), "░░░░");
        assert_eq!(progress_bar(100, 4), "████");
        assert_eq!(progress_bar(50, 4), "██░░");
        assert_eq!(progress_bar(1, 4), "█░░░");
    }

    #[test]
    fn test_tree_contains_progress() {
        let now = 1_700_000_000_000;
        let rendered = build_tree(&sample(now), now, 10).to_string();

        assert!(rendered.contains("Timers (2, 1 done)"));
        assert!(rendered.contains("[0] ESO"));
        assert!(rendered.contains("[0] horse (0d 2h 0m) █████░░░░░  50% 0d 1h 0m"));
        assert!(rendered.contains("[1] cotton (0d 1h 0m) ██████████ 100% done"));
    }

    #[test]
    fn test_views_serialize() {
        let now = 1_700_000_000_000;
        let collection = sample(now);
        let value = serde_json::to_value(views(&collection, now)).unwrap();

        assert_eq!(value[0]["name"], "ESO");
        assert_eq!(value[0]["timers"][0]["progress"]["percent"], 50);
        assert_eq!(value[0]["timers"][1]["progress"]["remainingLabel"], "done");
        assert_eq!(value[0]["timers"][1]["endTime"], now - 5);
    }
}

use crate::prelude::VisibleSetObserver;
use crate::record::{GlobePoint, SarRecord, SurfaceType, VisibleSet};
use crate::telemetry::LogManager;
use serde::Serialize;

/// Intensity classification shared by point colors and stats buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntensityBand {
    High,
    Medium,
    Low,
}

impl IntensityBand {
    pub const HIGH_ABOVE: f64 = 0.8;
    pub const MEDIUM_ABOVE: f64 = 0.5;

    pub fn classify(intensity: f64) -> Self {
        if intensity > Self::HIGH_ABOVE {
            IntensityBand::High
        } else if intensity > Self::MEDIUM_ABOVE {
            IntensityBand::Medium
        } else {
            IntensityBand::Low
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            IntensityBand::High => "#ff4444",
            IntensityBand::Medium => "#ffaa44",
            IntensityBand::Low => "#44ff44",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            IntensityBand::High => [0xff, 0x44, 0x44],
            IntensityBand::Medium => [0xff, 0xaa, 0x44],
            IntensityBand::Low => [0x44, 0xff, 0x44],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IntensityBand::High => "High Intensity",
            IntensityBand::Medium => "Medium Intensity",
            IntensityBand::Low => "Low Intensity",
        }
    }
}

pub const TOTAL_POINTS: &str = "Total Points";

fn surface_label(surface: SurfaceType) -> &'static str {
    match surface {
        SurfaceType::Urban => "Urban Areas",
        SurfaceType::Forest => "Forest Areas",
        SurfaceType::Water => "Water Areas",
        SurfaceType::Agriculture => "Agriculture Areas",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub label: &'static str,
    pub count: usize,
}

/// Counts real observations: total, one bucket per intensity band, then one
/// bucket per surface type that occurs at least once.
pub fn summarize_records<'a, I>(records: I) -> Vec<StatEntry>
where
    I: IntoIterator<Item = &'a SarRecord>,
{
    let mut total = 0;
    let mut bands = [0usize; 3];
    let mut surfaces = [0usize; SurfaceType::ALL.len()];

    for record in records {
        total += 1;
        let slot = match IntensityBand::classify(record.intensity) {
            IntensityBand::High => 0,
            IntensityBand::Medium => 1,
            IntensityBand::Low => 2,
        };
        bands[slot] += 1;
        if let Some(surface) = record.surface_type {
            if let Some(pos) = SurfaceType::ALL.iter().position(|s| *s == surface) {
                surfaces[pos] += 1;
            }
        }
    }

    let mut entries = vec![
        StatEntry {
            label: TOTAL_POINTS,
            count: total,
        },
        StatEntry {
            label: IntensityBand::High.label(),
            count: bands[0],
        },
        StatEntry {
            label: IntensityBand::Medium.label(),
            count: bands[1],
        },
        StatEntry {
            label: IntensityBand::Low.label(),
            count: bands[2],
        },
    ];
    entries.extend(
        SurfaceType::ALL
            .iter()
            .zip(surfaces)
            .filter(|(_, count)| *count > 0)
            .map(|(surface, count)| StatEntry {
                label: surface_label(*surface),
                count,
            }),
    );
    entries
}

/// Same as [`summarize_records`] over a rendered point layer; highlight markers are skipped.
pub fn summarize_points(points: &[GlobePoint]) -> Vec<StatEntry> {
    summarize_records(points.iter().filter_map(GlobePoint::observation))
}

/// Text panel fully rebuilt from each published visible set.
#[derive(Debug, Default)]
pub struct StatsPanel {
    entries: Vec<StatEntry>,
    revision: u64,
}

impl StatsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[StatEntry] {
        &self.entries
    }

    pub fn count(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.count)
    }

    pub fn total(&self) -> usize {
        self.count(TOTAL_POINTS).unwrap_or(0)
    }

    /// Number of times the panel has been rebuilt.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn render(&mut self, visible: &VisibleSet) {
        self.entries = summarize_records(visible.iter());
        self.revision += 1;
        LogManager::new("stats").detail(&format!(
            "rebuilt panel rev {} with {} points",
            self.revision,
            self.total()
        ));
    }
}

impl VisibleSetObserver for StatsPanel {
    fn on_visible_set(&mut self, visible: &VisibleSet) {
        self.render(visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::batch::fixtures::mixed_records;
    use crate::record::{HighlightMarker, RecordBatch};

    #[test]
    fn band_boundaries_are_exclusive() {
        assert_eq!(IntensityBand::classify(0.81), IntensityBand::High);
        assert_eq!(IntensityBand::classify(0.8), IntensityBand::Medium);
        assert_eq!(IntensityBand::classify(0.51), IntensityBand::Medium);
        assert_eq!(IntensityBand::classify(0.5), IntensityBand::Low);
        assert_eq!(IntensityBand::classify(0.0), IntensityBand::Low);
    }

    #[test]
    fn buckets_sum_to_total() {
        let records = mixed_records();
        let entries = summarize_records(records.iter());
        let count = |label: &str| entries.iter().find(|e| e.label == label).unwrap().count;
        assert_eq!(count(TOTAL_POINTS), 5);
        assert_eq!(
            count("High Intensity") + count("Medium Intensity") + count("Low Intensity"),
            5
        );
        assert_eq!(count("High Intensity"), 2);
    }

    #[test]
    fn surface_buckets_only_when_present() {
        let records = mixed_records();
        let labels: Vec<&str> = summarize_records(records.iter())
            .iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                TOTAL_POINTS,
                "High Intensity",
                "Medium Intensity",
                "Low Intensity",
                "Urban Areas",
                "Water Areas"
            ]
        );
    }

    #[test]
    fn highlight_markers_are_not_counted() {
        let mut points: Vec<GlobePoint> = mixed_records()
            .into_iter()
            .map(GlobePoint::Observation)
            .collect();
        points.push(GlobePoint::Highlight(HighlightMarker::japan_center()));
        let entries = summarize_points(&points);
        assert_eq!(entries[0].count, 5);
        assert_eq!(entries[1].count, 2);
    }

    #[test]
    fn panel_replaces_entries_on_every_render() {
        let batch = RecordBatch::new(mixed_records());
        let mut panel = StatsPanel::new();
        panel.render(&VisibleSet::all(&batch));
        assert_eq!(panel.total(), 5);

        panel.render(&VisibleSet::default());
        assert_eq!(panel.total(), 0);
        assert_eq!(panel.entries().len(), 4);
        assert_eq!(panel.revision(), 2);
    }
}

use slidekit_ui::PxSize;
use tracing::{debug, trace};

/// The three regions whose sizes the slider's pixel math depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutRegion {
    /// The outer container; its width bounds thumb travel.
    Container,
    /// The track drawn behind the thumb.
    Track,
    /// The draggable thumb.
    Thumb,
}

impl LayoutRegion {
    fn slot(self) -> usize {
        match self {
            LayoutRegion::Container => 0,
            LayoutRegion::Track => 1,
            LayoutRegion::Thumb => 2,
        }
    }
}

/// Container, track and thumb sizes published together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSnapshot {
    /// Container size.
    pub container: PxSize,
    /// Track size.
    pub track: PxSize,
    /// Thumb size.
    pub thumb: PxSize,
}

impl LayoutSnapshot {
    /// Distance the thumb's left edge can travel: container width minus
    /// thumb width. May be zero or negative for a cramped layout.
    pub fn thumb_travel(&self) -> f32 {
        self.container.width - self.thumb.width
    }
}

/// What [`LayoutTracker::record_measurement`] did with a measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureOutcome {
    /// Same size as already stored; nothing changed.
    Unchanged,
    /// Stored, but other regions are still unmeasured.
    Stored,
    /// Stored, and a complete snapshot is available.
    Published(LayoutSnapshot),
}

/// Collects region measurements until all three are known.
#[derive(Debug, Default, Clone)]
pub struct LayoutTracker {
    sizes: [Option<PxSize>; 3],
    ready: bool,
}

impl LayoutTracker {
    /// Creates a tracker with nothing measured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a measurement for `region`.
    ///
    /// Re-delivering an identical size is a no-op. Once every region has a
    /// size, each change publishes a full snapshot.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn record_measurement(&mut self, region: LayoutRegion, size: PxSize) -> MeasureOutcome {
        let size = size.sanitized();
        let slot = &mut self.sizes[region.slot()];
        if *slot == Some(size) {
            trace!("duplicate measurement ignored");
            return MeasureOutcome::Unchanged;
        }
        *slot = Some(size);

        match self.snapshot_parts() {
            Some(snapshot) => {
                if !self.ready {
                    debug!(?snapshot, "slider layout ready");
                }
                self.ready = true;
                MeasureOutcome::Published(snapshot)
            }
            None => MeasureOutcome::Stored,
        }
    }

    /// Whether all three regions have been measured at least once.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The stored size for `region`, if any.
    pub fn size_of(&self, region: LayoutRegion) -> Option<PxSize> {
        self.sizes[region.slot()]
    }

    /// The latest complete snapshot, once ready.
    pub fn snapshot(&self) -> Option<LayoutSnapshot> {
        if self.ready {
            self.snapshot_parts()
        } else {
            None
        }
    }

    fn snapshot_parts(&self) -> Option<LayoutSnapshot> {
        match self.sizes {
            [Some(container), Some(track), Some(thumb)] => Some(LayoutSnapshot {
                container,
                track,
                thumb,
            }),
            _ => None,
        }
    }
}

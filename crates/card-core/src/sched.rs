//! Frame and timer scheduling seam.
//!
//! Animation controllers never call browser APIs directly. They ask a
//! [`Scheduler`] for a frame or a timeout and get back a [`TaskId`]; the host
//! later reports the fired task back to the controller, which ignores ids it is
//! no longer waiting for. On the web the scheduler wraps
//! `requestAnimationFrame`/`setTimeout`; on the host [`ManualScheduler`] runs
//! a virtual clock.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u32);

pub trait Scheduler {
    /// Ask for one callback on the next animation frame.
    fn request_frame(&mut self) -> TaskId;
    /// Ask for one callback after `delay_ms` milliseconds.
    fn set_timeout(&mut self, delay_ms: f64) -> TaskId;
    /// Drop a pending task; unknown or already-fired ids are ignored.
    fn cancel(&mut self, task: TaskId);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fired {
    Frame { id: TaskId, at: f64 },
    Timeout { id: TaskId, at: f64 },
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Frame,
    Timeout,
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    id: TaskId,
    due: f64,
    kind: Kind,
}

/// Deterministic virtual-clock scheduler.
///
/// Frames are due one `frame_interval_ms` after they are requested; changing
/// the interval between frames simulates jitter, and stalling frames
/// simulates a frozen render loop while timers keep running.
#[derive(Debug)]
pub struct ManualScheduler {
    now: f64,
    frame_interval_ms: f64,
    frames_stalled: bool,
    next_id: u32,
    pending: Vec<Pending>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(1000.0 / 60.0)
    }
}

impl ManualScheduler {
    pub fn new(frame_interval_ms: f64) -> Self {
        Self {
            now: 0.0,
            frame_interval_ms,
            frames_stalled: false,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn set_frame_interval(&mut self, ms: f64) {
        self.frame_interval_ms = ms.max(0.0);
    }

    /// While stalled, requested frames never come due.
    pub fn set_frames_stalled(&mut self, stalled: bool) {
        self.frames_stalled = stalled;
    }

    /// Number of tasks waiting to fire.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| matches!(p.kind, Kind::Frame))
            .count()
    }

    pub fn pending_timeouts(&self) -> usize {
        self.pending
            .iter()
            .filter(|p| matches!(p.kind, Kind::Timeout))
            .count()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to it.
    /// When nothing is due the clock moves to `until` and `None` is returned.
    pub fn next_due(&mut self, until: f64) -> Option<Fired> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i);
        match idx {
            Some(i) => {
                let p = self.pending.remove(i);
                self.now = self.now.max(p.due);
                Some(match p.kind {
                    Kind::Frame => Fired::Frame { id: p.id, at: self.now },
                    Kind::Timeout => Fired::Timeout { id: p.id, at: self.now },
                })
            }
            None => {
                self.now = self.now.max(until);
                None
            }
        }
    }

    fn alloc(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> TaskId {
        let id = self.alloc();
        let due = if self.frames_stalled {
            f64::INFINITY
        } else {
            self.now + self.frame_interval_ms
        };
        self.pending.push(Pending {
            id,
            due,
            kind: Kind::Frame,
        });
        id
    }

    fn set_timeout(&mut self, delay_ms: f64) -> TaskId {
        let id = self.alloc();
        self.pending.push(Pending {
            id,
            due: self.now + delay_ms.max(0.0),
            kind: Kind::Timeout,
        });
        id
    }

    fn cancel(&mut self, task: TaskId) {
        self.pending.retain(|p| p.id != task);
    }
}

/// Host timer handles for one-shot delayed changes that have not fired yet,
/// so a reset can clear exactly those.
#[derive(Debug, Default)]
pub struct PendingTimers {
    handles: Vec<i32>,
}

impl PendingTimers {
    pub fn track(&mut self, handle: i32) {
        self.handles.push(handle);
    }

    /// Forget a handle whose callback has run.
    pub fn fired(&mut self, handle: i32) {
        self.handles.retain(|h| *h != handle);
    }

    /// Hand back every outstanding handle for cancellation.
    pub fn drain(&mut self) -> Vec<i32> {
        std::mem::take(&mut self.handles)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

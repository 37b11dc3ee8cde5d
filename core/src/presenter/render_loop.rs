/// Lifecycle of the per-frame render callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Explicit start/stop lifecycle for the frame loop. A stopped loop never restarts.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn start(&mut self) -> bool {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
            true
        } else {
            false
        }
    }

    /// Returns true only for the call that actually cancelled a running loop.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = LoopState::Stopped;
        was_running
    }

    /// Claims the next frame index, or `None` when the loop is not running.
    pub fn begin_frame(&mut self) -> Option<u64> {
        if self.is_running() {
            self.frames += 1;
            Some(self.frames)
        } else {
            None
        }
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_only_while_running() {
        let mut render_loop = RenderLoop::new();
        assert_eq!(render_loop.begin_frame(), None);
        assert!(render_loop.start());
        assert_eq!(render_loop.begin_frame(), Some(1));
        assert_eq!(render_loop.begin_frame(), Some(2));
        assert!(render_loop.stop());
        assert_eq!(render_loop.begin_frame(), None);
        assert_eq!(render_loop.frames(), 2);
    }

    #[test]
    fn stop_is_reported_once_and_never_restarts() {
        let mut render_loop = RenderLoop::new();
        render_loop.start();
        assert!(render_loop.stop());
        assert!(!render_loop.stop());
        assert!(!render_loop.start());
        assert_eq!(render_loop.state(), LoopState::Stopped);
    }

    #[test]
    fn stopping_an_idle_loop_cancels_nothing() {
        let mut render_loop = RenderLoop::new();
        assert!(!render_loop.stop());
        assert!(!render_loop.start());
    }
}

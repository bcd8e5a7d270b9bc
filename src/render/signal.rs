/// Sink for "the scene changed, draw again" notifications.
///
/// The engine calls it once per completed edit, including edits that only partly succeeded.
pub trait RenderSignal {
    /// Request a re-render of the scene.
    fn request_render(&mut self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Render signal that counts requests.
pub struct RenderCounter {
    /// Number of requests received so far.
    pub requests: u64,
}

impl RenderCounter {
    /// Counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSignal for RenderCounter {
    fn request_render(&mut self) {
        self.requests += 1;
        tracing::trace!(requests = self.requests, "render requested");
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Render signal that ignores requests.
pub struct NullRender;

impl RenderSignal for NullRender {
    fn request_render(&mut self) {}
}

#[cfg(test)]
#[path = "../../tests/unit/render/signal.rs"]
mod tests;

//! Fakes shared by this crate's tests.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, ThreadId};

use eaf_common::Size;
use image::Rgba;
use tracing_subscriber::fmt::MakeWriter;

use crate::target::{RenderTarget, Snapshot};

/// Marker painted at (0, 0) so tests can tell a rendered snapshot apart
/// from a plain background fill.
pub const MARK: Rgba<u8> = Rgba([255, 0, 0, 255]);

#[derive(Default)]
pub struct RecordingTarget {
    renders: AtomicUsize,
    destroys: AtomicUsize,
    resizes: Mutex<Vec<Size>>,
    rendered: Mutex<Vec<(ThreadId, Size)>>,
}

impl RecordingTarget {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn weak(self: &Arc<Self>) -> Weak<dyn RenderTarget> {
        let weak: Weak<RecordingTarget> = Arc::downgrade(self);
        weak
    }

    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    pub fn destroys(&self) -> usize {
        self.destroys.load(Ordering::SeqCst)
    }

    pub fn resizes(&self) -> Vec<Size> {
        self.resizes.lock().unwrap().clone()
    }

    /// Thread and image size of every render, in call order.
    pub fn rendered(&self) -> Vec<(ThreadId, Size)> {
        self.rendered.lock().unwrap().clone()
    }
}

impl RenderTarget for RecordingTarget {
    fn render_into(&self, image: &mut Snapshot) {
        self.renders.fetch_add(1, Ordering::SeqCst);
        let size = Size::new(image.width(), image.height());
        self.rendered
            .lock()
            .unwrap()
            .push((thread::current().id(), size));
        image.put_pixel(0, 0, MARK);
    }

    fn destroy(&self) {
        self.destroys.fetch_add(1, Ordering::SeqCst);
    }

    fn resize(&self, size: Size) {
        self.resizes.lock().unwrap().push(size);
    }
}

/// In-memory log sink for checking diagnostic lines.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Run `f` with a `fmt` subscriber that writes into this sink.
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

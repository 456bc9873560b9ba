use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use solvergen::engine::progress::{Progress, ProgressCallback};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::fmt::MakeWriter;

const SPINNER_TICK_MS: u64 = 80;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(target);
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb_guard.reset();
                    pb_guard.set_style(Self::spinner_style());
                    pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb_guard.set_message(name.to_string());
                }
                Progress::PhaseFinish => {
                    pb_guard.disable_steady_tick();
                    let done = format!("✓ {}", pb_guard.message());
                    pb_guard.finish_with_message(done);
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// A log writer that hides the spinner while each event is printed to stderr.
    pub fn log_writer(&self) -> ProgressLogWriter<fn() -> io::Stderr> {
        self.log_writer_with(io::stderr as fn() -> io::Stderr)
    }

    fn log_writer_with<M>(&self, inner: M) -> ProgressLogWriter<M>
    where
        M: for<'w> MakeWriter<'w>,
    {
        ProgressLogWriter {
            pb: self.pb.clone(),
            inner,
        }
    }

    /// Clears whatever the spinner last drew.
    pub fn finish(&self) {
        if let Ok(pb) = self.pb.lock() {
            pb.finish_and_clear();
        }
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// `MakeWriter` for the console log layer.
///
/// Every event is buffered and written to `inner` in one piece inside
/// [`ProgressBar::suspend`], so log lines never interleave with spinner redraws.
pub struct ProgressLogWriter<M> {
    pb: Arc<Mutex<ProgressBar>>,
    inner: M,
}

pub struct SuspendedLine<'a, M>
where
    M: for<'w> MakeWriter<'w>,
{
    sink: &'a ProgressLogWriter<M>,
    buf: Vec<u8>,
}

impl<'a, M> MakeWriter<'a> for ProgressLogWriter<M>
where
    M: for<'w> MakeWriter<'w> + 'a,
{
    type Writer = SuspendedLine<'a, M>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendedLine {
            sink: self,
            buf: Vec::new(),
        }
    }
}

impl<M> Write for SuspendedLine<'_, M>
where
    M: for<'w> MakeWriter<'w>,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<M> Drop for SuspendedLine<'_, M>
where
    M: for<'w> MakeWriter<'w>,
{
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let emit = || {
            self.sink.inner.make_writer().write_all(&self.buf).ok();
        };
        match self.sink.pb.lock() {
            Ok(pb) => pb.suspend(emit),
            Err(_) => emit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = hidden_handler();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_phase_lifecycle() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Writing manifest",
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Writing manifest");
            assert!(!pb.is_finished());
        }

        callback(Progress::PhaseFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.message(), "✓ Writing manifest");
        }

        callback(Progress::Message("Reusing existing project".into()));
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Reusing existing project");
        }
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Thread Test",
            });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Thread Test");
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn log_lines_are_written_while_a_phase_is_running() {
        let handler = hidden_handler();
        let callback = handler.get_callback();
        let buffer = SharedBuffer::default();
        let sink = buffer.clone();
        let writer = handler.log_writer_with(move || sink.clone());

        callback(Progress::PhaseStart {
            name: "Assembling entry point",
        });
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            warn!(kind = "polytope", "Unsupported constraint kind.");
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("WARN"));
        assert!(output.contains("Unsupported constraint kind."));

        let pb = handler.pb.lock().unwrap();
        assert!(!pb.is_finished());
        assert_eq!(pb.message(), "Assembling entry point");
    }

    #[test]
    fn log_writer_survives_poisoned_progress_bar() {
        let handler = hidden_handler();
        let buffer = SharedBuffer::default();
        let sink = buffer.clone();
        let writer = handler.log_writer_with(move || sink.clone());

        let pb = handler.pb.clone();
        let _ = thread::spawn(move || {
            let _guard = pb.lock().unwrap();
            panic!("poison the progress bar");
        })
        .join();

        writer.make_writer().write_all(b"still logged\n").unwrap();
        assert_eq!(
            String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap(),
            "still logged\n"
        );
    }
}

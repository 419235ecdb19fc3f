use crate::prelude::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub(crate) const TRIMMED_BYTES: &[u8] = b"trimmed video";

#[derive(Debug)]
pub(crate) struct MockFfmpeg {
    duration: Duration,
    write_output: bool,
    fail_encode: Option<&'static str>,
    encode_delay: Option<Duration>,
    running: AtomicUsize,
    peak_running: AtomicUsize,
    probes_log: Mutex<Vec<Utf8PathBuf>>,
    args_log: Mutex<Vec<Vec<String>>>,
}

impl MockFfmpeg {
    /// Every probed input appears to last for `duration`
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            duration,
            write_output: true,
            fail_encode: None,
            encode_delay: None,
            running: AtomicUsize::new(0),
            peak_running: AtomicUsize::new(0),
            probes_log: Default::default(),
            args_log: Default::default(),
        }
    }

    /// ffmpeg "succeeds", but doesn't write anything
    pub(crate) fn without_output(mut self) -> Self {
        self.write_output = false;
        self
    }

    pub(crate) fn failing(mut self, err: &'static str) -> Self {
        self.fail_encode = Some(err);
        self
    }

    /// Every encode takes `delay`, so concurrent encodes overlap
    pub(crate) fn slow(mut self, delay: Duration) -> Self {
        self.encode_delay = Some(delay);
        self
    }

    /// The largest number of encodes that were running at the same time
    pub(crate) fn peak_running(&self) -> usize {
        self.peak_running.load(Ordering::SeqCst)
    }

    pub(crate) fn probes_log(&self) -> Vec<Utf8PathBuf> {
        self.probes_log.lock().unwrap().clone()
    }

    pub(crate) fn args_log(&self) -> Vec<Vec<String>> {
        self.args_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl crate::ffmpeg::Ffmpeg for MockFfmpeg {
    async fn probe_duration(&self, input: &Utf8Path) -> Result<Duration> {
        assert!(input.exists(), "BUG: probing a file that doesn't exist: {input}");
        self.probes_log.lock().unwrap().push(input.to_owned());
        Ok(self.duration)
    }

    async fn run(&self, args: Vec<String>) -> Result<Vec<u8>> {
        self.args_log.lock().unwrap().push(args.clone());

        if let Some(delay) = self.encode_delay {
            let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_running.fetch_max(running, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.running.fetch_sub(1, Ordering::SeqCst);
        }

        if let Some(err) = self.fail_encode {
            bail!("{err}");
        }

        // The output path is always the last argument
        if self.write_output {
            let output = args.last().unwrap();
            fs::write(output, TRIMMED_BYTES).await?;
        }

        Ok(vec![])
    }
}

//! Simulated network speed test
//!
//! Progress is paced by the host clock: the terminal calls
//! [`SpeedTest::advance`] with the current time and receives whatever lines
//! became due since the previous call.

use rand::Rng;

use super::OutputLine;

/// Delay between progress bar increments
const PROGRESS_STEP_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    FindServer,
    Ping,
    DownloadStart,
    Download { progress: f32 },
    UploadStart,
    Upload { progress: f32 },
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTest {
    stage: Stage,
    next_at_ms: f64,
    ping_ms: u32,
    download_mbps: f32,
    upload_mbps: f32,
}

impl SpeedTest {
    /// Begin a run. Returns the test and the banner lines to print now.
    pub fn start(now_ms: f64) -> (Self, Vec<OutputLine>) {
        let banner = vec![
            OutputLine::response(""),
            OutputLine::response("  Speedtest wird gestartet..."),
            OutputLine::response("  ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"),
            OutputLine::response(""),
            OutputLine::response("  Server wird gesucht..."),
        ];
        let test = Self {
            stage: Stage::FindServer,
            next_at_ms: now_ms + 1000.0,
            ping_ms: 0,
            download_mbps: 0.0,
            upload_mbps: 0.0,
        };
        (test, banner)
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Run every stage that is due by `now_ms`
    pub fn advance<R: Rng>(&mut self, now_ms: f64, rng: &mut R) -> Vec<OutputLine> {
        let mut lines = Vec::new();
        while !self.is_done() && now_ms >= self.next_at_ms {
            self.step(rng, &mut lines);
        }
        lines
    }

    fn schedule(&mut self, stage: Stage, delay_ms: f64) {
        self.stage = stage;
        self.next_at_ms += delay_ms;
    }

    fn step<R: Rng>(&mut self, rng: &mut R, out: &mut Vec<OutputLine>) {
        match self.stage {
            Stage::FindServer => {
                out.push(OutputLine::response(
                    "  Server gefunden: Speedtest.net (Berlin, 12km)",
                ));
                self.schedule(Stage::Ping, 800.0);
            }
            Stage::Ping => {
                self.ping_ms = rng.random_range(5..25);
                out.push(OutputLine::response(format!(
                    "  Ping-Test läuft... {}ms",
                    self.ping_ms
                )));
                self.schedule(Stage::DownloadStart, 1000.0);
            }
            Stage::DownloadStart => {
                out.push(OutputLine::response("  Download-Test wird durchgeführt..."));
                self.schedule(Stage::Download { progress: 0.0 }, PROGRESS_STEP_MS);
            }
            Stage::Download { progress } => {
                let progress = progress + rng.random_range(5.0..20.0);
                if progress >= 100.0 {
                    self.download_mbps = rng.random_range(200.0..1000.0);
                    out.push(OutputLine::response(format!(
                        "  Download: {:.2} Mbps",
                        self.download_mbps
                    )));
                    self.schedule(Stage::UploadStart, 500.0);
                } else {
                    self.schedule(Stage::Download { progress }, PROGRESS_STEP_MS);
                }
            }
            Stage::UploadStart => {
                out.push(OutputLine::response("  Upload-Test wird durchgeführt..."));
                self.schedule(Stage::Upload { progress: 0.0 }, PROGRESS_STEP_MS);
            }
            Stage::Upload { progress } => {
                let progress = progress + rng.random_range(5.0..20.0);
                if progress >= 100.0 {
                    self.upload_mbps = rng.random_range(50.0..450.0);
                    self.summary(out);
                    self.stage = Stage::Done;
                } else {
                    self.schedule(Stage::Upload { progress }, PROGRESS_STEP_MS);
                }
            }
            Stage::Done => {}
        }
    }

    fn summary(&self, out: &mut Vec<OutputLine>) {
        out.extend([
            OutputLine::response(format!("  Upload: {:.2} Mbps", self.upload_mbps)),
            OutputLine::response(""),
            OutputLine::response("  ─────── ERGEBNISSE ───────"),
            OutputLine::response(""),
            OutputLine::response(format!("  Ping: {} ms", self.ping_ms)),
            OutputLine::response(format!("  Download: {:.2} Mbps", self.download_mbps)),
            OutputLine::response(format!("  Upload: {:.2} Mbps", self.upload_mbps)),
            OutputLine::response(""),
            OutputLine::response("  Verbindungstyp: Quantum Entanglement"),
            OutputLine::response("  Jitter: 0.42 ms"),
            OutputLine::response("  Paketverlust: 0.0%"),
            OutputLine::response(""),
        ]);
    }
}

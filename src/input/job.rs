//! Background document loading.
//!
//! Extraction and recognition can take seconds, so they run on a worker
//! thread while the UI keeps drawing. Every job gets a ticket; updates from
//! a ticket other than the current one are dropped when polled.

use super::ocr::{OcrLanguage, OcrStatus, Recognizer, TesseractCli};
use super::{clipboard, load_document, LoadError, LoadedDocument};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadRequest {
    File(PathBuf),
    Clipboard,
    Image {
        path: PathBuf,
        language: OcrLanguage,
    },
}

#[derive(Debug)]
pub enum LoadUpdate {
    Progress(u8),
    Status(OcrStatus),
    Finished(Result<LoadedDocument, LoadError>),
}

struct Envelope {
    ticket: u64,
    update: LoadUpdate,
}

/// Runs a request to completion on the calling thread.
pub fn run_request(
    request: &LoadRequest,
    recognizer: &dyn Recognizer,
    emit: &mut dyn FnMut(LoadUpdate),
) -> Result<LoadedDocument, LoadError> {
    match request {
        LoadRequest::File(path) => {
            load_document(path, &mut |percent| emit(LoadUpdate::Progress(percent)))
        }
        LoadRequest::Clipboard => clipboard::load(),
        LoadRequest::Image { path, language } => {
            let text = recognizer.recognize(path, *language, &mut |status| {
                emit(LoadUpdate::Status(status))
            })?;
            if text.trim().is_empty() {
                return Err(LoadError::EmptyDocument);
            }
            Ok(LoadedDocument {
                text,
                source: format!("ocr:{}", path.display()),
            })
        }
    }
}

struct ActiveJob {
    ticket: u64,
    handle: JoinHandle<()>,
}

/// Owns the worker channel and remembers which job is current.
pub struct JobTracker {
    recognizer: Arc<dyn Recognizer>,
    sender: Sender<Envelope>,
    receiver: Receiver<Envelope>,
    next_ticket: u64,
    active: Option<ActiveJob>,
}

impl Default for JobTracker {
    fn default() -> Self {
        Self::new(Arc::new(TesseractCli::default()))
    }
}

impl JobTracker {
    pub fn new(recognizer: Arc<dyn Recognizer>) -> Self {
        let (sender, receiver) = channel();
        Self {
            recognizer,
            sender,
            receiver,
            next_ticket: 0,
            active: None,
        }
    }

    /// Starts `request` in the background, superseding any running job.
    pub fn start(&mut self, request: LoadRequest) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let sender = self.sender.clone();
        let recognizer = Arc::clone(&self.recognizer);

        log::debug!("load job {} started: {:?}", ticket, request);
        let handle = std::thread::spawn(move || {
            let mut emit = |update: LoadUpdate| {
                let _ = sender.send(Envelope { ticket, update });
            };
            let result = run_request(&request, recognizer.as_ref(), &mut emit);
            emit(LoadUpdate::Finished(result));
        });

        self.active = Some(ActiveJob { ticket, handle });
        ticket
    }

    /// Forgets the running job. Its thread finishes on its own and its
    /// updates are discarded.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(job) => {
                log::debug!("load job {} abandoned", job.ticket);
                true
            }
            None => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_ticket(&self) -> Option<u64> {
        self.active.as_ref().map(|job| job.ticket)
    }

    /// Drains pending updates of the current job without blocking.
    ///
    /// A `Finished` update ends the job. A worker that exited without
    /// reporting (it panicked) yields `Finished(Err(Interrupted))`.
    pub fn poll(&mut self) -> Vec<LoadUpdate> {
        let mut updates = Vec::new();
        if self.drain(&mut updates) {
            return updates;
        }

        let worker_gone = self
            .active
            .as_ref()
            .map(|job| job.handle.is_finished())
            .unwrap_or(false);
        if worker_gone {
            // The worker may have sent its result after the first drain.
            if !self.drain(&mut updates) {
                log::warn!("load job exited without a result");
                updates.push(LoadUpdate::Finished(Err(LoadError::Interrupted)));
                self.active = None;
            }
        }

        updates
    }

    /// Moves current-ticket updates into `updates`; true once the job finished.
    fn drain(&mut self, updates: &mut Vec<LoadUpdate>) -> bool {
        while let Ok(envelope) = self.receiver.try_recv() {
            if self.current_ticket() != Some(envelope.ticket) {
                log::debug!("dropping stale update of load job {}", envelope.ticket);
                continue;
            }
            let finished = matches!(envelope.update, LoadUpdate::Finished(_));
            updates.push(envelope.update);
            if finished {
                self.active = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::thread;
    use std::time::{Duration, Instant};

    struct FakeRecognizer {
        text: &'static str,
        delay: Duration,
    }

    impl Recognizer for FakeRecognizer {
        fn recognize(
            &self,
            _image: &Path,
            _language: OcrLanguage,
            on_status: &mut dyn FnMut(OcrStatus),
        ) -> Result<String, LoadError> {
            on_status(OcrStatus::Loading);
            thread::sleep(self.delay);
            on_status(OcrStatus::Recognizing(Some(100)));
            Ok(self.text.to_string())
        }
    }

    fn tracker(text: &'static str, delay_ms: u64) -> JobTracker {
        JobTracker::new(Arc::new(FakeRecognizer {
            text,
            delay: Duration::from_millis(delay_ms),
        }))
    }

    fn image(name: &str) -> LoadRequest {
        LoadRequest::Image {
            path: PathBuf::from(name),
            language: OcrLanguage::German,
        }
    }

    /// Polls until the current job finishes, collecting every update.
    fn wait_for_finish(tracker: &mut JobTracker) -> Vec<LoadUpdate> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut all = Vec::new();
        while Instant::now() < deadline {
            let updates = tracker.poll();
            let done = updates
                .iter()
                .any(|u| matches!(u, LoadUpdate::Finished(_)));
            all.extend(updates);
            if done {
                return all;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("load job did not finish in time");
    }

    fn finished_text(updates: &[LoadUpdate]) -> Option<String> {
        updates.iter().find_map(|u| match u {
            LoadUpdate::Finished(Ok(doc)) => Some(doc.text.clone()),
            _ => None,
        })
    }

    #[test]
    fn test_run_request_image() {
        let recognizer = FakeRecognizer {
            text: "Erkannter Text.",
            delay: Duration::ZERO,
        };
        let mut statuses = Vec::new();
        let doc = run_request(&image("scan.png"), &recognizer, &mut |u| {
            if let LoadUpdate::Status(s) = u {
                statuses.push(s);
            }
        })
        .unwrap();

        assert_eq!(doc.text, "Erkannter Text.");
        assert_eq!(doc.source, "ocr:scan.png");
        assert_eq!(
            statuses,
            vec![OcrStatus::Loading, OcrStatus::Recognizing(Some(100))]
        );
    }

    #[test]
    fn test_run_request_blank_recognition() {
        let recognizer = FakeRecognizer {
            text: "   ",
            delay: Duration::ZERO,
        };
        let result = run_request(&image("scan.png"), &recognizer, &mut |_| {});
        assert!(matches!(result, Err(LoadError::EmptyDocument)));
    }

    #[test]
    fn test_background_file_load() {
        let test_file = "test_job_background.txt";
        fs::write(test_file, "Chapter 1\nIt was a dark night.").unwrap();

        let mut tracker = tracker("", 0);
        tracker.start(LoadRequest::File(PathBuf::from(test_file)));
        assert!(tracker.is_busy());

        let updates = wait_for_finish(&mut tracker);
        assert!(updates
            .iter()
            .any(|u| matches!(u, LoadUpdate::Progress(100))));
        assert_eq!(
            finished_text(&updates).as_deref(),
            Some("Chapter 1\nIt was a dark night.")
        );
        assert!(!tracker.is_busy());

        fs::remove_file(test_file).unwrap();
    }

    #[test]
    fn test_background_load_error() {
        let mut tracker = tracker("", 0);
        tracker.start(LoadRequest::File(PathBuf::from("/nonexistent/book.epub")));

        let updates = wait_for_finish(&mut tracker);
        assert!(updates
            .iter()
            .any(|u| matches!(u, LoadUpdate::Finished(Err(LoadError::FileNotFound(_))))));
    }

    #[test]
    fn test_superseded_job_is_ignored() {
        let mut tracker = tracker("old scan", 100);
        let first = tracker.start(image("old.png"));

        let test_file = "test_job_superseded.txt";
        fs::write(test_file, "new text").unwrap();
        let second = tracker.start(LoadRequest::File(PathBuf::from(test_file)));
        assert_ne!(first, second);
        assert_eq!(tracker.current_ticket(), Some(second));

        let updates = wait_for_finish(&mut tracker);
        assert_eq!(finished_text(&updates).as_deref(), Some("new text"));

        // Let the superseded recognizer finish; nothing of it may surface.
        thread::sleep(Duration::from_millis(200));
        assert!(tracker.poll().is_empty());

        fs::remove_file(test_file).unwrap();
    }

    #[test]
    fn test_cancelled_job_is_ignored() {
        let mut tracker = tracker("late", 50);
        tracker.start(image("slow.png"));
        assert!(tracker.cancel());
        assert!(!tracker.is_busy());
        assert!(!tracker.cancel());

        thread::sleep(Duration::from_millis(150));
        assert!(tracker.poll().is_empty());
    }
}

//! File watching for directory regeneration.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A page appeared in the scan directory
    PageAdded(PathBuf),

    /// A page disappeared from the scan directory
    PageRemoved(PathBuf),

    /// A page was renamed
    PageRenamed(PathBuf),

    /// The exclusion list or template changed
    InputChanged(PathBuf),
}

/// Watches the generator inputs for changes that affect the directory page.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `pages_dir` plus the individual `inputs` files.
    ///
    /// Events for files named in `ignore` (the generated page itself) are
    /// dropped so a regeneration never triggers another one.
    pub fn new(
        pages_dir: &Path,
        inputs: &[PathBuf],
        ignore: &[String],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        watcher
            .watch(pages_dir, RecursiveMode::NonRecursive)
            .map_err(std::io::Error::other)?;

        let mut input_names = Vec::new();
        for input in inputs {
            if input.exists() {
                watcher
                    .watch(input, RecursiveMode::NonRecursive)
                    .map_err(std::io::Error::other)?;
            }
            if let Some(name) = file_name(input) {
                input_names.push(name.to_string());
            }
        }

        let ignore = ignore.to_vec();
        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                for path in &event.paths {
                    if let Some(e) = classify_event(path, &event.kind, &input_names, &ignore) {
                        if async_tx.blocking_send(e).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Classify a notify event into a WatchEvent.
fn classify_event(
    path: &Path,
    kind: &EventKind,
    inputs: &[String],
    ignore: &[String],
) -> Option<WatchEvent> {
    use notify::event::ModifyKind;

    let name = file_name(path)?;

    // temporary files written by the generator before renaming into place
    if name.starts_with('.') && name.ends_with(".tmp") {
        return None;
    }
    if ignore.iter().any(|i| i == name) {
        return None;
    }

    if inputs.iter().any(|i| i == name) {
        return match kind {
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
                Some(WatchEvent::InputChanged(path.to_path_buf()))
            }
            _ => None,
        };
    }

    if !name.ends_with(".html") {
        return None;
    }

    match kind {
        EventKind::Create(_) => Some(WatchEvent::PageAdded(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::PageRemoved(path.to_path_buf())),
        EventKind::Modify(ModifyKind::Name(_)) => {
            Some(WatchEvent::PageRenamed(path.to_path_buf()))
        }
        // content edits do not change the listing
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind, RenameMode};
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn classify(path: &str, kind: EventKind) -> Option<WatchEvent> {
        classify_event(
            Path::new(path),
            &kind,
            &["directory_exclude.json".to_string()],
            &["directory.html".to_string()],
        )
    }

    #[test]
    fn page_creation_and_removal_are_reported() {
        assert_eq!(
            classify("/s/pages/a.html", EventKind::Create(CreateKind::File)),
            Some(WatchEvent::PageAdded(PathBuf::from("/s/pages/a.html")))
        );
        assert_eq!(
            classify("/s/pages/a.html", EventKind::Remove(RemoveKind::File)),
            Some(WatchEvent::PageRemoved(PathBuf::from("/s/pages/a.html")))
        );
        assert!(matches!(
            classify(
                "/s/pages/b.html",
                EventKind::Modify(ModifyKind::Name(RenameMode::To))
            ),
            Some(WatchEvent::PageRenamed(_))
        ));
    }

    #[test]
    fn content_edits_are_ignored() {
        assert_eq!(
            classify(
                "/s/pages/a.html",
                EventKind::Modify(ModifyKind::Data(DataChange::Content))
            ),
            None
        );
    }

    #[test]
    fn generated_output_is_ignored() {
        assert_eq!(
            classify("/s/pages/directory.html", EventKind::Create(CreateKind::File)),
            None
        );
        assert_eq!(
            classify(
                "/s/pages/.directory.html.tmp",
                EventKind::Create(CreateKind::File)
            ),
            None
        );
    }

    #[test]
    fn non_html_files_are_ignored() {
        assert_eq!(
            classify("/s/pages/style.css", EventKind::Create(CreateKind::File)),
            None
        );
    }

    #[test]
    fn exclusion_list_edits_are_reported() {
        assert!(matches!(
            classify(
                "/s/directory_exclude.json",
                EventKind::Modify(ModifyKind::Data(DataChange::Content))
            ),
            Some(WatchEvent::InputChanged(_))
        ));
    }

    #[tokio::test]
    async fn watches_page_creation() {
        let temp = tempdir().unwrap();

        let (watcher, mut rx) = FileWatcher::new(temp.path(), &[], &[]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(temp.path().join("new.html"), "<html></html>").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }
}

pub(crate) use futures::channel::mpsc::Receiver;
use futures::{SinkExt, channel::mpsc::channel};
use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecursiveMode, Result};
pub(crate) use notify::{INotifyWatcher, Watcher};

use std::path::Path;

make_log_macro!(debug, "watcher");

/// Watch a single state file, events are delivered through the returned channel.
///
/// Dropping the watcher ends the subscription and closes the channel.
pub fn file_watcher<P: AsRef<Path>>(
    path: P,
) -> Result<(INotifyWatcher, Receiver<Result<Event>>)> {
    let (mut tx, rx) = channel(1);

    let mut inotify_watcher = INotifyWatcher::new(
        move |res: Result<Event>| {
            futures::executor::block_on(async {
                if tx.send(res).await.is_err() {
                    debug!("receiver is gone, dropping event");
                }
            });
        },
        Config::default(),
    )?;

    inotify_watcher.watch(path.as_ref(), RecursiveMode::NonRecursive)?;

    Ok((inotify_watcher, rx))
}

/// Whether `kind` says the file content changed.
///
/// Metadata updates and renames do not count.
pub fn is_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Any | ModifyKind::Data(_) | ModifyKind::Other)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{
        AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind, RenameMode,
    };

    #[test]
    fn content_changes() {
        assert!(is_change(&EventKind::Modify(ModifyKind::Any)));
        assert!(is_change(&EventKind::Modify(ModifyKind::Data(
            DataChange::Any
        ))));
        assert!(is_change(&EventKind::Modify(ModifyKind::Data(
            DataChange::Content
        ))));
    }

    #[test]
    fn other_events_are_filtered() {
        assert!(!is_change(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::Any
        ))));
        assert!(!is_change(&EventKind::Modify(ModifyKind::Name(
            RenameMode::Any
        ))));
        assert!(!is_change(&EventKind::Remove(RemoveKind::File)));
        assert!(!is_change(&EventKind::Create(CreateKind::File)));
        assert!(!is_change(&EventKind::Access(AccessKind::Any)));
        assert!(!is_change(&EventKind::Any));
    }

    #[test]
    fn missing_file_cannot_be_watched() {
        let dir = tempfile::tempdir().unwrap();
        assert!(file_watcher(dir.path().join("actual_brightness")).is_err());
    }

    #[test]
    fn existing_file_can_be_watched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actual_brightness");
        std::fs::write(&path, "1\n").unwrap();
        assert!(file_watcher(&path).is_ok());
    }
}
